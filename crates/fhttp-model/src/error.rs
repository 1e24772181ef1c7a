//! Error types for message derivation.

use thiserror::Error;

/// Result type alias for update operations that can fail.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while deriving a message.
///
/// Absence of a field is never an error; it is reported through the
/// `try_get_*` accessors. The only rejected input is a payload-replacing
/// update that was handed no payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl ModelError {
    pub(crate) fn payload_required() -> Self {
        ModelError::InvalidArgument("payload required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_required_message() {
        let err = ModelError::payload_required();
        assert_eq!(err, ModelError::InvalidArgument("payload required"));
        assert_eq!(err.to_string(), "invalid argument: payload required");
    }

    #[test]
    fn error_is_std_error() {
        let err = ModelError::payload_required();
        let _: &dyn std::error::Error = &err;
    }
}
