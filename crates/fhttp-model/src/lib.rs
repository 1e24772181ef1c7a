//! fhttp-model: immutable HTTP message values.
//!
//! Provides [`ContentInfo`], [`RequestMessage`] and [`ResponseMessage`]:
//! frozen records whose many optional fields are updated copy-on-write.
//!
//! # Update Protocol
//!
//! Every entity is derived, never mutated:
//!
//! - `with(overrides)` replaces the fields named in an override set and
//!   carries everything else forward, payload included.
//! - `with_entity(Some(payload), overrides)` does the same while swapping
//!   the payload, which may change the type parameter. `None` is rejected
//!   with [`ModelError::InvalidArgument`].
//! - `without(clears)` resets flagged fields to absent or empty;
//!   `without_entity(clears)` also drops the payload.
//! - `try_get_<field>(&mut out)` reports presence and writes either the
//!   value or a documented [`Sentinel`] into `out`.
//!
//! Override sets hold an [`Override`] per field (`Unchanged` or `Set`), so
//! "leave alone" and "replace" are distinguished by type rather than by a
//! magic value, and clearing is only reachable through a clear set.
//!
//! # Collections
//!
//! Repeated values are [`ValueSet`]s (unordered, deduplicated), except
//! `Warning`, which keeps supplied order, and extension headers, held in
//! [`HeaderFields`] keyed case-insensitively with last-write-wins.
//! Supplying a collection always replaces it whole.

#[macro_use]
mod macros;

pub mod adapter;
pub mod collections;
pub mod conditions;
pub mod config;
pub mod content;
mod error;
mod header;
pub mod media;
pub mod request;
pub mod response;
pub mod types;

pub use adapter::{Override, Sentinel};
pub use collections::ValueSet;
pub use conditions::{
    EntityTagMatch, IfRange, Preference, Quality, RequestPreconditions, RequestPreferences,
};
pub use config::ModelConfig;
pub use content::{ContentInfo, ContentInfoClears, ContentInfoOverrides};
pub use error::{ModelError, ModelResult};
pub use header::{Header, HeaderFields};
pub use media::{Charset, MediaRange, MediaType};
pub use request::{RequestClears, RequestMessage, RequestOverrides};
pub use response::{ResponseClears, ResponseMessage, ResponseOverrides};
pub use types::*;
