//! Media types, media ranges, and charsets.

use std::collections::BTreeMap;

use crate::adapter::try_get_ref;

/// A character set name such as `utf-8`. Compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Charset(String);

impl Charset {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_ascii_lowercase())
    }

    pub fn utf_8() -> Self {
        Self::new("utf-8")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The concrete media type of a representation.
///
/// `charset` is held apart from the other parameters so it can be queried
/// with presence semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    type_: String,
    subtype: String,
    charset: Option<Charset>,
    parameters: BTreeMap<String, String>,
}

impl MediaType {
    pub fn new(type_: impl AsRef<str>, subtype: impl AsRef<str>) -> Self {
        Self {
            type_: type_.as_ref().to_ascii_lowercase(),
            subtype: subtype.as_ref().to_ascii_lowercase(),
            charset: None,
            parameters: BTreeMap::new(),
        }
    }

    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }

    /// Add a non-charset parameter. Names are stored lowercased.
    pub fn with_parameter(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.parameters
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    pub fn charset(&self) -> Option<&Charset> {
        self.charset.as_ref()
    }

    /// Presence accessor for the charset; `out` is `None` when absent.
    pub fn try_get_charset<'a>(&'a self, out: &mut Option<&'a Charset>) -> bool {
        try_get_ref(&self.charset, out)
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

/// A media range from `Accept`; `*` is allowed for type and subtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRange {
    type_: String,
    subtype: String,
    charset: Option<Charset>,
    parameters: BTreeMap<String, String>,
}

impl MediaRange {
    pub fn new(type_: impl AsRef<str>, subtype: impl AsRef<str>) -> Self {
        Self {
            type_: type_.as_ref().to_ascii_lowercase(),
            subtype: subtype.as_ref().to_ascii_lowercase(),
            charset: None,
            parameters: BTreeMap::new(),
        }
    }

    /// `*/*`.
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }

    pub fn with_parameter(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.parameters
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn is_wildcard(&self) -> bool {
        self.type_ == "*" || self.subtype == "*"
    }

    pub fn charset(&self) -> Option<&Charset> {
        self.charset.as_ref()
    }

    /// Presence accessor for the charset; `out` is `None` when absent.
    pub fn try_get_charset<'a>(&'a self, out: &mut Option<&'a Charset>) -> bool {
        try_get_ref(&self.charset, out)
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

impl From<MediaType> for MediaRange {
    fn from(media: MediaType) -> Self {
        Self {
            type_: media.type_,
            subtype: media.subtype,
            charset: media.charset,
            parameters: media.parameters,
        }
    }
}
