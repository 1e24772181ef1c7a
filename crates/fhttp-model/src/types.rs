//! Decoded header values carried by messages.
//!
//! These are plain values handed over by an external header codec. Nothing
//! here parses wire text; constructors take already-split parts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use http::HeaderName;

use crate::collections::ValueSet;

// ── Tokens ────────────────────────────────────────────────────────

/// A content coding such as `gzip` or `br`. Compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentCoding(String);

impl ContentCoding {
    pub fn new(coding: impl AsRef<str>) -> Self {
        Self(coding.as_ref().to_ascii_lowercase())
    }

    pub fn gzip() -> Self {
        Self::new("gzip")
    }

    pub fn deflate() -> Self {
        Self::new("deflate")
    }

    pub fn identity() -> Self {
        Self::new("identity")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A language tag such as `en-US`. Compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag (`en` for `en-us`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

// ── Content-Range ─────────────────────────────────────────────────

/// A `bytes` content range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteContentRange {
    /// `first..=last`, with the complete length when known.
    Satisfied {
        first: u64,
        last: u64,
        complete_length: Option<u64>,
    },
    /// The range could not be satisfied; carries the complete length.
    Unsatisfied { complete_length: u64 },
}

impl ByteContentRange {
    /// Number of bytes covered.
    ///
    /// `None` when unsatisfied, inverted (`first > last`), or wider than
    /// `u64::MAX` bytes.
    pub fn len(&self) -> Option<u64> {
        match *self {
            ByteContentRange::Satisfied { first, last, .. } => {
                last.checked_sub(first).and_then(|span| span.checked_add(1))
            }
            ByteContentRange::Unsatisfied { .. } => None,
        }
    }
}

/// A content range in a unit other than bytes, kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OtherContentRange {
    pub unit: String,
    pub value: String,
}

/// Either a byte range or a range in some other unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentRange {
    Bytes(ByteContentRange),
    Other(OtherContentRange),
}

impl From<ByteContentRange> for ContentRange {
    fn from(range: ByteContentRange) -> Self {
        ContentRange::Bytes(range)
    }
}

impl From<OtherContentRange> for ContentRange {
    fn from(range: OtherContentRange) -> Self {
        ContentRange::Other(range)
    }
}

// ── Authentication ────────────────────────────────────────────────

/// Parameters of a challenge or credentials value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChallengeData {
    Token68(String),
    Parameters(BTreeMap<String, String>),
}

/// An authentication challenge or credentials value.
///
/// The scheme is case-insensitive and stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Challenge {
    scheme: String,
    data: ChallengeData,
}

impl Challenge {
    pub fn new(scheme: impl AsRef<str>, data: ChallengeData) -> Self {
        Self {
            scheme: scheme.as_ref().to_ascii_lowercase(),
            data,
        }
    }

    pub fn token68(scheme: impl AsRef<str>, token: impl Into<String>) -> Self {
        Self::new(scheme, ChallengeData::Token68(token.into()))
    }

    pub fn with_parameters<K, V>(
        scheme: impl AsRef<str>,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
            .collect();
        Self::new(scheme, ChallengeData::Parameters(params))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn data(&self) -> &ChallengeData {
        &self.data
    }

    /// Look up a named parameter. Always `None` for token68 data.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        match &self.data {
            ChallengeData::Parameters(params) => {
                params.get(&name.to_ascii_lowercase()).map(String::as_str)
            }
            ChallengeData::Token68(_) => None,
        }
    }
}

// ── Caching ───────────────────────────────────────────────────────

/// A single cache instruction (`Cache-Control` or `Pragma` member).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheDirective {
    name: String,
    value: Option<String>,
}

impl CacheDirective {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_ascii_lowercase(),
            value: None,
        }
    }

    pub fn with_value(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            name: name.as_ref().to_ascii_lowercase(),
            value: Some(value.into()),
        }
    }

    pub fn no_cache() -> Self {
        Self::new("no-cache")
    }

    pub fn no_store() -> Self {
        Self::new("no-store")
    }

    pub fn no_transform() -> Self {
        Self::new("no-transform")
    }

    pub fn must_revalidate() -> Self {
        Self::new("must-revalidate")
    }

    pub fn public() -> Self {
        Self::new("public")
    }

    pub fn private() -> Self {
        Self::new("private")
    }

    pub fn max_age(seconds: u64) -> Self {
        Self::with_value("max-age", seconds.to_string())
    }

    pub fn s_maxage(seconds: u64) -> Self {
        Self::with_value("s-maxage", seconds.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// An opaque validator for conditional requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    tag: String,
    weak: bool,
}

impl EntityTag {
    pub fn strong(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            weak: false,
        }
    }

    pub fn weak(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            weak: true,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Strong comparison: both strong and byte-identical.
    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.tag == other.tag
    }

    /// Weak comparison: identical opaque tags, weakness ignored.
    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.tag == other.tag
    }
}

// ── Products ──────────────────────────────────────────────────────

/// A product token, as used by `User-Agent` and `Server`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    pub name: String,
    pub version: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

/// The client's self-description, most significant product first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserAgent {
    products: Vec<Product>,
}

impl UserAgent {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().collect(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

/// The origin server's self-description, most significant product first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Server {
    products: Vec<Product>,
}

impl Server {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().collect(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

// ── Response negotiation metadata ─────────────────────────────────

/// A range unit advertised by `Accept-Ranges`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeUnit {
    Bytes,
    Other(String),
}

/// Range units a resource accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptableRanges {
    /// `Accept-Ranges: none`.
    None,
    Units(ValueSet<RangeUnit>),
}

impl AcceptableRanges {
    pub fn bytes() -> Self {
        AcceptableRanges::Units(ValueSet::from([RangeUnit::Bytes]))
    }

    pub fn accepts(&self, unit: &RangeUnit) -> bool {
        match self {
            AcceptableRanges::None => false,
            AcceptableRanges::Units(units) => units.contains(unit),
        }
    }
}

/// Which request fields selected a cached response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vary {
    /// `Vary: *`.
    Any,
    Headers(ValueSet<HeaderName>),
}

impl Vary {
    pub fn headers(names: impl IntoIterator<Item = HeaderName>) -> Self {
        Vary::Headers(names.into_iter().collect())
    }
}

/// A warning attached to a response. Order among warnings is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Warning {
    pub code: u16,
    pub agent: String,
    pub text: String,
    pub date: Option<DateTime<Utc>>,
}

impl Warning {
    pub fn new(code: u16, agent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code,
            agent: agent.into(),
            text: text.into(),
            date: None,
        }
    }

    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}
