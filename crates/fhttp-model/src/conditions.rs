//! Request preconditions and content preferences.
//!
//! Both are carried verbatim; evaluating a precondition or negotiating
//! content against preferences is left to callers.

use chrono::{DateTime, Utc};

use crate::adapter::{try_get, try_get_ref};
use crate::media::{Charset, MediaRange};
use crate::types::{ContentCoding, EntityTag, LanguageTag};

/// `If-Match` / `If-None-Match` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityTagMatch {
    /// `*`.
    Any,
    Tags(Vec<EntityTag>),
}

/// `If-Range` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IfRange {
    Date(DateTime<Utc>),
    Tag(EntityTag),
}

/// Conditional request fields. The default holds no preconditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPreconditions {
    pub if_match: Option<EntityTagMatch>,
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_none_match: Option<EntityTagMatch>,
    pub if_range: Option<IfRange>,
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

impl RequestPreconditions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn try_get_if_match<'a>(&'a self, out: &mut Option<&'a EntityTagMatch>) -> bool {
        try_get_ref(&self.if_match, out)
    }

    pub fn try_get_if_modified_since(&self, out: &mut DateTime<Utc>) -> bool {
        try_get(self.if_modified_since, out)
    }

    pub fn try_get_if_none_match<'a>(&'a self, out: &mut Option<&'a EntityTagMatch>) -> bool {
        try_get_ref(&self.if_none_match, out)
    }

    pub fn try_get_if_range<'a>(&'a self, out: &mut Option<&'a IfRange>) -> bool {
        try_get_ref(&self.if_range, out)
    }

    pub fn try_get_if_unmodified_since(&self, out: &mut DateTime<Utc>) -> bool {
        try_get(self.if_unmodified_since, out)
    }
}

/// Relative quality weight, in thousandths (`q=0.5` is 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quality(u16);

impl Quality {
    pub const MAX: Quality = Quality(1000);
    pub const MIN: Quality = Quality(0);

    /// Values above 1000 are clamped.
    pub fn from_thousandths(q: u16) -> Self {
        Quality(q.min(1000))
    }

    pub fn thousandths(self) -> u16 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::MAX
    }
}

/// A preferred value and its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference<V> {
    pub value: V,
    pub quality: Quality,
}

impl<V> Preference<V> {
    /// A preference with the default weight of 1.
    pub fn new(value: V) -> Self {
        Self {
            value,
            quality: Quality::default(),
        }
    }

    pub fn weighted(value: V, quality: Quality) -> Self {
        Self { value, quality }
    }
}

/// Proactive negotiation fields, each in the order the client sent them.
/// The default expresses no preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPreferences {
    pub accepted_charsets: Vec<Preference<Charset>>,
    pub accepted_encodings: Vec<Preference<ContentCoding>>,
    pub accepted_languages: Vec<Preference<LanguageTag>>,
    pub accepted_media_ranges: Vec<Preference<MediaRange>>,
}

impl RequestPreferences {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted_charsets.is_empty()
            && self.accepted_encodings.is_empty()
            && self.accepted_languages.is_empty()
            && self.accepted_media_ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preconditions_are_empty() {
        let pre = RequestPreconditions::none();
        assert!(pre.is_empty());

        let mut since = Utc::now();
        assert!(!pre.try_get_if_modified_since(&mut since));
        assert_eq!(since, DateTime::<Utc>::MIN_UTC);

        let mut tags = None;
        assert!(!pre.try_get_if_none_match(&mut tags));
        assert!(tags.is_none());
    }

    #[test]
    fn precondition_dates_are_independent() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let pre = RequestPreconditions {
            if_unmodified_since: Some(at),
            ..RequestPreconditions::none()
        };

        let mut out = DateTime::<Utc>::MIN_UTC;
        assert!(pre.try_get_if_unmodified_since(&mut out));
        assert_eq!(out, at);
        assert!(!pre.try_get_if_modified_since(&mut out));
        assert!(!pre.is_empty());
    }

    #[test]
    fn if_match_any() {
        let pre = RequestPreconditions {
            if_match: Some(EntityTagMatch::Any),
            ..Default::default()
        };
        let mut out = None;
        assert!(pre.try_get_if_match(&mut out));
        assert_eq!(out, Some(&EntityTagMatch::Any));
    }

    #[test]
    fn quality_clamps() {
        assert_eq!(Quality::from_thousandths(1500), Quality::MAX);
        assert_eq!(Quality::from_thousandths(250).thousandths(), 250);
        assert_eq!(Preference::new("x").quality, Quality::MAX);
    }

    #[test]
    fn preferences_keep_order() {
        let prefs = RequestPreferences {
            accepted_languages: vec![
                Preference::new(LanguageTag::new("fr")),
                Preference::weighted(LanguageTag::new("en"), Quality::from_thousandths(500)),
            ],
            ..RequestPreferences::none()
        };
        assert!(!prefs.is_empty());
        assert_eq!(prefs.accepted_languages[0].value.as_str(), "fr");
        assert_eq!(prefs.accepted_languages[1].value.as_str(), "en");
    }
}
