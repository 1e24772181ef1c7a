use http::Uri;
use tracing::trace;

use crate::adapter::{cleared, try_get, try_get_ref};
use crate::collections::ValueSet;
use crate::media::MediaType;
use crate::types::{ContentCoding, ContentRange, LanguageTag};

/// Metadata describing a message body: encoding, language, length,
/// location, media type, and range.
///
/// A pure value with no identity; two instances are equal when every field
/// is equal. Derive modified copies with [`with`](ContentInfo::with) and
/// [`without`](ContentInfo::without).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentInfo {
    encodings: ValueSet<ContentCoding>,
    languages: ValueSet<LanguageTag>,
    length: Option<u64>,
    location: Option<Uri>,
    media_type: Option<MediaType>,
    range: Option<ContentRange>,
}

overrides! {
    /// Replacement values for [`ContentInfo::with`].
    pub struct ContentInfoOverrides {
        encodings: ValueSet<ContentCoding>,
        languages: ValueSet<LanguageTag>,
        length: u64,
        location: Uri,
        media_type: MediaType,
        range: ContentRange,
    }
}

clears! {
    /// Fields to reset in [`ContentInfo::without`].
    pub struct ContentInfoClears {
        encodings,
        languages,
        length,
        location,
        media_type,
        range,
    }
}

impl ContentInfo {
    /// Content info with every field absent or empty.
    pub fn none() -> Self {
        Self::default()
    }

    /// Derive a copy with the given fields replaced.
    pub fn with(&self, overrides: ContentInfoOverrides) -> Self {
        trace!(unchanged = overrides.is_empty(), "deriving content info");
        Self {
            encodings: overrides.encodings.apply(&self.encodings),
            languages: overrides.languages.apply(&self.languages),
            length: overrides.length.apply_optional(&self.length),
            location: overrides.location.apply_optional(&self.location),
            media_type: overrides.media_type.apply_optional(&self.media_type),
            range: overrides.range.apply_optional(&self.range),
        }
    }

    /// Derive a copy with the flagged fields reset to absent or empty.
    pub fn without(&self, clears: ContentInfoClears) -> Self {
        trace!(?clears, "clearing content info");
        Self {
            encodings: cleared(clears.encodings, &self.encodings),
            languages: cleared(clears.languages, &self.languages),
            length: cleared(clears.length, &self.length),
            location: cleared(clears.location, &self.location),
            media_type: cleared(clears.media_type, &self.media_type),
            range: cleared(clears.range, &self.range),
        }
    }

    pub fn encodings(&self) -> &ValueSet<ContentCoding> {
        &self.encodings
    }

    pub fn languages(&self) -> &ValueSet<LanguageTag> {
        &self.languages
    }

    pub fn length(&self) -> Option<u64> {
        self.length
    }

    pub fn location(&self) -> Option<&Uri> {
        self.location.as_ref()
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }

    pub fn range(&self) -> Option<&ContentRange> {
        self.range.as_ref()
    }

    /// Presence accessor for the length. Absent reads as `-1`.
    ///
    /// Lengths beyond `i64::MAX` report as present with `i64::MAX`; use
    /// [`length`](ContentInfo::length) for the exact value.
    pub fn try_get_length(&self, out: &mut i64) -> bool {
        try_get(
            self.length.map(|len| i64::try_from(len).unwrap_or(i64::MAX)),
            out,
        )
    }

    pub fn try_get_location<'a>(&'a self, out: &mut Option<&'a Uri>) -> bool {
        try_get_ref(&self.location, out)
    }

    pub fn try_get_media_type<'a>(&'a self, out: &mut Option<&'a MediaType>) -> bool {
        try_get_ref(&self.media_type, out)
    }

    pub fn try_get_range<'a>(&'a self, out: &mut Option<&'a ContentRange>) -> bool {
        try_get_ref(&self.range, out)
    }
}
