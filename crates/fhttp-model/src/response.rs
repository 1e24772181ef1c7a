use chrono::{DateTime, TimeDelta, Utc};
use http::{Method, StatusCode, Uri, Version};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::adapter::{cleared, try_get, try_get_ref};
use crate::collections::ValueSet;
use crate::content::ContentInfo;
use crate::error::{ModelError, ModelResult};
use crate::header::HeaderFields;
use crate::types::{AcceptableRanges, CacheDirective, Challenge, EntityTag, Server, Vary, Warning};

/// An immutable HTTP response carrying an optional payload of type `T`.
///
/// Mirrors [`RequestMessage`](crate::RequestMessage): build with
/// [`ResponseMessage::new`], derive with `with`, `with_entity`, `without`
/// and `without_entity`. Warnings keep the order they were supplied in;
/// every other repeated field is a set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMessage<T> {
    status: StatusCode,
    entity: Option<T>,
    id: Uuid,
    accepted_ranges: Option<AcceptableRanges>,
    age: Option<TimeDelta>,
    allowed: ValueSet<Method>,
    authenticate: ValueSet<Challenge>,
    cache_control: ValueSet<CacheDirective>,
    content_info: ContentInfo,
    date: Option<DateTime<Utc>>,
    etag: Option<EntityTag>,
    expires: Option<DateTime<Utc>>,
    headers: HeaderFields,
    last_modified: Option<DateTime<Utc>>,
    location: Option<Uri>,
    proxy_authenticate: ValueSet<Challenge>,
    retry_after: Option<DateTime<Utc>>,
    server: Option<Server>,
    vary: Option<Vary>,
    version: Version,
    warning: Vec<Warning>,
}

overrides! {
    /// Replacement values for [`ResponseMessage::with`] and
    /// [`ResponseMessage::with_entity`].
    pub struct ResponseOverrides {
        status: StatusCode,
        id: Uuid,
        accepted_ranges: AcceptableRanges,
        age: TimeDelta,
        allowed: ValueSet<Method>,
        authenticate: ValueSet<Challenge>,
        cache_control: ValueSet<CacheDirective>,
        content_info: ContentInfo,
        date: DateTime<Utc>,
        etag: EntityTag,
        expires: DateTime<Utc>,
        headers: HeaderFields,
        last_modified: DateTime<Utc>,
        location: Uri,
        proxy_authenticate: ValueSet<Challenge>,
        retry_after: DateTime<Utc>,
        server: Server,
        vary: Vary,
        version: Version,
        /// Replaces the whole sequence, in the given order.
        warning: Vec<Warning>,
    }
}

clears! {
    /// Fields to reset in [`ResponseMessage::without`] and
    /// [`ResponseMessage::without_entity`].
    pub struct ResponseClears {
        accepted_ranges,
        age,
        allowed,
        authenticate,
        cache_control,
        content_info,
        date,
        etag,
        expires,
        headers,
        last_modified,
        location,
        proxy_authenticate,
        retry_after,
        server,
        vary,
        warning,
    }
}

impl<T> ResponseMessage<T> {
    /// A response with no payload, a fresh id, HTTP/1.1, and every other
    /// field absent or empty.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            entity: None,
            id: Uuid::new_v4(),
            accepted_ranges: None,
            age: None,
            allowed: ValueSet::new(),
            authenticate: ValueSet::new(),
            cache_control: ValueSet::new(),
            content_info: ContentInfo::none(),
            date: None,
            etag: None,
            expires: None,
            headers: HeaderFields::new(),
            last_modified: None,
            location: None,
            proxy_authenticate: ValueSet::new(),
            retry_after: None,
            server: None,
            vary: None,
            version: Version::HTTP_11,
            warning: Vec::new(),
        }
    }

    /// Derive a response with new metadata; the payload is carried over.
    pub fn with(&self, overrides: ResponseOverrides) -> Self
    where
        T: Clone,
    {
        self.derive(self.entity.clone(), overrides)
    }

    /// Derive a response carrying `entity`, possibly of a new type.
    ///
    /// `None` is rejected with [`ModelError::InvalidArgument`].
    pub fn with_entity<U>(
        &self,
        entity: Option<U>,
        overrides: ResponseOverrides,
    ) -> ModelResult<ResponseMessage<U>> {
        let Some(entity) = entity else {
            debug!(id = %self.id, "response payload replacement without a payload");
            return Err(ModelError::payload_required());
        };
        Ok(self.derive(Some(entity), overrides))
    }

    /// Derive a response with the flagged fields reset; the payload is kept.
    pub fn without(&self, clears: ResponseClears) -> Self
    where
        T: Clone,
    {
        self.strip(self.entity.clone(), clears)
    }

    /// Derive a response with the flagged fields reset and no payload.
    pub fn without_entity<U>(&self, clears: ResponseClears) -> ResponseMessage<U> {
        self.strip(None, clears)
    }

    fn derive<U>(&self, entity: Option<U>, o: ResponseOverrides) -> ResponseMessage<U> {
        trace!(id = %self.id, unchanged = o.is_empty(), "deriving response");
        ResponseMessage {
            status: o.status.apply(&self.status),
            entity,
            id: o.id.apply(&self.id),
            accepted_ranges: o.accepted_ranges.apply_optional(&self.accepted_ranges),
            age: o.age.apply_optional(&self.age),
            allowed: o.allowed.apply(&self.allowed),
            authenticate: o.authenticate.apply(&self.authenticate),
            cache_control: o.cache_control.apply(&self.cache_control),
            content_info: o.content_info.apply(&self.content_info),
            date: o.date.apply_optional(&self.date),
            etag: o.etag.apply_optional(&self.etag),
            expires: o.expires.apply_optional(&self.expires),
            headers: o.headers.apply(&self.headers),
            last_modified: o.last_modified.apply_optional(&self.last_modified),
            location: o.location.apply_optional(&self.location),
            proxy_authenticate: o.proxy_authenticate.apply(&self.proxy_authenticate),
            retry_after: o.retry_after.apply_optional(&self.retry_after),
            server: o.server.apply_optional(&self.server),
            vary: o.vary.apply_optional(&self.vary),
            version: o.version.apply(&self.version),
            warning: o.warning.apply(&self.warning),
        }
    }

    fn strip<U>(&self, entity: Option<U>, c: ResponseClears) -> ResponseMessage<U> {
        trace!(id = %self.id, clears = ?c, "clearing response");
        ResponseMessage {
            status: self.status,
            entity,
            id: self.id,
            accepted_ranges: cleared(c.accepted_ranges, &self.accepted_ranges),
            age: cleared(c.age, &self.age),
            allowed: cleared(c.allowed, &self.allowed),
            authenticate: cleared(c.authenticate, &self.authenticate),
            cache_control: cleared(c.cache_control, &self.cache_control),
            content_info: cleared(c.content_info, &self.content_info),
            date: cleared(c.date, &self.date),
            etag: cleared(c.etag, &self.etag),
            expires: cleared(c.expires, &self.expires),
            headers: cleared(c.headers, &self.headers),
            last_modified: cleared(c.last_modified, &self.last_modified),
            location: cleared(c.location, &self.location),
            proxy_authenticate: cleared(c.proxy_authenticate, &self.proxy_authenticate),
            retry_after: cleared(c.retry_after, &self.retry_after),
            server: cleared(c.server, &self.server),
            vary: cleared(c.vary, &self.vary),
            version: self.version,
            warning: cleared(c.warning, &self.warning),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn accepted_ranges(&self) -> Option<&AcceptableRanges> {
        self.accepted_ranges.as_ref()
    }

    pub fn age(&self) -> Option<TimeDelta> {
        self.age
    }

    pub fn allowed(&self) -> &ValueSet<Method> {
        &self.allowed
    }

    pub fn authenticate(&self) -> &ValueSet<Challenge> {
        &self.authenticate
    }

    pub fn cache_control(&self) -> &ValueSet<CacheDirective> {
        &self.cache_control
    }

    pub fn content_info(&self) -> &ContentInfo {
        &self.content_info
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn etag(&self) -> Option<&EntityTag> {
        self.etag.as_ref()
    }

    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    pub fn headers(&self) -> &HeaderFields {
        &self.headers
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn location(&self) -> Option<&Uri> {
        self.location.as_ref()
    }

    pub fn proxy_authenticate(&self) -> &ValueSet<Challenge> {
        &self.proxy_authenticate
    }

    pub fn retry_after(&self) -> Option<DateTime<Utc>> {
        self.retry_after
    }

    pub fn server(&self) -> Option<&Server> {
        self.server.as_ref()
    }

    pub fn vary(&self) -> Option<&Vary> {
        self.vary.as_ref()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Warnings in the order they were supplied.
    pub fn warning(&self) -> &[Warning] {
        &self.warning
    }

    // ── Presence accessors ─────────────────────────────────────────

    pub fn try_get_entity<'a>(&'a self, out: &mut Option<&'a T>) -> bool {
        try_get_ref(&self.entity, out)
    }

    pub fn try_get_accepted_ranges<'a>(&'a self, out: &mut Option<&'a AcceptableRanges>) -> bool {
        try_get_ref(&self.accepted_ranges, out)
    }

    /// Absent reads as `TimeDelta::MIN`.
    pub fn try_get_age(&self, out: &mut TimeDelta) -> bool {
        try_get(self.age, out)
    }

    /// Absent timestamps read as `DateTime::<Utc>::MIN_UTC`.
    pub fn try_get_date(&self, out: &mut DateTime<Utc>) -> bool {
        try_get(self.date, out)
    }

    pub fn try_get_etag<'a>(&'a self, out: &mut Option<&'a EntityTag>) -> bool {
        try_get_ref(&self.etag, out)
    }

    pub fn try_get_expires(&self, out: &mut DateTime<Utc>) -> bool {
        try_get(self.expires, out)
    }

    pub fn try_get_last_modified(&self, out: &mut DateTime<Utc>) -> bool {
        try_get(self.last_modified, out)
    }

    pub fn try_get_location<'a>(&'a self, out: &mut Option<&'a Uri>) -> bool {
        try_get_ref(&self.location, out)
    }

    pub fn try_get_retry_after(&self, out: &mut DateTime<Utc>) -> bool {
        try_get(self.retry_after, out)
    }

    pub fn try_get_server<'a>(&'a self, out: &mut Option<&'a Server>) -> bool {
        try_get_ref(&self.server, out)
    }

    pub fn try_get_vary<'a>(&'a self, out: &mut Option<&'a Vary>) -> bool {
        try_get_ref(&self.vary, out)
    }
}
