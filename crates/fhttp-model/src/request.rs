use http::{Method, Uri, Version};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::adapter::{cleared, try_get_ref};
use crate::collections::ValueSet;
use crate::conditions::{RequestPreconditions, RequestPreferences};
use crate::content::ContentInfo;
use crate::error::{ModelError, ModelResult};
use crate::header::HeaderFields;
use crate::types::{CacheDirective, Challenge, UserAgent};

/// An immutable HTTP request carrying an optional payload of type `T`.
///
/// Built once with [`RequestMessage::new`], then derived through
/// [`with`](RequestMessage::with), [`with_entity`](RequestMessage::with_entity),
/// [`without`](RequestMessage::without) and
/// [`without_entity`](RequestMessage::without_entity). Every derivation
/// returns a new value; the source is never touched.
///
/// The `id` is assigned at construction and survives every derivation
/// unless an override set carries a replacement explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMessage<T> {
    method: Method,
    uri: Uri,
    entity: Option<T>,
    id: Uuid,
    authorization: Option<Challenge>,
    cache_control: ValueSet<CacheDirective>,
    content_info: ContentInfo,
    expect_continue: bool,
    headers: HeaderFields,
    pragma: ValueSet<CacheDirective>,
    preconditions: RequestPreconditions,
    preferences: RequestPreferences,
    proxy_authorization: Option<Challenge>,
    referer: Option<Uri>,
    user_agent: Option<UserAgent>,
    version: Version,
}

overrides! {
    /// Replacement values for [`RequestMessage::with`] and
    /// [`RequestMessage::with_entity`].
    pub struct RequestOverrides {
        method: Method,
        uri: Uri,
        id: Uuid,
        authorization: Challenge,
        cache_control: ValueSet<CacheDirective>,
        content_info: ContentInfo,
        expect_continue: bool,
        headers: HeaderFields,
        pragma: ValueSet<CacheDirective>,
        preconditions: RequestPreconditions,
        preferences: RequestPreferences,
        proxy_authorization: Challenge,
        referer: Uri,
        user_agent: UserAgent,
        version: Version,
    }
}

clears! {
    /// Fields to reset in [`RequestMessage::without`] and
    /// [`RequestMessage::without_entity`].
    pub struct RequestClears {
        authorization,
        cache_control,
        content_info,
        headers,
        pragma,
        preconditions,
        preferences,
        proxy_authorization,
        referer,
        user_agent,
    }
}

impl<T> RequestMessage<T> {
    /// A request with no payload, a fresh id, HTTP/1.1, and every other
    /// field absent or empty.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            entity: None,
            id: Uuid::new_v4(),
            authorization: None,
            cache_control: ValueSet::new(),
            content_info: ContentInfo::none(),
            expect_continue: false,
            headers: HeaderFields::new(),
            pragma: ValueSet::new(),
            preconditions: RequestPreconditions::none(),
            preferences: RequestPreferences::none(),
            proxy_authorization: None,
            referer: None,
            user_agent: None,
            version: Version::HTTP_11,
        }
    }

    /// Derive a request with new metadata; the payload is carried over.
    pub fn with(&self, overrides: RequestOverrides) -> Self
    where
        T: Clone,
    {
        self.derive(self.entity.clone(), overrides)
    }

    /// Derive a request carrying `entity`, possibly of a new type.
    ///
    /// `None` is rejected with [`ModelError::InvalidArgument`]; use
    /// [`without_entity`](RequestMessage::without_entity) to drop a payload.
    pub fn with_entity<U>(
        &self,
        entity: Option<U>,
        overrides: RequestOverrides,
    ) -> ModelResult<RequestMessage<U>> {
        let Some(entity) = entity else {
            debug!(id = %self.id, "request payload replacement without a payload");
            return Err(ModelError::payload_required());
        };
        Ok(self.derive(Some(entity), overrides))
    }

    /// Derive a request with the flagged fields reset; the payload is kept.
    pub fn without(&self, clears: RequestClears) -> Self
    where
        T: Clone,
    {
        self.strip(self.entity.clone(), clears)
    }

    /// Derive a request with the flagged fields reset and no payload.
    pub fn without_entity<U>(&self, clears: RequestClears) -> RequestMessage<U> {
        self.strip(None, clears)
    }

    fn derive<U>(&self, entity: Option<U>, o: RequestOverrides) -> RequestMessage<U> {
        trace!(id = %self.id, unchanged = o.is_empty(), "deriving request");
        RequestMessage {
            method: o.method.apply(&self.method),
            uri: o.uri.apply(&self.uri),
            entity,
            id: o.id.apply(&self.id),
            authorization: o.authorization.apply_optional(&self.authorization),
            cache_control: o.cache_control.apply(&self.cache_control),
            content_info: o.content_info.apply(&self.content_info),
            expect_continue: o.expect_continue.apply(&self.expect_continue),
            headers: o.headers.apply(&self.headers),
            pragma: o.pragma.apply(&self.pragma),
            preconditions: o.preconditions.apply(&self.preconditions),
            preferences: o.preferences.apply(&self.preferences),
            proxy_authorization: o.proxy_authorization.apply_optional(&self.proxy_authorization),
            referer: o.referer.apply_optional(&self.referer),
            user_agent: o.user_agent.apply_optional(&self.user_agent),
            version: o.version.apply(&self.version),
        }
    }

    fn strip<U>(&self, entity: Option<U>, c: RequestClears) -> RequestMessage<U> {
        trace!(id = %self.id, clears = ?c, "clearing request");
        RequestMessage {
            method: self.method.clone(),
            uri: self.uri.clone(),
            entity,
            id: self.id,
            authorization: cleared(c.authorization, &self.authorization),
            cache_control: cleared(c.cache_control, &self.cache_control),
            content_info: cleared(c.content_info, &self.content_info),
            expect_continue: self.expect_continue,
            headers: cleared(c.headers, &self.headers),
            pragma: cleared(c.pragma, &self.pragma),
            preconditions: cleared(c.preconditions, &self.preconditions),
            preferences: cleared(c.preferences, &self.preferences),
            proxy_authorization: cleared(c.proxy_authorization, &self.proxy_authorization),
            referer: cleared(c.referer, &self.referer),
            user_agent: cleared(c.user_agent, &self.user_agent),
            version: self.version,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn authorization(&self) -> Option<&Challenge> {
        self.authorization.as_ref()
    }

    pub fn cache_control(&self) -> &ValueSet<CacheDirective> {
        &self.cache_control
    }

    pub fn content_info(&self) -> &ContentInfo {
        &self.content_info
    }

    pub fn expect_continue(&self) -> bool {
        self.expect_continue
    }

    pub fn headers(&self) -> &HeaderFields {
        &self.headers
    }

    pub fn pragma(&self) -> &ValueSet<CacheDirective> {
        &self.pragma
    }

    pub fn preconditions(&self) -> &RequestPreconditions {
        &self.preconditions
    }

    pub fn preferences(&self) -> &RequestPreferences {
        &self.preferences
    }

    pub fn proxy_authorization(&self) -> Option<&Challenge> {
        self.proxy_authorization.as_ref()
    }

    pub fn referer(&self) -> Option<&Uri> {
        self.referer.as_ref()
    }

    pub fn user_agent(&self) -> Option<&UserAgent> {
        self.user_agent.as_ref()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    // ── Presence accessors ─────────────────────────────────────────

    pub fn try_get_entity<'a>(&'a self, out: &mut Option<&'a T>) -> bool {
        try_get_ref(&self.entity, out)
    }

    pub fn try_get_authorization<'a>(&'a self, out: &mut Option<&'a Challenge>) -> bool {
        try_get_ref(&self.authorization, out)
    }

    pub fn try_get_proxy_authorization<'a>(&'a self, out: &mut Option<&'a Challenge>) -> bool {
        try_get_ref(&self.proxy_authorization, out)
    }

    pub fn try_get_referer<'a>(&'a self, out: &mut Option<&'a Uri>) -> bool {
        try_get_ref(&self.referer, out)
    }

    pub fn try_get_user_agent<'a>(&'a self, out: &mut Option<&'a UserAgent>) -> bool {
        try_get_ref(&self.user_agent, out)
    }
}
