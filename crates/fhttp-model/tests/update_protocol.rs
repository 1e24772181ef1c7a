//! Integration tests for the copy-on-write update protocol.
//!
//! These exercise the public surface end to end:
//! - no-op updates and idempotent clears on every entity
//! - set/read and clear/read round trips through the presence accessors
//! - non-destructive derivation and payload retyping
//! - collection semantics (set dedup, ordered warnings, header mapping)

use chrono::{DateTime, TimeDelta, Utc};
use fhttp_model::{
    CacheDirective, Challenge, ContentCoding, ContentInfo, ContentInfoClears,
    ContentInfoOverrides, EntityTag, HeaderFields, LanguageTag, MediaType, ModelError,
    RequestClears, RequestMessage, RequestOverrides, ResponseClears, ResponseMessage,
    ResponseOverrides, ValueSet, Warning,
};
use http::{HeaderName, HeaderValue, Method, StatusCode, Uri};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn header(name: &str, value: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_bytes(name.as_bytes()).unwrap(),
        HeaderValue::from_static(value),
    )
}

fn populated_request() -> RequestMessage<i32> {
    RequestMessage::<()>::new(Method::POST, Uri::from_static("/orders"))
        .with_entity(
            Some(5),
            RequestOverrides::new()
                .authorization(Challenge::token68("Bearer", "abc"))
                .cache_control(ValueSet::from([CacheDirective::no_cache()]))
                .referer(Uri::from_static("/cart"))
                .headers(HeaderFields::from(vec![header("X-Trace", "1")]))
                .content_info(
                    ContentInfo::none()
                        .with(ContentInfoOverrides::new().media_type(MediaType::application_json())),
                ),
        )
        .unwrap()
}

fn populated_response() -> ResponseMessage<String> {
    ResponseMessage::<()>::new(StatusCode::OK)
        .with_entity(
            Some("hello".to_string()),
            ResponseOverrides::new()
                .age(TimeDelta::seconds(12))
                .date(at(1_000))
                .expires(at(2_000))
                .etag(EntityTag::weak("v7"))
                .location(Uri::from_static("/greeting"))
                .warning(vec![Warning::new(110, "edge", "Response is Stale")]),
        )
        .unwrap()
}

// ── No-op update / idempotent clear ─────────────────────────────────

#[test]
fn no_op_updates_are_structurally_equal() {
    let info = ContentInfo::none().with(ContentInfoOverrides::new().length(7));
    assert_eq!(info.with(ContentInfoOverrides::new()), info);

    let req = populated_request();
    assert_eq!(req.with(RequestOverrides::new()), req);
    assert_eq!(req.without(RequestClears::new()), req);

    let resp = populated_response();
    assert_eq!(resp.with(ResponseOverrides::new()), resp);
    assert_eq!(resp.without(ResponseClears::new()), resp);
}

#[test]
fn clearing_twice_equals_clearing_once() {
    let req = populated_request();
    let once = req.without(RequestClears::new().referer().headers());
    assert_eq!(once.without(RequestClears::new().referer().headers()), once);

    let resp = populated_response();
    let once = resp.without(ResponseClears::new().etag().warning());
    assert_eq!(once.without(ResponseClears::new().etag().warning()), once);

    let info = ContentInfo::none();
    let once = info.without(ContentInfoClears::new().length());
    assert_eq!(once.without(ContentInfoClears::new().length()), once);
    assert_eq!(once, info);
}

// ── Round trips ─────────────────────────────────────────────────────

#[test]
fn content_info_length_scenario() {
    let base = ContentInfo::none();
    let mut length = 0i64;
    let mut media = None;
    assert!(!base.try_get_length(&mut length));
    assert!(!base.try_get_media_type(&mut media));

    let sized = base.with(ContentInfoOverrides::new().length(42));
    assert!(sized.try_get_length(&mut length));
    assert_eq!(length, 42);

    assert!(!base.try_get_length(&mut length));
    assert_eq!(length, -1);

    let cleared = sized.without(ContentInfoClears::new().length());
    assert!(!cleared.try_get_length(&mut length));
    assert_eq!(length, -1);
}

#[test]
fn response_optional_fields_round_trip() {
    let resp = populated_response();

    let mut age = TimeDelta::zero();
    assert!(resp.try_get_age(&mut age));
    assert_eq!(age, TimeDelta::seconds(12));

    let mut when = Utc::now();
    assert!(resp.try_get_date(&mut when));
    assert_eq!(when, at(1_000));
    assert!(resp.try_get_expires(&mut when));
    assert_eq!(when, at(2_000));
    assert!(!resp.try_get_last_modified(&mut when));
    assert_eq!(when, DateTime::<Utc>::MIN_UTC);

    let bare = resp.without(ResponseClears::new().age().date().expires().location());
    assert!(!bare.try_get_age(&mut age));
    assert_eq!(age, TimeDelta::MIN);
    assert!(!bare.try_get_date(&mut when));
    assert!(!bare.try_get_expires(&mut when));

    let mut location = None;
    assert!(!bare.try_get_location(&mut location));
    assert!(location.is_none());

    let mut etag = None;
    assert!(bare.try_get_etag(&mut etag));
    assert_eq!(etag, Some(&EntityTag::weak("v7")));
}

#[test]
fn request_optional_fields_round_trip() {
    let req = populated_request();

    let mut auth = None;
    assert!(req.try_get_authorization(&mut auth));
    assert_eq!(auth.map(Challenge::scheme), Some("bearer"));

    let cleared = req.without(RequestClears::new().authorization().content_info());
    assert!(!cleared.try_get_authorization(&mut auth));
    assert!(auth.is_none());
    assert_eq!(cleared.content_info(), &ContentInfo::none());
}

// ── Non-destructive derivation ──────────────────────────────────────

#[test]
fn source_is_unaffected_by_derivation() {
    let req = populated_request();
    let snapshot = req.clone();

    let _ = req.with(RequestOverrides::new().method(Method::PUT).uri(Uri::from_static("/x")));
    let _ = req.without(RequestClears::all());
    let _ = req.with_entity(Some("other"), RequestOverrides::new()).unwrap();
    let _: RequestMessage<()> = req.without_entity(RequestClears::new());

    assert_eq!(req, snapshot);
    let mut referer = None;
    assert!(req.try_get_referer(&mut referer));
    assert_eq!(referer.unwrap(), "/cart");
}

// ── Payload ─────────────────────────────────────────────────────────

#[test]
fn payload_retype() {
    let bare: RequestMessage<()> = RequestMessage::new(Method::GET, Uri::from_static("/"));
    let original: RequestMessage<i32> = bare
        .with_entity(Some(5), RequestOverrides::new())
        .unwrap();

    let retyped: RequestMessage<String> = original
        .with_entity(Some("x".to_string()), RequestOverrides::new())
        .unwrap();

    let mut text = None;
    assert!(retyped.try_get_entity(&mut text));
    assert_eq!(text.map(String::as_str), Some("x"));
    assert_eq!(retyped.id(), original.id());
    assert_eq!(retyped.method(), original.method());

    let mut number = None;
    assert!(original.try_get_entity(&mut number));
    assert_eq!(number, Some(&5));
}

#[test]
fn payload_retype_applies_overrides() {
    let resp = populated_response();
    let bytes: ResponseMessage<Vec<u8>> = resp
        .with_entity(
            Some(b"hello".to_vec()),
            ResponseOverrides::new().status(StatusCode::CREATED),
        )
        .unwrap();

    assert_eq!(bytes.status(), StatusCode::CREATED);
    assert_eq!(bytes.etag(), resp.etag());
    assert_eq!(bytes.warning(), resp.warning());
}

#[test]
fn payload_replace_without_payload_fails() {
    let req = populated_request();
    assert_eq!(
        req.with_entity::<String>(None, RequestOverrides::new()),
        Err(ModelError::InvalidArgument("payload required"))
    );

    let resp = populated_response();
    assert_eq!(
        resp.with_entity::<String>(None, ResponseOverrides::new()),
        Err(ModelError::InvalidArgument("payload required"))
    );
}

#[test]
fn clearing_the_payload_retypes() {
    let resp = populated_response();
    let empty: ResponseMessage<u64> = resp.without_entity(ResponseClears::new().warning());

    let mut out = None;
    assert!(!empty.try_get_entity(&mut out));
    assert!(empty.warning().is_empty());
    assert_eq!(empty.date(), resp.date());
}

// ── Collections ─────────────────────────────────────────────────────

#[test]
fn cache_control_deduplicates_and_replaces() {
    let a = CacheDirective::no_cache();
    let b = CacheDirective::max_age(60);
    let req = populated_request()
        .with(RequestOverrides::new().cache_control(ValueSet::from([a.clone(), a.clone(), b.clone()])));

    assert_eq!(req.cache_control().len(), 2);
    assert_eq!(req.cache_control(), &ValueSet::from([b.clone(), a]));

    let replaced = req.with(RequestOverrides::new().cache_control(ValueSet::from([CacheDirective::no_store()])));
    assert_eq!(replaced.cache_control().len(), 1);
    assert!(!replaced.cache_control().contains(&b));
}

#[test]
fn warnings_preserve_supplied_order() {
    let w1 = Warning::new(110, "a", "first");
    let w2 = Warning::new(111, "b", "second");
    let resp = populated_response().with(ResponseOverrides::new().warning(vec![w1.clone(), w2.clone()]));

    let order: Vec<&str> = resp.warning().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(order, vec!["first", "second"]);
}

#[test]
fn headers_last_write_wins_and_replace_whole() {
    let fields = HeaderFields::from(vec![
        header("X-Mode", "a"),
        header("x-mode", "b"),
        header("X-Other", "o"),
    ]);
    let req = populated_request().with(RequestOverrides::new().headers(fields));
    assert_eq!(req.headers().len(), 2);
    assert_eq!(req.headers().get("X-MODE").unwrap(), "b");
    assert!(!req.headers().contains("x-trace"));
}

#[test]
fn content_info_sets_are_unordered() {
    let info = ContentInfo::none().with(
        ContentInfoOverrides::new()
            .encodings(ValueSet::from([ContentCoding::gzip(), ContentCoding::new("BR")]))
            .languages(ValueSet::from([LanguageTag::new("en"), LanguageTag::new("EN")])),
    );
    assert_eq!(
        info.encodings(),
        &ValueSet::from([ContentCoding::new("br"), ContentCoding::gzip()])
    );
    assert_eq!(info.languages().len(), 1);
}

// ── Concurrency ─────────────────────────────────────────────────────

#[test]
fn concurrent_derivations_share_an_immutable_source() {
    let resp = populated_response();

    std::thread::scope(|scope| {
        for code in [StatusCode::ACCEPTED, StatusCode::NOT_FOUND, StatusCode::GONE] {
            let source = &resp;
            scope.spawn(move || {
                let derived = source.with(ResponseOverrides::new().status(code));
                assert_eq!(derived.status(), code);
                assert_eq!(derived.id(), source.id());
            });
        }
    });

    assert_eq!(resp.status(), StatusCode::OK);
}
