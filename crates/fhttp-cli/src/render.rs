//! JSON rendering of message values.
//!
//! Everything is read through accessors; optional fields are emitted only
//! when their `try_get_*` reports presence. Set-valued fields are sorted so
//! output is stable across runs.

use chrono::{DateTime, TimeDelta, Utc};
use fhttp_model::{
    AcceptableRanges, ByteContentRange, CacheDirective, Challenge, ChallengeData, ContentInfo,
    ContentRange, EntityTag, HeaderFields, MediaType, Product, RangeUnit, RequestMessage,
    ResponseMessage, ValueSet, Vary,
};
use serde_json::{Map, Value, json};

pub fn request(message: &RequestMessage<String>) -> Value {
    let mut out = Map::new();
    out.insert("id".into(), json!(message.id().to_string()));
    out.insert("method".into(), json!(message.method().as_str()));
    out.insert("uri".into(), json!(message.uri().to_string()));
    out.insert("version".into(), json!(format!("{:?}", message.version())));

    let mut entity = None;
    if message.try_get_entity(&mut entity) {
        out.insert("entity".into(), json!(entity));
    }
    let mut challenge = None;
    if message.try_get_authorization(&mut challenge) {
        out.insert("authorization".into(), challenge_json(challenge));
    }
    if message.try_get_proxy_authorization(&mut challenge) {
        out.insert("proxy_authorization".into(), challenge_json(challenge));
    }
    let mut referer = None;
    if message.try_get_referer(&mut referer) {
        out.insert("referer".into(), json!(referer.map(ToString::to_string)));
    }
    let mut user_agent = None;
    if message.try_get_user_agent(&mut user_agent) {
        let products = user_agent.map(|ua| products(ua.products()));
        out.insert("user_agent".into(), json!(products));
    }
    if message.expect_continue() {
        out.insert("expect_continue".into(), json!(true));
    }

    insert_directives(&mut out, "cache_control", message.cache_control());
    insert_directives(&mut out, "pragma", message.pragma());
    insert_headers(&mut out, message.headers());
    insert_content(&mut out, message.content_info());
    Value::Object(out)
}

pub fn response(message: &ResponseMessage<String>) -> Value {
    let mut out = Map::new();
    out.insert("id".into(), json!(message.id().to_string()));
    out.insert("status".into(), json!(message.status().as_u16()));
    out.insert("version".into(), json!(format!("{:?}", message.version())));

    let mut entity = None;
    if message.try_get_entity(&mut entity) {
        out.insert("entity".into(), json!(entity));
    }
    let mut ranges = None;
    if message.try_get_accepted_ranges(&mut ranges) {
        out.insert("accepted_ranges".into(), ranges.map(ranges_json).unwrap_or(Value::Null));
    }
    let mut age = TimeDelta::zero();
    if message.try_get_age(&mut age) {
        out.insert("age".into(), json!(age.num_seconds()));
    }

    let mut when = DateTime::<Utc>::MIN_UTC;
    if message.try_get_date(&mut when) {
        out.insert("date".into(), json!(when.to_rfc3339()));
    }
    if message.try_get_expires(&mut when) {
        out.insert("expires".into(), json!(when.to_rfc3339()));
    }
    if message.try_get_last_modified(&mut when) {
        out.insert("last_modified".into(), json!(when.to_rfc3339()));
    }
    if message.try_get_retry_after(&mut when) {
        out.insert("retry_after".into(), json!(when.to_rfc3339()));
    }

    let mut etag = None;
    if message.try_get_etag(&mut etag) {
        out.insert("etag".into(), json!(etag.map(etag_string)));
    }
    let mut location = None;
    if message.try_get_location(&mut location) {
        out.insert("location".into(), json!(location.map(ToString::to_string)));
    }
    let mut server = None;
    if message.try_get_server(&mut server) {
        out.insert("server".into(), json!(server.map(|s| products(s.products()))));
    }
    let mut vary = None;
    if message.try_get_vary(&mut vary) {
        out.insert("vary".into(), vary.map(vary_json).unwrap_or(Value::Null));
    }

    if !message.allowed().is_empty() {
        out.insert(
            "allowed".into(),
            json!(sorted(message.allowed().iter().map(|m| m.as_str().to_string()))),
        );
    }
    for (key, set) in [
        ("authenticate", message.authenticate()),
        ("proxy_authenticate", message.proxy_authenticate()),
    ] {
        if !set.is_empty() {
            let mut challenges: Vec<Value> = set.iter().map(|c| challenge_json(Some(c))).collect();
            challenges.sort_by_key(|c| c.to_string());
            out.insert(key.into(), Value::Array(challenges));
        }
    }
    if !message.warning().is_empty() {
        let warnings: Vec<Value> = message
            .warning()
            .iter()
            .map(|w| {
                json!({
                    "code": w.code,
                    "agent": w.agent,
                    "text": w.text,
                    "date": w.date.map(|d| d.to_rfc3339()),
                })
            })
            .collect();
        out.insert("warning".into(), Value::Array(warnings));
    }

    insert_directives(&mut out, "cache_control", message.cache_control());
    insert_headers(&mut out, message.headers());
    insert_content(&mut out, message.content_info());
    Value::Object(out)
}

fn insert_content(out: &mut Map<String, Value>, info: &ContentInfo) {
    if info == &ContentInfo::none() {
        return;
    }
    let mut content = Map::new();
    let mut length = 0i64;
    if info.try_get_length(&mut length) {
        content.insert("length".into(), json!(length));
    }
    let mut media = None;
    if info.try_get_media_type(&mut media) {
        content.insert("media_type".into(), json!(media.map(media_string)));
    }
    let mut location = None;
    if info.try_get_location(&mut location) {
        content.insert("location".into(), json!(location.map(ToString::to_string)));
    }
    let mut range = None;
    if info.try_get_range(&mut range) {
        content.insert("range".into(), json!(range.map(range_string)));
    }
    if !info.encodings().is_empty() {
        let codings = sorted(info.encodings().iter().map(|c| c.as_str().to_string()));
        content.insert("encodings".into(), json!(codings));
    }
    if !info.languages().is_empty() {
        let tags = sorted(info.languages().iter().map(|t| t.as_str().to_string()));
        content.insert("languages".into(), json!(tags));
    }
    out.insert("content".into(), Value::Object(content));
}

fn insert_directives(out: &mut Map<String, Value>, key: &str, set: &ValueSet<CacheDirective>) {
    if !set.is_empty() {
        out.insert(key.into(), json!(sorted(set.iter().map(directive_string))));
    }
}

fn insert_headers(out: &mut Map<String, Value>, headers: &HeaderFields) {
    if headers.is_empty() {
        return;
    }
    let fields: Map<String, Value> = headers
        .iter()
        .map(|h| {
            let value = String::from_utf8_lossy(h.value.as_bytes()).into_owned();
            (h.name.as_str().to_string(), Value::String(value))
        })
        .collect();
    out.insert("headers".into(), Value::Object(fields));
}

fn sorted(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut items: Vec<String> = items.collect();
    items.sort();
    items
}

fn directive_string(directive: &CacheDirective) -> String {
    match directive.value() {
        Some(value) => format!("{}={}", directive.name(), value),
        None => directive.name().to_string(),
    }
}

fn products(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| match &p.version {
            Some(version) => format!("{}/{}", p.name, version),
            None => p.name.clone(),
        })
        .collect()
}

fn challenge_json(challenge: Option<&Challenge>) -> Value {
    let Some(challenge) = challenge else {
        return Value::Null;
    };
    match challenge.data() {
        ChallengeData::Token68(token) => json!({ "scheme": challenge.scheme(), "token": token }),
        ChallengeData::Parameters(params) => {
            json!({ "scheme": challenge.scheme(), "parameters": params })
        }
    }
}

fn etag_string(tag: &EntityTag) -> String {
    if tag.is_weak() {
        format!("W/\"{}\"", tag.tag())
    } else {
        format!("\"{}\"", tag.tag())
    }
}

fn media_string(media: &MediaType) -> String {
    let mut rendered = media.essence();
    if let Some(charset) = media.charset() {
        rendered.push_str(&format!("; charset={}", charset.as_str()));
    }
    for (name, value) in media.parameters() {
        rendered.push_str(&format!("; {name}={value}"));
    }
    rendered
}

fn range_string(range: &ContentRange) -> String {
    match range {
        ContentRange::Bytes(ByteContentRange::Satisfied { first, last, complete_length }) => {
            let complete = complete_length.map_or("*".to_string(), |n| n.to_string());
            format!("bytes {first}-{last}/{complete}")
        }
        ContentRange::Bytes(ByteContentRange::Unsatisfied { complete_length }) => {
            format!("bytes */{complete_length}")
        }
        ContentRange::Other(other) => format!("{} {}", other.unit, other.value),
    }
}

fn ranges_json(ranges: &AcceptableRanges) -> Value {
    match ranges {
        AcceptableRanges::None => json!("none"),
        AcceptableRanges::Units(units) => json!(sorted(units.iter().map(|unit| match unit {
            RangeUnit::Bytes => "bytes".to_string(),
            RangeUnit::Other(name) => name.clone(),
        }))),
    }
}

fn vary_json(vary: &Vary) -> Value {
    match vary {
        Vary::Any => json!("*"),
        Vary::Headers(names) => json!(sorted(names.iter().map(|n| n.as_str().to_string()))),
    }
}
