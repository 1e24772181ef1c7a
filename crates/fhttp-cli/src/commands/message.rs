//! `fhttp request` / `fhttp response`: build a message from the config
//! template, apply command-line overrides and clears, print it as JSON.

use std::path::Path;

use anyhow::{Context, bail};
use fhttp_model::{
    ModelConfig, RequestClears, RequestMessage, RequestOverrides, ResponseClears,
    ResponseMessage, ResponseOverrides,
};
use http::{Method, StatusCode, Uri};
use tracing::info;

use crate::render;

pub struct RequestArgs<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub config: Option<&'a str>,
    pub body: Option<String>,
    pub referer: Option<&'a str>,
    pub clear: &'a [String],
}

pub struct ResponseArgs<'a> {
    pub status: u16,
    pub config: Option<&'a str>,
    pub body: Option<String>,
    pub location: Option<&'a str>,
    pub clear: &'a [String],
}

pub fn request(args: RequestArgs<'_>) -> anyhow::Result<()> {
    let message = build_request(args)?;
    println!("{}", serde_json::to_string_pretty(&render::request(&message))?);
    Ok(())
}

pub fn response(args: ResponseArgs<'_>) -> anyhow::Result<()> {
    let message = build_response(args)?;
    println!("{}", serde_json::to_string_pretty(&render::response(&message))?);
    Ok(())
}

fn build_request(args: RequestArgs<'_>) -> anyhow::Result<RequestMessage<String>> {
    let config = load_config(args.config)?;
    let method: Method = args
        .method
        .to_ascii_uppercase()
        .parse()
        .with_context(|| format!("invalid method {:?}", args.method))?;
    let uri: Uri = args
        .uri
        .parse()
        .with_context(|| format!("invalid uri {:?}", args.uri))?;

    let template = RequestMessage::<String>::new(method, uri).with(config.request_overrides()?);

    let mut overrides = RequestOverrides::new();
    overrides.referer = args.referer.map(parse_uri).transpose()?.into();
    let message = match args.body {
        Some(body) => template.with_entity(Some(body), overrides)?,
        None => template.with(overrides),
    };

    let clears = request_clears(args.clear)?;
    info!(id = %message.id(), "request built");
    Ok(message.without(clears))
}

fn build_response(args: ResponseArgs<'_>) -> anyhow::Result<ResponseMessage<String>> {
    let config = load_config(args.config)?;
    let status = StatusCode::from_u16(args.status)
        .with_context(|| format!("invalid status {}", args.status))?;

    let template = ResponseMessage::<String>::new(status).with(config.response_overrides()?);

    let mut overrides = ResponseOverrides::new();
    overrides.location = args.location.map(parse_uri).transpose()?.into();
    let message = match args.body {
        Some(body) => template.with_entity(Some(body), overrides)?,
        None => template.with(overrides),
    };

    let clears = response_clears(args.clear)?;
    info!(id = %message.id(), "response built");
    Ok(message.without(clears))
}

fn load_config(path: Option<&str>) -> anyhow::Result<ModelConfig> {
    match path {
        Some(path) => ModelConfig::from_file(Path::new(path)),
        None => Ok(ModelConfig::default()),
    }
}

fn parse_uri(raw: &str) -> anyhow::Result<Uri> {
    raw.parse().with_context(|| format!("invalid uri {raw:?}"))
}

fn request_clears(names: &[String]) -> anyhow::Result<RequestClears> {
    let mut clears = RequestClears::new();
    for name in names {
        if !clears.set_by_name(name) {
            bail!(
                "unknown request field {name:?} (clearable: {})",
                RequestClears::FIELDS.join(", ")
            );
        }
    }
    Ok(clears)
}

fn response_clears(names: &[String]) -> anyhow::Result<ResponseClears> {
    let mut clears = ResponseClears::new();
    for name in names {
        if !clears.set_by_name(name) {
            bail!(
                "unknown response field {name:?} (clearable: {})",
                ResponseClears::FIELDS.join(", ")
            );
        }
    }
    Ok(clears)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_args<'a>(clear: &'a [String]) -> RequestArgs<'a> {
        RequestArgs {
            method: "get",
            uri: "/items",
            config: None,
            body: None,
            referer: Some("/home"),
            clear,
        }
    }

    #[test]
    fn request_applies_overrides_then_clears() {
        let message = build_request(request_args(&[])).unwrap();
        assert_eq!(message.method(), &Method::GET);
        assert_eq!(message.referer().unwrap(), "/home");

        let cleared = build_request(request_args(&["referer".to_string()])).unwrap();
        assert!(cleared.referer().is_none());
    }

    #[test]
    fn unknown_clear_field_is_rejected() {
        let err = build_request(request_args(&["method".to_string()])).unwrap_err();
        assert!(err.to_string().contains("unknown request field"));
    }

    #[test]
    fn response_uses_config_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fhttp.toml");
        std::fs::write(
            &path,
            "[response]\nversion = \"HTTP/2\"\nserver = [{ name = \"edge\" }]\n",
        )
        .unwrap();

        let message = build_response(ResponseArgs {
            status: 201,
            config: path.to_str(),
            body: Some("created".to_string()),
            location: Some("/items/1"),
            clear: &["server".to_string()],
        })
        .unwrap();

        assert_eq!(message.status(), StatusCode::CREATED);
        assert_eq!(message.version(), http::Version::HTTP_2);
        assert_eq!(message.entity().map(String::as_str), Some("created"));
        assert_eq!(message.location().unwrap(), "/items/1");
        assert!(message.server().is_none());
    }

    #[test]
    fn invalid_status_is_an_error() {
        let result = build_response(ResponseArgs {
            status: 1000,
            config: None,
            body: None,
            location: None,
            clear: &[],
        });
        assert!(result.is_err());
    }
}
