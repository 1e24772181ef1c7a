//! fhttp.toml configuration parser.
//!
//! The config holds message templates: default version, product tokens,
//! cache directives, and extension headers applied to every request or
//! response built from it. Defaults are turned into override sets, so a
//! template goes through the same update protocol as any caller.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use http::{HeaderName, HeaderValue, Version};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collections::ValueSet;
use crate::header::HeaderFields;
use crate::request::RequestOverrides;
use crate::response::ResponseOverrides;
use crate::types::{CacheDirective, Product, Server, UserAgent};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub request: RequestDefaults,
    #[serde(default)]
    pub response: ResponseDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDefaults {
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_agent: Vec<ProductConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cache_control: Vec<DirectiveConfig>,
    /// Extension headers. Names are case-insensitive, so a name listed
    /// twice in different cases is rejected.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDefaults {
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server: Vec<ProductConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cache_control: Vec<DirectiveConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveConfig {
    pub name: String,
    pub value: Option<String>,
}

impl ModelConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        debug!(?path, "model config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a minimal fhttp.toml.
    pub fn scaffold() -> Self {
        ModelConfig {
            request: RequestDefaults {
                version: Some("HTTP/1.1".to_string()),
                user_agent: vec![ProductConfig {
                    name: "fhttp".to_string(),
                    version: Some(env!("CARGO_PKG_VERSION").to_string()),
                }],
                cache_control: Vec::new(),
                headers: BTreeMap::new(),
            },
            response: ResponseDefaults {
                version: Some("HTTP/1.1".to_string()),
                server: vec![ProductConfig {
                    name: "fhttp".to_string(),
                    version: None,
                }],
                cache_control: vec![DirectiveConfig {
                    name: "no-cache".to_string(),
                    value: None,
                }],
                headers: BTreeMap::new(),
            },
        }
    }

    /// Overrides that apply the request template.
    ///
    /// Empty lists and maps leave the corresponding field untouched.
    pub fn request_overrides(&self) -> anyhow::Result<RequestOverrides> {
        let defaults = &self.request;
        let mut overrides = RequestOverrides::new();
        overrides.version = defaults.version.as_deref().map(parse_version).transpose()?.into();
        overrides.user_agent = non_empty(&defaults.user_agent)
            .map(|products| UserAgent::new(products.iter().map(ProductConfig::to_product)))
            .into();
        overrides.cache_control = non_empty(&defaults.cache_control)
            .map(directive_set)
            .into();
        overrides.headers = header_fields(&defaults.headers)?.into();
        Ok(overrides)
    }

    /// Overrides that apply the response template.
    pub fn response_overrides(&self) -> anyhow::Result<ResponseOverrides> {
        let defaults = &self.response;
        let mut overrides = ResponseOverrides::new();
        overrides.version = defaults.version.as_deref().map(parse_version).transpose()?.into();
        overrides.server = non_empty(&defaults.server)
            .map(|products| Server::new(products.iter().map(ProductConfig::to_product)))
            .into();
        overrides.cache_control = non_empty(&defaults.cache_control)
            .map(directive_set)
            .into();
        overrides.headers = header_fields(&defaults.headers)?.into();
        Ok(overrides)
    }
}

impl ProductConfig {
    fn to_product(&self) -> Product {
        Product {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

impl DirectiveConfig {
    fn to_directive(&self) -> CacheDirective {
        match &self.value {
            Some(value) => CacheDirective::with_value(&self.name, value.clone()),
            None => CacheDirective::new(&self.name),
        }
    }
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    if items.is_empty() { None } else { Some(items) }
}

fn directive_set(directives: &[DirectiveConfig]) -> ValueSet<CacheDirective> {
    directives.iter().map(DirectiveConfig::to_directive).collect()
}

fn header_fields(headers: &BTreeMap<String, String>) -> anyhow::Result<Option<HeaderFields>> {
    if headers.is_empty() {
        return Ok(None);
    }
    let mut fields = HeaderFields::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("invalid header name {name:?}"))?;
        if fields.contains(name.as_str()) {
            bail!("header {name} is configured more than once (names are case-insensitive)");
        }
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header {name}"))?;
        fields.insert(name, value);
    }
    Ok(Some(fields))
}

/// Map a protocol label (`HTTP/1.1`, `HTTP/2`, ...) to a version.
pub fn parse_version(label: &str) -> anyhow::Result<Version> {
    let version = match label.trim().to_ascii_uppercase().as_str() {
        "HTTP/0.9" => Version::HTTP_09,
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/1.1" => Version::HTTP_11,
        "HTTP/2" | "HTTP/2.0" => Version::HTTP_2,
        "HTTP/3" | "HTTP/3.0" => Version::HTTP_3,
        _ => bail!("unsupported HTTP version {label:?}"),
    };
    Ok(version)
}
