//! API definition files (JSON or YAML).
//!
//! Deserialization errors carry the path of the offending field, e.g.
//! `at endpoints[1].errors[0] → Error code 'nope' must be a non-empty uppercase string`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::{Api, Exports};
use crate::endpoint::{create_endpoint, EndpointConfig};
use crate::error::{Error, Result};
use crate::openapi::Version;

/// On-disk form of an [`Api`] plus its export destinations.
///
/// Unknown keys are rejected at every level, so a misspelled `endpoints` fails
/// instead of loading an empty API.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: Version,
    pub endpoints: Vec<EndpointConfig>,
    /// Relative destinations resolve against the definition file's directory.
    #[serde(default)]
    pub exports: Exports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

impl Definition {
    pub fn into_parts(self) -> (Api, Exports) {
        let api = Api {
            title: self.title,
            description: self.description,
            version: self.version,
            endpoints: self.endpoints.into_iter().map(create_endpoint).collect(),
        };
        (api, self.exports)
    }
}

/// Read a definition file. Relative export paths come back resolved.
pub fn load(path: &Path) -> Result<(Api, Exports)> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let definition = parse::<Definition>(&source, Format::from_path(path)).map_err(|message| {
        Error::Definition { path: path.to_path_buf(), message }
    })?;
    let (api, exports) = definition.into_parts();
    tracing::debug!(path = %path.display(), endpoints = api.endpoints.len(), "loaded definition");
    let base = path.parent().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);
    Ok((api, exports.relative_to(&base)))
}

/// Deserialize with field-path context in error messages.
pub fn parse<T: DeserializeOwned>(src: &str, format: Format) -> std::result::Result<T, String> {
    match format {
        Format::Json => {
            let de = &mut serde_json::Deserializer::from_str(src);
            serde_path_to_error::deserialize::<_, T>(de).map_err(describe)
        }
        Format::Yaml => {
            let de = serde_yaml::Deserializer::from_str(src);
            serde_path_to_error::deserialize::<_, T>(de).map_err(describe)
        }
    }
}

fn describe<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> String {
    let path = err.path().to_string();
    format!("at {path} → {}", err.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    const PING_JSON: &str = r#"{
        "title": "T",
        "version": "1.0.0",
        "endpoints": [
            {
                "path": "/ping",
                "response": { "type": "object", "properties": { "ok": { "type": "bool" } } }
            }
        ],
        "exports": { "yaml": "out/openapi.yaml" }
    }"#;

    const PING_YAML: &str = "
title: T
version: 1.0.0
endpoints:
  - path: /ping
    response:
      type: object
      properties:
        ok:
          type: bool
exports:
  yaml: out/openapi.yaml
";

    #[test]
    fn json_and_yaml_agree() {
        let from_json = parse::<Definition>(PING_JSON, Format::Json).unwrap().into_parts();
        let from_yaml = parse::<Definition>(PING_YAML, Format::Yaml).unwrap().into_parts();
        assert_eq!(from_json, from_yaml);
        let (api, exports) = from_json;
        assert_eq!(api.endpoints[0].response, Some(object([("ok", bool())])));
        assert_eq!(exports.yaml, Some(PathBuf::from("out/openapi.yaml")));
    }

    #[test]
    fn errors_point_at_the_field() {
        let src = r#"{
            "title": "T",
            "version": "1.0.0",
            "endpoints": [ { "path": "/a" }, { "path": "/b", "errors": ["nope"] } ]
        }"#;
        let err = parse::<Definition>(src, Format::Json).unwrap_err();
        assert!(err.starts_with("at endpoints[1].errors[0]"), "{err}");
        assert!(err.contains("uppercase"), "{err}");
    }

    #[test]
    fn bad_version_is_rejected() {
        let src = r#"{ "title": "T", "version": "one", "endpoints": [] }"#;
        let err = parse::<Definition>(src, Format::Json).unwrap_err();
        assert!(err.contains("MAJOR.MINOR.PATCH"), "{err}");
    }

    #[test]
    fn endpoints_convert_with_defaults() {
        let src = r#"{
            "title": "T",
            "version": "0.1.0",
            "endpoints": [ { "path": "/a" }, { "path": "/b", "errors": ["NOPE"] } ]
        }"#;
        let (api, exports) = parse::<Definition>(src, Format::Json).unwrap().into_parts();
        assert_eq!(api.endpoints.len(), 2);
        assert_eq!(api.endpoints[0].description, "");
        assert_eq!(api.endpoints[1].errors[0].as_str(), "NOPE");
        assert!(exports.is_empty());
    }

    #[test]
    fn misspelled_top_level_key_is_rejected() {
        let src = r#"{
            "title": "T",
            "version": "1.0.0",
            "endpoint": [ { "path": "/a" }, { "path": "/a" } ]
        }"#;
        let err = parse::<Definition>(src, Format::Json).unwrap_err();
        assert!(err.contains("unknown field `endpoint`"), "{err}");

        let src = r#"{ "title": "T", "version": "1.0.0", "endpoints": [], "exprots": {} }"#;
        let err = parse::<Definition>(src, Format::Json).unwrap_err();
        assert!(err.contains("unknown field `exprots`"), "{err}");
    }

    #[test]
    fn unknown_key_inside_a_value_is_reported_with_its_location() {
        let src = "
title: T
version: 1.0.0
endpoints:
  - path: /a
    response:
      type: array
      itms: { type: int }
";
        let err = parse::<Definition>(src, Format::Yaml).unwrap_err();
        assert!(err.starts_with("at endpoints[0].response"), "{err}");
        assert!(err.contains("itms"), "{err}");

        let src = r#"{
            "title": "T",
            "version": "1.0.0",
            "endpoints": [ { "path": "/a", "response": { "type": "int", "minItems": 3 } } ]
        }"#;
        let err = parse::<Definition>(src, Format::Json).unwrap_err();
        assert!(err.starts_with("at endpoints[0].response"), "{err}");
        assert!(err.contains("minItems"), "{err}");
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("api.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("api")), Format::Json);
    }
}
