//! OpenAPI 3.0 document types, limited to what apigen emits.
//!
//! Optional sections are `Option`s skipped on serialization so that an absent request
//! or response produces no key at all rather than an empty schema.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const OPENAPI_VERSION: &str = "3.0.0";
pub const JSON_CONTENT_TYPE: &str = "application/json";

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApi {
    pub openapi: &'static str,
    pub info: Info,
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: Version,
}

/// Operations available at one path, keyed by method.
pub type PathItem = IndexMap<Method, Operation>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: String,
    pub description: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: Responses,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub content: Content,
}

/// Every operation answers with a single `200`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Responses {
    #[serde(rename = "200")]
    pub ok: Response,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// Media-type map; apigen only speaks JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    #[serde(rename = "application/json")]
    pub json: MediaType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Type,
}

impl Content {
    pub fn json(schema: Type) -> Self {
        Self { json: MediaType { schema } }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE DESCRIPTIONS
// ————————————————————————————————————————————————————————————————————————————

/// JSON-Schema-like type description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Type {
    Boolean,
    Integer,
    Number,
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
        #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
        enum_: Option<Vec<String>>,
    },
    Array {
        items: Box<Type>,
        #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
        min_items: Option<u32>,
    },
    Object {
        properties: IndexMap<String, Type>,
        required: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    Uuid,
    Binary,
}

// ————————————————————————————————————————————————————————————————————————————
// METHOD
// ————————————————————————————————————————————————————————————————————————————

/// HTTP methods an endpoint may use. Only `post` exists for now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Post => "post",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VERSION
// ————————————————————————————————————————————————————————————————————————————

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern compiles")
});

/// A `MAJOR.MINOR.PATCH` version string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Version {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for Version {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        if VERSION_RE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(Error::InvalidVersion(s))
        }
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn version_shape() {
        assert!("1.0.0".parse::<Version>().is_ok());
        assert!("10.20.300".parse::<Version>().is_ok());
        assert!(matches!("1.0".parse::<Version>(), Err(Error::InvalidVersion(_))));
        assert!("v1.0.0".parse::<Version>().is_err());
        assert!("1.0.0-beta".parse::<Version>().is_err());
    }

    #[test]
    fn method_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Method::Post).unwrap(), json!("post"));
        assert_eq!(Method::default(), Method::Post);
        assert!(serde_json::from_value::<Method>(json!("get")).is_err());
    }

    #[test]
    fn type_tags_and_optional_fields() {
        let t = Type::Array {
            items: Box::new(Type::String { format: Some(StringFormat::Uuid), enum_: None }),
            min_items: None,
        };
        assert_eq!(serde_json::to_value(&t).unwrap(), json!({
            "type": "array",
            "items": { "type": "string", "format": "uuid" }
        }));
        assert_eq!(serde_json::to_value(Type::Boolean).unwrap(), json!({ "type": "boolean" }));
    }

    #[test]
    fn response_without_content_has_no_content_key() {
        let r = Responses {
            ok: Response { description: "Success".into(), content: None },
        };
        assert_eq!(serde_json::to_value(&r).unwrap(), json!({
            "200": { "description": "Success" }
        }));
    }
}
