//! Endpoint model: configuration → canonical endpoint → OpenAPI path item.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::openapi::{Content, Method, Operation, PathItem, RequestBody, Response, Responses};
use crate::types::{self, TValue};

pub const SUCCESS_DESCRIPTION: &str = "Success";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Endpoint path; always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiPath(String);

/// Declared error code; non-empty and uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ErrorCode(String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Name of the function that serializes each streamed response value.
    pub serializer_name: String,
}

/// Partially specified endpoint, as written by the API author.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointConfig {
    pub path: ApiPath,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub method: Option<Method>,
    #[serde(default)]
    pub request: Option<TValue>,
    #[serde(default)]
    pub response: Option<TValue>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorCode>>,
    #[serde(default)]
    pub stream: Option<Stream>,
}

/// Canonical endpoint. Built once by [`create_endpoint`], never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub description: String,
    pub method: Method,
    pub request: Option<TValue>,
    pub response: Option<TValue>,
    pub errors: Vec<ErrorCode>,
    pub stream: Option<Stream>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl EndpointConfig {
    pub fn new(path: ApiPath) -> Self {
        Self {
            path,
            description: None,
            method: None,
            request: None,
            response: None,
            errors: None,
            stream: None,
        }
    }
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }
    pub fn request(mut self, request: TValue) -> Self {
        self.request = Some(request);
        self
    }
    pub fn response(mut self, response: TValue) -> Self {
        self.response = Some(response);
        self
    }
    pub fn errors(mut self, errors: impl IntoIterator<Item = ErrorCode>) -> Self {
        self.errors = Some(errors.into_iter().collect());
        self
    }
    pub fn stream(mut self, serializer_name: impl Into<String>) -> Self {
        self.stream = Some(Stream { serializer_name: serializer_name.into() });
        self
    }
}

/// Fill in defaults: empty description, `post`, no errors.
pub fn create_endpoint(config: EndpointConfig) -> Endpoint {
    Endpoint {
        path: config.path.into(),
        description: config.description.unwrap_or_default(),
        method: config.method.unwrap_or_default(),
        request: config.request,
        response: config.response,
        errors: config.errors.unwrap_or_default(),
        stream: config.stream,
    }
}

impl From<EndpointConfig> for Endpoint {
    fn from(config: EndpointConfig) -> Self {
        create_endpoint(config)
    }
}

impl Endpoint {
    pub fn is_stream(&self) -> bool {
        self.stream.is_some()
    }

    pub fn serializer_name(&self) -> Option<&str> {
        self.stream.as_ref().map(|s| s.serializer_name.as_str())
    }

    /// Project into a path item holding one operation under this endpoint's method.
    ///
    /// Unlike the validator projection, a missing request or response leaves its
    /// section out entirely instead of describing an empty object.
    pub fn to_openapi(&self) -> PathItem {
        let operation = Operation {
            summary: self.description.clone(),
            description: self.description.clone(),
            operation_id: self.path.clone(),
            request_body: self.request.as_ref().map(|request| RequestBody {
                content: Content::json(types::open_api(request)),
            }),
            responses: Responses {
                ok: Response {
                    description: SUCCESS_DESCRIPTION.to_string(),
                    content: self.response.as_ref().map(|r| Content::json(types::open_api(r))),
                },
            },
        };
        PathItem::from([(self.method, operation)])
    }
}

/// True when any path string repeats, whatever the methods.
pub fn has_duplicates(endpoints: &[Endpoint]) -> bool {
    let paths = endpoints.iter().map(|e| e.path.as_str()).collect::<HashSet<_>>();
    paths.len() != endpoints.len()
}

/// Each path that occurs more than once, in order of first occurrence.
pub fn duplicate_paths(endpoints: &[Endpoint]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for endpoint in endpoints {
        let path = endpoint.path.as_str();
        if !seen.insert(path) && reported.insert(path) {
            out.push(path.to_string());
        }
    }
    out
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRAINED STRINGS
// ————————————————————————————————————————————————————————————————————————————

impl ApiPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiPath {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        if s.starts_with('/') {
            Ok(Self(s))
        } else {
            Err(Error::InvalidPath(s))
        }
    }
}

impl FromStr for ApiPath {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::try_from(s.to_string())
    }
}

impl From<ApiPath> for String {
    fn from(p: ApiPath) -> Self {
        p.0
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        if !s.is_empty() && s == s.to_uppercase() {
            Ok(Self(s))
        } else {
            Err(Error::InvalidErrorCode(s))
        }
    }
}

impl FromStr for ErrorCode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::try_from(s.to_string())
    }
}

impl From<ErrorCode> for String {
    fn from(c: ErrorCode) -> Self {
        c.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
