//! TypeScript source for per-endpoint validators and defaults.
//!
//! Output is consumed as source by downstream tooling, so identifiers, quoting and
//! ordering are part of the contract.

use indexmap::IndexMap;

use crate::api::Api;
use crate::endpoint::{Endpoint, ErrorCode};
use crate::types::{self, quote, validator};

pub const HEADER: &str = "// Generated by apigen. Do not edit.";
pub const IMPORTS: &str = r#"import { Schema as S } from "effect""#;
pub const EQUALS_TYPE: &str = "type Equals<A, B> = (<T>() => T extends A ? 1 : 2) extends (<T>() => T extends B ? 1 : 2) ? true : false";

pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    pub fn emit(&mut self, api: &Api) {
        self.line(0, HEADER);
        self.line(0, IMPORTS);
        self.blank();
        self.emit_endpoints(&api.endpoints);
        self.blank();
        self.emit_serializers(&api.endpoints);
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_endpoints(&mut self, endpoints: &[Endpoint]) {
        self.line(0, "export const endpoints = {");
        for e in endpoints {
            self.line(1, &format!("{}: {{", quote(&e.path)));
            self.line(2, &format!("method: {},", quote(e.method.as_str())));
            self.line(2, &format!("path: {},", quote(&e.path)));
            self.line(2, &format!("request: {},", types::schema(e.request.as_ref())));
            self.line(2, &format!("response: {},", types::schema(e.response.as_ref())));
            let response_default = types::default_value(e.response.as_ref());
            self.line(2, &format!("responseDefault: {response_default},"));
            self.line(2, &format!("errors: {},", errors_validator(&e.errors)));
            self.line(2, &format!("isStream: {},", e.is_stream()));
            let serializer = quote(e.serializer_name().unwrap_or(""));
            self.line(2, &format!("streamSerializer: {serializer},"));
            self.line(1, "},");
        }
        self.line(0, "} as const");
    }

    /// Serializer map plus a type-level check that every streaming endpoint's
    /// serializer agrees with its response type.
    fn emit_serializers(&mut self, endpoints: &[Endpoint]) {
        let streaming = endpoints
            .iter()
            .filter_map(|e| e.serializer_name().map(|name| (name, e)))
            .collect::<Vec<_>>();

        let mut distinct = IndexMap::new();
        for (name, e) in &streaming {
            distinct.entry(*name).or_insert(*e);
        }

        self.line(0, "export const serializers = {");
        for (name, e) in &distinct {
            self.line(1, &format!("{}: {},", quote(name), types::schema(e.response.as_ref())));
        }
        self.line(0, "} as const");
        self.blank();

        self.line(0, EQUALS_TYPE);
        self.blank();
        self.line(0, "export type SerializersMatchResponses = true");
        for (name, e) in &streaming {
            self.line(1, &format!(
                "& Equals<S.Schema.Type<typeof serializers[{}]>, S.Schema.Type<typeof endpoints[{}][\"response\"]>>",
                quote(name),
                quote(&e.path),
            ));
        }
        self.blank();
        self.line(0, "export const serializersMatchResponses: SerializersMatchResponses = true");
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate(api: &Api) -> String {
    let mut cg = Codegen::new();
    cg.emit(api);
    cg.into_string()
}

/// Literal union of the declared codes, or a validator that accepts nothing.
fn errors_validator(errors: &[ErrorCode]) -> String {
    if errors.is_empty() {
        "S.Never".to_string()
    } else {
        validator::literal(errors.iter().map(ErrorCode::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::ping_api;
    use crate::endpoint::{create_endpoint, EndpointConfig};
    use crate::types::*;

    #[test]
    fn ping_module() {
        let expected = r#"// Generated by apigen. Do not edit.
import { Schema as S } from "effect"

export const endpoints = {
  "/ping": {
    method: "post",
    path: "/ping",
    request: S.Struct({}),
    response: S.Struct({"ok": S.Boolean}),
    responseDefault: {"ok": false},
    errors: S.Never,
    isStream: false,
    streamSerializer: "",
  },
} as const

export const serializers = {
} as const

type Equals<A, B> = (<T>() => T extends A ? 1 : 2) extends (<T>() => T extends B ? 1 : 2) ? true : false

export type SerializersMatchResponses = true

export const serializersMatchResponses: SerializersMatchResponses = true
"#;
        assert_eq!(generate(&ping_api()), expected);
    }

    #[test]
    fn errors_stream_and_absent_response() {
        let mut api = ping_api();
        api.endpoints = vec![create_endpoint(
            EndpointConfig::new("/upload".parse().unwrap())
                .request(object([("file", file())]))
                .errors([
                    "TOO_LARGE".parse::<ErrorCode>().unwrap(),
                    "BAD_TYPE".parse::<ErrorCode>().unwrap(),
                ])
                .stream("progress"),
        )];
        let src = generate(&api);
        assert!(src.contains(r#"    request: S.Struct({"file": S.instanceOf(File)}),"#));
        assert!(src.contains("    response: S.Struct({}),"));
        assert!(src.contains("    responseDefault: {},"));
        assert!(src.contains(r#"    errors: S.Literal("TOO_LARGE", "BAD_TYPE"),"#));
        assert!(src.contains("    isStream: true,"));
        assert!(src.contains(r#"    streamSerializer: "progress","#));
    }

    #[test]
    fn shared_serializer_is_listed_once_and_checked_per_endpoint() {
        let mut api = ping_api();
        let streaming = |path: &str| {
            create_endpoint(
                EndpointConfig::new(path.parse().unwrap())
                    .response(array(int()))
                    .stream("numbers"),
            )
        };
        api.endpoints = vec![
            streaming("/a"),
            create_endpoint(EndpointConfig::new("/b".parse().unwrap()).response(string())),
            streaming("/c"),
        ];
        let src = generate(&api);
        assert_eq!(src.matches(r#"  "numbers": S.Array(S.Int),"#).count(), 1);
        assert!(src.contains(
            r#"  & Equals<S.Schema.Type<typeof serializers["numbers"]>, S.Schema.Type<typeof endpoints["/a"]["response"]>>"#
        ));
        assert!(src.contains(
            r#"  & Equals<S.Schema.Type<typeof serializers["numbers"]>, S.Schema.Type<typeof endpoints["/c"]["response"]>>"#
        ));
        assert!(!src.contains(r#"endpoints["/b"]"#));
    }

    #[test]
    fn endpoints_keep_declaration_order() {
        let mut api = ping_api();
        api.endpoints = ["/z", "/a"]
            .into_iter()
            .map(|p| create_endpoint(EndpointConfig::new(p.parse().unwrap())))
            .collect();
        let src = generate(&api);
        let z = src.find(r#""/z": {"#).unwrap();
        let a = src.find(r#""/a": {"#).unwrap();
        assert!(z < a);
    }
}
