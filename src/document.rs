//! Textual OpenAPI document.
//!
//! `serde_yaml` never emits anchors or aliases, so repeated sub-schemas are written out
//! in full, and it errors instead of coercing values it cannot represent.

use crate::error::{Error, Result};
use crate::openapi::OpenApi;

pub fn to_yaml(document: &OpenApi) -> Result<String> {
    serde_yaml::to_string(document).map_err(|e| Error::serialize("OpenAPI document", e))
}

pub fn to_json(document: &OpenApi) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| Error::serialize("OpenAPI document", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::api_to_openapi;
    use crate::api::tests::ping_api;
    use crate::endpoint::{create_endpoint, EndpointConfig};
    use crate::types::*;

    #[test]
    fn yaml_round_trips_to_the_same_tree() {
        let doc = api_to_openapi(&ping_api());
        let text = to_yaml(&doc).unwrap();
        let parsed: serde_json::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, serde_json::to_value(&doc).unwrap());
        assert!(text.starts_with("openapi: "));
    }

    #[test]
    fn repeated_schemas_are_inlined() {
        let shared = object([("id", uuid())]);
        let mut api = ping_api();
        api.endpoints = vec![create_endpoint(
            EndpointConfig::new("/same".parse().unwrap())
                .request(shared.clone())
                .response(shared),
        )];
        let text = to_yaml(&api_to_openapi(&api)).unwrap();
        assert!(!text.contains('&') && !text.contains('*'));
        assert_eq!(text.matches("format: uuid").count(), 2);
    }

    #[test]
    fn json_form_is_pretty() {
        let text = to_json(&api_to_openapi(&ping_api())).unwrap();
        assert!(text.contains("\n  \"info\": {"));
    }
}
