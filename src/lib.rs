//! Describe API endpoints once with a small schema algebra and derive an OpenAPI
//! document, TypeScript validators with example defaults, and a documentation page.
//!
//! Data flows one way: [`types`] → [`endpoint`] → [`api`] → emitters
//! ([`document`], [`codegen`], [`html`]).
pub mod api;
pub mod codegen;
pub mod definition;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod html;
pub mod openapi;
pub mod types;

pub use api::{api_to_openapi, create_api, Api, Artifact, ArtifactKind, Exports};
pub use endpoint::{create_endpoint, has_duplicates, Endpoint, EndpointConfig};
pub use error::{Error, Result};
pub use types::TValue;
