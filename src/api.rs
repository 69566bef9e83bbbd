//! API aggregation, the duplicate-path gate, and artifact emission.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::endpoint::{self, Endpoint};
use crate::error::{Error, Result};
use crate::openapi::{Info, OpenApi, Version, OPENAPI_VERSION};
use crate::{codegen, document, html};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    pub title: String,
    pub description: Option<String>,
    pub version: Version,
    /// Paths must be unique; checked by [`create_api`] before anything is written.
    pub endpoints: Vec<Endpoint>,
}

/// Destinations for each artifact. A `None` skips that artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exports {
    #[serde(default)]
    pub yaml: Option<PathBuf>,
    #[serde(default)]
    pub ts: Option<PathBuf>,
    #[serde(default)]
    pub html: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Yaml,
    Ts,
    Html,
}

/// An artifact that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Api {
    /// Fails with [`Error::DuplicatePaths`] when two endpoints share a path.
    pub fn check(&self) -> Result<()> {
        if endpoint::has_duplicates(&self.endpoints) {
            return Err(Error::DuplicatePaths { paths: endpoint::duplicate_paths(&self.endpoints) });
        }
        Ok(())
    }
}

impl Exports {
    pub fn is_empty(&self) -> bool {
        self.yaml.is_none() && self.ts.is_none() && self.html.is_none()
    }

    /// Destinations set in `other` replace ours.
    pub fn merge(self, other: Exports) -> Exports {
        Exports {
            yaml: other.yaml.or(self.yaml),
            ts: other.ts.or(self.ts),
            html: other.html.or(self.html),
        }
    }

    /// Resolve relative destinations against `base`.
    pub fn relative_to(self, base: &Path) -> Exports {
        let resolve = |p: Option<PathBuf>| {
            p.map(|p| if p.is_relative() { base.join(p) } else { p })
        };
        Exports {
            yaml: resolve(self.yaml),
            ts: resolve(self.ts),
            html: resolve(self.html),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ArtifactKind::Yaml => "yaml",
            ArtifactKind::Ts => "ts",
            ArtifactKind::Html => "html",
        })
    }
}

/// Fold every endpoint into one OpenAPI document keyed by path.
///
/// Performs no duplicate detection: a repeated path overwrites the earlier entry.
/// Callers go through [`create_api`] or [`Api::check`] first.
pub fn api_to_openapi(api: &Api) -> OpenApi {
    let paths = api
        .endpoints
        .iter()
        .map(|e| (e.path.clone(), e.to_openapi()))
        .collect::<indexmap::IndexMap<_, _>>();
    tracing::debug!(
        title = %api.title,
        endpoints = api.endpoints.len(),
        "assembled OpenAPI document"
    );
    OpenApi {
        openapi: OPENAPI_VERSION,
        info: Info {
            title: api.title.clone(),
            description: api.description.clone().unwrap_or_default(),
            version: api.version.clone(),
        },
        paths,
    }
}

/// Check the API, then emit every artifact that has a destination.
///
/// Nothing is written when paths collide. Emitters run in order (document, code,
/// page); if one fails, files written by earlier ones stay on disk.
pub fn create_api(api: &Api, exports: &Exports) -> Result<Vec<Artifact>> {
    api.check()?;

    if exports.is_empty() {
        tracing::warn!(title = %api.title, "no export destinations configured; nothing to emit");
        return Ok(Vec::new());
    }

    let openapi = api_to_openapi(api);
    let mut written = Vec::new();

    if let Some(path) = exports.yaml.as_ref() {
        let text = document::to_yaml(&openapi)?;
        written.push(write_artifact(ArtifactKind::Yaml, path, &text)?);
    }
    if let Some(path) = exports.ts.as_ref() {
        let text = codegen::generate(api);
        written.push(write_artifact(ArtifactKind::Ts, path, &text)?);
    }
    if let Some(path) = exports.html.as_ref() {
        let text = html::render(&openapi)?;
        written.push(write_artifact(ArtifactKind::Html, path, &text)?);
    }

    Ok(written)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_artifact(kind: ArtifactKind, path: &Path, text: &str) -> Result<Artifact> {
    let to_error = |source| Error::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, text).map_err(to_error)?;
    tracing::info!(%kind, path = %path.display(), bytes = text.len(), "wrote artifact");
    Ok(Artifact { kind, path: path.to_path_buf(), bytes: text.len() })
}
