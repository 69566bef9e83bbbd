//! Minimal CLI: definition file → (generate | openapi | check)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use apigen::api::{api_to_openapi, create_api, Api, Exports};
use apigen::{definition, document};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// derive an OpenAPI document, TypeScript validators and a docs page from one API definition
#[derive(Parser, Debug)]
#[command(name = "apigen", version)]
pub struct CommandLineInterface {
    /// increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check the definition and write every configured artifact
    Generate(GenerateOut),
    /// print (or write) only the OpenAPI document
    Openapi(OpenApiOut),
    /// check the definition without writing anything
    Check(InputSettings),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// API definition file (.json, .yaml or .yml)
    #[arg(long, short)]
    input: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// OpenAPI YAML destination (overrides the definition's `exports.yaml`)
    #[arg(long)]
    yaml: Option<PathBuf>,

    /// TypeScript destination (overrides `exports.ts`)
    #[arg(long)]
    ts: Option<PathBuf>,

    /// documentation page destination (overrides `exports.html`)
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct OpenApiOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// emit pretty JSON instead of YAML
    #[arg(long, default_value_t = false)]
    json: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<(Api, Exports)> {
        definition::load(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn verbose(&self) -> u8 {
        self.verbose
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let (api, from_file) = target.input_settings.load()?;
                let from_flags = Exports {
                    yaml: target.yaml.clone(),
                    ts: target.ts.clone(),
                    html: target.html.clone(),
                };
                let exports = from_file.merge(from_flags);
                let written = create_api(&api, &exports)
                    .with_context(|| format!("generating artifacts for '{}'", api.title))?;
                if written.is_empty() {
                    println!("{} no destinations configured", "skipped".yellow());
                }
                for artifact in written {
                    println!(
                        "{} {:<4} {} ({} bytes)",
                        "wrote".green(),
                        artifact.kind,
                        artifact.path.display(),
                        artifact.bytes
                    );
                }
            }
            Command::Openapi(target) => {
                let (api, _) = target.input_settings.load()?;
                api.check()?;
                let openapi = api_to_openapi(&api);
                let text = if target.json {
                    document::to_json(&openapi)?
                } else {
                    document::to_yaml(&openapi)?
                };
                match target.out.as_ref() {
                    Some(out) => write_file(out, &text)?,
                    None => println!("{text}"),
                }
            }
            Command::Check(input_settings) => {
                let (api, _) = input_settings.load()?;
                api.check()?;
                println!(
                    "{} {} {} ({} endpoints)",
                    "ok".green(),
                    api.title,
                    api.version,
                    api.endpoints.len()
                );
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_file(out: &Path, text: &str) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))
}
