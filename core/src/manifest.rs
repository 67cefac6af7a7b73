#![deny(missing_docs)]

//! # Service Manifest
//!
//! Configuration describing a service: its name, base address, documentation,
//! the Rust sources holding its models, and its operations.
//!
//! ```yaml
//! name: Calculator
//! base_url: http://localhost:8000/calculator
//! documentation: Simple arithmetic
//! models: [models.rs]
//! operations:
//!   Add: { request: AddRequest, response: AddResponse }
//!   Reset: { request: ResetRequest }
//! ```

use crate::error::{AppError, AppResult};
use crate::parser::extract_structs;
use crate::registry::ModelRegistry;
use crate::wsdl::{OperationModels, ServiceDescription};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

/// Text format of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// YAML
    Yaml,
    /// JSON
    Json,
}

impl ManifestFormat {
    /// `.yaml` / `.yml` are YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => ManifestFormat::Yaml,
            _ => ManifestFormat::Json,
        }
    }
}

/// Model names for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationEntry {
    /// Request model (Rust type name or wire tag).
    #[serde(default)]
    pub request: Option<String>,
    /// Response model (Rust type name or wire tag).
    #[serde(default)]
    pub response: Option<String>,
}

/// The deserialized manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceManifest {
    /// Service name.
    pub name: String,
    /// Base address; may be supplied at resolution time instead.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Free-text documentation.
    #[serde(default)]
    pub documentation: String,
    /// Rust source files or directories, relative to the manifest.
    #[serde(default)]
    pub models: Vec<PathBuf>,
    /// Operations in declaration order.
    #[serde(default)]
    pub operations: IndexMap<String, OperationEntry>,
}

impl ServiceManifest {
    /// Parses manifest text.
    pub fn parse(text: &str, format: ManifestFormat) -> AppResult<Self> {
        match format {
            ManifestFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| AppError::General(format!("Invalid YAML manifest: {}", e))),
            ManifestFormat::Json => serde_json::from_str(text)
                .map_err(|e| AppError::General(format!("Invalid JSON manifest: {}", e))),
        }
    }

    /// Reads a manifest file. Relative model paths are rebased onto the manifest's directory.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::General(format!(
                "Manifest file not found: {:?}",
                path
            )));
        }
        let text = fs::read_to_string(path)?;
        let mut manifest = Self::parse(&text, ManifestFormat::from_path(path))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        manifest.models = manifest
            .models
            .into_iter()
            .map(|p| if p.is_relative() { base_dir.join(p) } else { p })
            .collect();

        tracing::debug!(manifest = ?path, service = %manifest.name, "Loaded manifest");
        Ok(manifest)
    }

    /// Parses every `.rs` file under the configured model paths into one registry.
    pub fn load_models(&self) -> AppResult<ModelRegistry> {
        load_model_sources(&self.models)
    }

    /// Builds the service description.
    ///
    /// `base_url_override` wins over the manifest's `base_url`; one of them is required.
    pub fn resolve(
        &self,
        registry: &ModelRegistry,
        base_url_override: Option<&Url>,
    ) -> AppResult<ServiceDescription> {
        let base_url = match (base_url_override, &self.base_url) {
            (Some(url), _) => url.clone(),
            (None, Some(raw)) => Url::parse(raw)?,
            (None, None) => {
                return Err(AppError::General(format!(
                    "No base URL configured for service '{}'",
                    self.name
                )))
            }
        };

        let mut service = ServiceDescription::new(&self.name, base_url)
            .with_documentation(self.documentation.clone());

        for (operation, entry) in &self.operations {
            let models = OperationModels {
                request: entry
                    .request
                    .as_deref()
                    .map(|name| registry.require(name))
                    .transpose()?,
                response: entry
                    .response
                    .as_deref()
                    .map(|name| registry.require(name))
                    .transpose()?,
            };
            service = service.with_operation(operation.clone(), models);
        }

        Ok(service)
    }
}

/// Parses Rust sources (files, or directories walked for `.rs` files) into one registry.
///
/// All sources are resolved together, so models may reference structs in other files.
pub fn load_model_sources(paths: &[PathBuf]) -> AppResult<ModelRegistry> {
    let mut structs = Vec::new();
    for path in source_files(paths)? {
        let code = fs::read_to_string(&path)?;
        let found = extract_structs(&code)?;
        tracing::debug!(source = ?path, structs = found.len(), "Parsed model source");
        structs.extend(found);
    }
    ModelRegistry::from_structs(structs)
}

fn source_files(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        if !root.exists() {
            return Err(AppError::General(format!(
                "Model source not found: {:?}",
                root
            )));
        }
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "rs"))
            .collect();
        found.sort();
        files.extend(found);
    }
    Ok(files)
}
