#![deny(missing_docs)]

//! # XSD Command
//!
//! Generates a standalone XML Schema for models defined in Rust source files.

use crate::error::CliResult;
use crate::output::{render, write_document};
use std::path::PathBuf;
use std::sync::Arc;
use wsdlgen_core::{generate_schema, load_model_sources, Model, ModelSet};

/// Arguments for the xsd command.
#[derive(clap::Args, Debug, Clone)]
pub struct XsdArgs {
    /// Rust source file or directory containing the models. Repeatable.
    #[clap(long = "source", required = true)]
    pub sources: Vec<PathBuf>,

    /// Model to include, by type name or wire tag. Repeatable.
    /// Every parsed model is included when omitted.
    #[clap(long = "model")]
    pub models: Vec<String>,

    /// Output path for the schema. Prints to stdout if not provided.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Indent the generated XML.
    #[clap(long)]
    pub pretty: bool,
}

/// Executes the schema generation.
pub fn execute(args: &XsdArgs) -> CliResult<()> {
    let registry = load_model_sources(&args.sources)?;

    let selected: Vec<Arc<Model>> = if args.models.is_empty() {
        registry.models().cloned().collect()
    } else {
        args.models
            .iter()
            .map(|name| registry.require(name))
            .collect::<Result<_, _>>()?
    };
    let models: ModelSet = selected.into_iter().collect();
    tracing::info!(models = models.len(), "Generating schema");

    let schema = generate_schema(models.iter());
    write_document(&render(&schema, args.pretty)?, args.output.as_deref())
}
