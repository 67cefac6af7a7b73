#![deny(missing_docs)]

//! # WSDL Command
//!
//! Generates the WSDL contract described by a service manifest.

use crate::error::CliResult;
use crate::output::{render, write_document};
use std::path::PathBuf;
use url::Url;
use wsdlgen_core::ServiceManifest;

/// Arguments for the wsdl command.
#[derive(clap::Args, Debug, Clone)]
pub struct WsdlArgs {
    /// Path to the service manifest (.yaml/.yml or .json).
    #[clap(long, default_value = "service.yaml")]
    pub manifest: PathBuf,

    /// Base URL for SOAP addresses. Overrides the manifest's `base_url`.
    #[clap(long, env = "WSDLGEN_BASE_URL")]
    pub base_url: Option<Url>,

    /// Output path for the WSDL. Prints to stdout if not provided.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Indent the generated XML.
    #[clap(long)]
    pub pretty: bool,
}

/// Executes the WSDL generation.
pub fn execute(args: &WsdlArgs) -> CliResult<()> {
    let manifest = ServiceManifest::from_path(&args.manifest)?;
    let registry = manifest.load_models()?;
    let service = manifest.resolve(&registry, args.base_url.as_ref())?;

    tracing::info!(
        service = %service.name,
        operations = service.operations.len(),
        models = service.models().len(),
        "Generating WSDL"
    );

    let wsdl = service.to_wsdl();
    write_document(&render(&wsdl, args.pretty)?, args.output.as_deref())
}
