#![deny(missing_docs)]

//! # wsdlgen CLI
//!
//! Command Line Interface for generating SOAP service contracts from Rust models.
//!
//! Supported Commands:
//! - `xsd`: Rust models -> standalone XML Schema.
//! - `wsdl`: Service manifest -> WSDL 1.1 document.
//! - `serve`: Serves the WSDL at `GET <path>?wsdl` (feature `server`).

use clap::{Parser, Subcommand};

use crate::error::CliResult;
use crate::logging::init_cli_logger;

mod error;
mod logging;
mod output;
#[cfg(feature = "server")]
mod serve;
mod wsdl;
mod xsd;

#[derive(Parser, Debug)]
#[clap(author, version, about = "WSDL/XSD generator")]
struct Cli {
    /// Enable debug logging.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an XML Schema for Rust models.
    Xsd(xsd::XsdArgs),
    /// Generate the WSDL document described by a service manifest.
    Wsdl(wsdl::WsdlArgs),
    /// Serve the WSDL over HTTP.
    #[cfg(feature = "server")]
    Serve(serve::ServeArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    match &cli.command {
        Commands::Xsd(args) => xsd::execute(args)?,
        Commands::Wsdl(args) => wsdl::execute(args)?,
        #[cfg(feature = "server")]
        Commands::Serve(args) => serve::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_wsdl_command() {
        let cli = Cli::try_parse_from([
            "wsdlgen",
            "-v",
            "wsdl",
            "--manifest",
            "svc.yaml",
            "--base-url",
            "http://h/svc",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Wsdl(args) => {
                assert_eq!(args.manifest, std::path::PathBuf::from("svc.yaml"));
                assert_eq!(
                    args.base_url.map(|u| u.to_string()),
                    Some("http://h/svc".to_string())
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_xsd_requires_source() {
        assert!(Cli::try_parse_from(["wsdlgen", "xsd"]).is_err());
    }
}
