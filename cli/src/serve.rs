#![deny(missing_docs)]

//! # Serve Command
//!
//! Serves the WSDL over HTTP, answering `GET <path>?wsdl`. The SOAP addresses are
//! derived from each request's scheme, host and path, so the contract points back
//! at wherever it was fetched from.

use crate::error::{CliError, CliResult};
use actix_web::http::Method;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use std::path::PathBuf;
use url::Url;
use wsdlgen_core::{to_xml_string, AppError, ServiceDescription, ServiceManifest};

/// Arguments for the serve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the service manifest (.yaml/.yml or .json).
    #[clap(long, default_value = "service.yaml")]
    pub manifest: PathBuf,

    /// Address to listen on.
    #[clap(long, env = "WSDLGEN_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,
}

/// Shared, read-only server state.
pub struct ServeState {
    /// The service, resolved once at startup.
    pub service: ServiceDescription,
}

/// Loads the manifest and runs the HTTP server until interrupted.
pub fn execute(args: &ServeArgs) -> CliResult<()> {
    let manifest = ServiceManifest::from_path(&args.manifest)?;
    let registry = manifest.load_models()?;

    // Replaced per request; only needed when the manifest has no base_url.
    let startup_base = match manifest.base_url {
        Some(_) => None,
        None => Some(Url::parse(&format!("http://{}/", args.bind)).map_err(AppError::from)?),
    };
    let service = manifest.resolve(&registry, startup_base.as_ref())?;

    tracing::info!(
        service = %service.name,
        operations = service.operations.len(),
        bind = %args.bind,
        "Serving WSDL"
    );

    let state = web::Data::new(ServeState { service });
    let bind = args.bind.clone();

    actix_rt::System::new()
        .block_on(async move {
            HttpServer::new(move || {
                App::new()
                    .app_data(state.clone())
                    .default_service(web::route().to(describe))
            })
            .bind(bind.as_str())?
            .run()
            .await
        })
        .map_err(CliError::from)
}

/// Returns the WSDL for `?wsdl` GET requests, 404 otherwise.
pub async fn describe(req: HttpRequest, state: web::Data<ServeState>) -> HttpResponse {
    if req.method() != Method::GET {
        return HttpResponse::MethodNotAllowed().finish();
    }
    if !wants_wsdl(req.query_string()) {
        return HttpResponse::NotFound().finish();
    }

    let base_url = match request_base_url(&req) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, "Could not derive base URL from request");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let wsdl = state.service.clone().with_base_url(base_url).to_wsdl();
    match to_xml_string(&wsdl) {
        Ok(body) => {
            tracing::debug!(path = %req.path(), bytes = body.len(), "Served WSDL");
            HttpResponse::Ok()
                .content_type("text/xml; charset=utf-8")
                .body(body)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize WSDL");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Whether the query string carries a `wsdl` key (`?wsdl`, `?wsdl=`, `?a=1&wsdl`).
fn wants_wsdl(query: &str) -> bool {
    query
        .split('&')
        .any(|pair| pair.split('=').next().is_some_and(|key| key.eq_ignore_ascii_case("wsdl")))
}

/// Scheme, host and path of the request; query and fragment are left out.
fn request_base_url(req: &HttpRequest) -> Result<Url, AppError> {
    let info = req.connection_info();
    let raw = format!("{}://{}{}", info.scheme(), info.host(), req.path());
    Ok(Url::parse(&raw)?)
}
