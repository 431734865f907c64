//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the JSON API, the download endpoint, and the health
//! probes, plus schema wrappers for the error envelope and person record. The
//! form page is HTML and stays out of the document.
//!
//! The document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::health::{ProbeReport, ServicePhase};
use crate::inbound::http::schemas::{
    DownloadRequestSchema, ErrorCodeSchema, ErrorSchema, PersonSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Israeli profile generator API",
        description = "Synthetic Israeli person profiles as JSON or spreadsheets, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::profiles::generate_person,
        crate::inbound::http::export::download_excel,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PersonSchema,
        DownloadRequestSchema,
        ErrorSchema,
        ErrorCodeSchema,
        ProbeReport,
        ServicePhase
    )),
    tags(
        (name = "profiles", description = "Profile generation and export"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
