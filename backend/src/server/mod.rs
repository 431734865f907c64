//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::middleware::{Cors, Trace};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ProfileService;
use backend::inbound::http::export::download_excel;
use backend::inbound::http::form::{index, submit};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::profiles::generate_person;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    profiles: web::Data<ProfileService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(profiles)
        .wrap(Cors)
        .wrap(Trace)
        .service(index)
        .service(submit)
        .service(generate_person)
        .service(download_excel)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        max_batch,
    } = config;
    let profiles = web::Data::new(ProfileService::new(max_batch));

    let server_profiles = profiles.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), server_profiles.clone())
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, max_batch, "profile server listening");
    health_state.run_self_check(&profiles);
    Ok(server)
}
