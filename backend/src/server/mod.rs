//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

#[cfg(debug_assertions)]
use delivery::doc::ApiDoc;
use delivery::domain::RateLimiter;
use delivery::inbound::http::health::{HealthState, live, ready};
use delivery::inbound::http::json_config;
use delivery::inbound::http::orders::{get_order, list_orders};
use delivery::inbound::http::products::{cost_of_delivery, create_order};
use delivery::inbound::http::rate_limit::RateLimit;
use delivery::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    limiter: Arc<RateLimiter>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        limiter,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(RateLimit::new(limiter))
        .service(cost_of_delivery)
        .service(create_order)
        .service(list_orders)
        .service(get_order);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The visitor sweeper is spawned on the current runtime and stops once the
/// server, and with it the rate limiter, is dropped.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        request_timeout,
        shutdown_timeout,
        rate_limit,
        db_pool: _,
    } = config;

    let limiter = Arc::new(RateLimiter::new(rate_limit, Arc::new(DefaultClock)));
    // Detached; exits on its own once the last limiter handle is gone.
    drop(limiter.spawn_sweeper());

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            limiter: limiter.clone(),
        })
    })
    .client_request_timeout(request_timeout)
    .shutdown_timeout(shutdown_timeout.as_secs())
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
