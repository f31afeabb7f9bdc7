//! HTTP application assembly
//!
//! Employee and health routers, Swagger UI and the outer tower layers.

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use rh_config::HttpConfig;

use crate::employee::api::{employees_router, EmployeesState};
use crate::employee::service::EmployeeService;
use crate::shared::health_api::{health_router, HealthState};

/// Routes plus the collected OpenAPI document, without outer layers
pub fn api_router(service: Arc<EmployeeService>) -> (Router, OpenApi) {
    let health_state = HealthState {
        employees: service.employees().clone(),
        audit: service.audit().clone(),
    };

    let (router, mut openapi) = OpenApiRouter::new()
        .nest("/Funcionario", employees_router(EmployeesState { service }))
        .nest("/health", health_router(health_state))
        .split_for_parts();

    openapi.info.title = "RH Employee API".to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi.info.description =
        Some("Employee records with an audit trail of every change".to_string());

    (router, openapi)
}

/// Full application: API routes, Swagger UI, tracing and CORS
pub fn build_app(service: Arc<EmployeeService>, http: &HttpConfig) -> Router {
    let (router, openapi) = api_router(service);

    Router::new()
        .merge(router)
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", openapi))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&http.cors_origins))
}

/// Any origin when none are configured, otherwise only the listed ones.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
