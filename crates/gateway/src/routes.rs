//! Route configuration.

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    auth_routes, company_admin_routes, company_routes, health_routes, job_routes, session_routes,
    user_admin_routes, user_routes,
};
use crate::middleware::{admin_middleware, auth_middleware};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
///
/// Layers run outside-in: authentication resolves the principal before the
/// admin guard inspects it.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .merge(company_admin_routes())
        .merge(user_admin_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    let protected = Router::new()
        .merge(session_routes())
        .merge(job_routes())
        .merge(company_routes())
        .merge(user_routes())
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = cors_layer(state.config.server.cors_origin.as_deref());

    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", auth_routes().merge(protected))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Browsers must be allowed to read the rotated `Authorization` header.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let origin = match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([AUTHORIZATION])
}
