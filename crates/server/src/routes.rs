pub mod members;

use axum::{
    http::Method,
    routing::{delete, get, post, put, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, Welcome};

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Backend reachable")))]
pub async fn home() -> Json<Welcome> {
    Json(Welcome { status: "success", message: "Backend connected successfully" })
}

async fn not_found() -> JsonApiError {
    JsonApiError::not_found("Not found")
}

/// Route that answers 405 with a JSON body for any verb other than `method`.
fn only(method: Method, route: MethodRouter<ServerState>) -> MethodRouter<ServerState> {
    route.fallback(move || {
        let method = method.clone();
        async move { JsonApiError::method_not_allowed(method.as_str()) }
    })
}

/// Build the full application router: membership API, health and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/add/", only(Method::POST, post(members::add_member)))
        .route("/list/", only(Method::GET, get(members::list_members)))
        .route("/edit/:id/", only(Method::PUT, put(members::edit_member)))
        .route("/delete/:id/", only(Method::DELETE, delete(members::delete_member)))
        .route("/expired/", only(Method::GET, get(members::expired_members)))
        .route("/dashboard/", only(Method::GET, get(members::dashboard_counts)))
        .route("/members/search/", only(Method::GET, get(members::search_members)));

    let public = Router::new()
        .route("/", get(home))
        .route("/health", get(health));

    // Compose
    public
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
