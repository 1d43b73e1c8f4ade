//! Route definitions

use axum::{
    Router,
    extract::OriginalUri,
    http::{HeaderValue, Method, uri::PathAndQuery},
    routing::get,
};
use infrastructure::ServerConfig;
use secrecy::SecretString;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::ApiError,
    handlers::{
        self,
        catalog::{self, Collection},
    },
    middleware::{ApiKeyAuthLayer, RequestIdLayer},
    state::AppState,
};

/// Create the main router with all routes and middleware
///
/// Layers, outermost first: request ID and logging, HTTP tracing, CORS. The
/// API key check is a route layer on the collection routers only, so an
/// unsupported method on a collection path gets the 404 without it.
pub fn create_router(state: AppState, api_key: SecretString, cors: CorsLayer) -> Router {
    let auth = ApiKeyAuthLayer::new(api_key);

    Router::new()
        .route("/", get(handlers::health::welcome))
        .route("/health", get(handlers::health::health_check))
        .nest(
            "/api/books",
            collection_routes::<domain::Book>().route_layer(auth.clone()),
        )
        .nest(
            "/api/products",
            collection_routes::<domain::Product>().route_layer(auth),
        )
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}

/// CRUD, search and stats routes for one collection
fn collection_routes<R: Collection>() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list::<R>).post(catalog::create::<R>))
        .route("/search", get(catalog::search::<R>))
        .route("/stats", get(catalog::stats::<R>))
        .route(
            "/{id}",
            get(catalog::get_one::<R>)
                .put(catalog::update::<R>)
                .delete(catalog::delete::<R>),
        )
        .method_not_allowed_fallback(route_not_found)
}

/// CORS policy: any origin when none are configured
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    }
}

/// 404 for unknown paths and for methods a known path does not serve
///
/// Reports the request target as sent (path and query), never the scheme or
/// authority of an absolute-form URI.
async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    let target = uri.path_and_query().map_or("/", PathAndQuery::as_str);
    ApiError::NotFound(format!("Route {method} {target} not found"))
}
