use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{blog, system};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Mount point of the blog router
pub const BLOG_PREFIX: &str = "/api/v1/blog";

/// Full application router
pub fn app(state: AppState, request_logging: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Protected
        .nest(BLOG_PREFIX, blog_routes(state.clone()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Post routes, every one gated by the bearer-token middleware
pub fn blog_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(blog::create_post).put(blog::update_post))
        .route("/:id", get(blog::get_post))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
