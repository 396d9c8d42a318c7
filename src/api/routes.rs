//! HTTP API route definitions.

use std::any::Any;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use strum::IntoEnumIterator;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    first_user, health, index, info, last_name_count, list_users, metrics, user_count, AppState,
};
use crate::error::internal_error_response;
use crate::metrics::record_http_request;
use crate::users::UserQuery;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        // Status page
        .route("/", get(index))
        // Query routes
        .route("/info", get(info))
        .route("/user-count", get(user_count))
        .route("/last-name-count", get(last_name_count))
        .route("/first-user", get(first_user));

    for query in UserQuery::iter() {
        router = router.route(
            query.path(),
            get(move |State(state): State<AppState>| list_users(state, query)),
        );
    }

    router
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(catch_panic_layer()),
        )
        .with_state(state)
}

/// Turns a handler panic into the generic 500 body.
pub(crate) fn catch_panic_layer(
) -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    internal_error_response()
}

/// Records latency and status for every matched route.
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;
    record_http_request(start, &route, response.status().as_u16());
    response
}
