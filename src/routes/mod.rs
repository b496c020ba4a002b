//! Router assembly.

pub mod audio;
pub mod common;
pub mod docs;
pub use audio::audio_routes;
pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: operational routes, OpenAPI document and audio CRUD.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(audio_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
