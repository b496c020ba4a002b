//! Audio file routes. Every route here runs inside one database session.

use crate::handlers::audio::{create, delete as delete_handler, list, read, update};
use crate::middleware::session_scope;
use crate::state::AppState;
use axum::{middleware, routing::get, routing::post, Router};

pub fn audio_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(create))
        .route("/:audio_type", get(list))
        .route(
            "/:audio_type/:id",
            get(read).put(update).delete(delete_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, session_scope))
}
