//! Per-request session scope: commit or roll back after the handler.

use crate::error::AppError;
use crate::extractors::DbSession;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Installs a lazily opened session for the request and releases it on every
/// exit path. Writes are committed only when the handler answered 2xx;
/// otherwise the session is dropped, which rolls the transaction back.
pub async fn session_scope(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let handle = DbSession::new(state.sessions.clone());
    request.extensions_mut().insert(handle.clone());

    let response = next.run(request).await;

    let session = match handle.into_inner() {
        Ok(Some(session)) => session,
        Ok(None) => return response,
        Err(_) => {
            tracing::error!("session still shared after handler returned, rolling back");
            if response.status().is_success() {
                return AppError::Internal("session outlived its request; changes were discarded".into())
                    .into_response();
            }
            return response;
        }
    };
    if !response.status().is_success() {
        tracing::debug!(status = %response.status(), "rolling back");
        return response;
    }
    match session.commit().await {
        Ok(()) => response,
        Err(e) => AppError::from(e).into_response(),
    }
}
