//! Extract the request's database session, installed by the session middleware.

use crate::error::AppError;
use crate::session::{AudioSession, SessionSource};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMappedMutexGuard, OwnedMutexGuard};

struct SessionSlot {
    source: Arc<dyn SessionSource>,
    session: Arc<Mutex<Option<Box<dyn AudioSession>>>>,
}

/// Shared handle to this request's session. The session is opened on the
/// first [`DbSession::lock`], so requests rejected before storage never
/// touch the database.
#[derive(Clone)]
pub struct DbSession(Arc<SessionSlot>);

impl DbSession {
    pub(crate) fn new(source: Arc<dyn SessionSource>) -> Self {
        DbSession(Arc::new(SessionSlot {
            source,
            session: Arc::new(Mutex::new(None)),
        }))
    }

    pub async fn lock(
        &self,
    ) -> Result<OwnedMappedMutexGuard<Option<Box<dyn AudioSession>>, Box<dyn AudioSession>>, AppError>
    {
        let mut guard = self.0.session.clone().lock_owned().await;
        if guard.is_none() {
            *guard = Some(self.0.source.open().await?);
        }
        OwnedMutexGuard::try_map(guard, |slot| slot.as_mut())
            .map_err(|_| AppError::Internal("database session unavailable".into()))
    }

    /// Take the session back once the handler has finished.
    /// `Err` while any other handle is still alive; `Ok(None)` when the
    /// handler never opened one.
    pub(crate) fn into_inner(self) -> Result<Option<Box<dyn AudioSession>>, DbSession> {
        let slot = Arc::try_unwrap(self.0).map_err(DbSession)?;
        match Arc::try_unwrap(slot.session) {
            Ok(session) => Ok(session.into_inner()),
            Err(session) => Err(DbSession(Arc::new(SessionSlot {
                source: slot.source,
                session,
            }))),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DbSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DbSession>()
            .cloned()
            .ok_or_else(|| AppError::Internal("no database session for this route".into()))
    }
}
