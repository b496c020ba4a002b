//! Database sessions: one transaction per request, released on drop.

use crate::error::StoreError;
use crate::model::{AudioFile, AudioFileType, AudioMetadata, Page};
use crate::service::CrudService;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

/// Storage operations available inside one request. Dropping a session
/// without [`AudioSession::commit`] discards its writes.
#[async_trait]
pub trait AudioSession: Send {
    async fn get_one(&mut self, kind: AudioFileType, id: i32) -> Result<AudioFile, StoreError>;

    async fn get_many(&mut self, kind: AudioFileType, page: Page) -> Result<Vec<AudioFile>, StoreError>;

    async fn create(&mut self, metadata: &AudioMetadata) -> Result<AudioFile, StoreError>;

    /// Replace every mutable field of the `metadata.kind()` record at `id`.
    async fn update(&mut self, id: i32, metadata: &AudioMetadata) -> Result<(), StoreError>;

    async fn delete(&mut self, kind: AudioFileType, id: i32) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Opens sessions; shared by all requests.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn open(&self) -> Result<Box<dyn AudioSession>, StoreError>;

    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgSessionSource {
    pool: PgPool,
    schema: Arc<str>,
}

impl PgSessionSource {
    pub fn new(pool: PgPool, schema: impl Into<Arc<str>>) -> Self {
        PgSessionSource {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SessionSource for PgSessionSource {
    async fn open(&self) -> Result<Box<dyn AudioSession>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession {
            tx,
            schema: self.schema.clone(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// A pooled connection with an open transaction. Drop rolls back and returns
/// the connection to the pool.
pub struct PgSession {
    tx: Transaction<'static, Postgres>,
    schema: Arc<str>,
}

#[async_trait]
impl AudioSession for PgSession {
    async fn get_one(&mut self, kind: AudioFileType, id: i32) -> Result<AudioFile, StoreError> {
        CrudService::get_one(&mut *self.tx, &self.schema, kind, id).await
    }

    async fn get_many(&mut self, kind: AudioFileType, page: Page) -> Result<Vec<AudioFile>, StoreError> {
        CrudService::get_many(&mut *self.tx, &self.schema, kind, page).await
    }

    async fn create(&mut self, metadata: &AudioMetadata) -> Result<AudioFile, StoreError> {
        CrudService::create(&mut *self.tx, &self.schema, metadata).await
    }

    async fn update(&mut self, id: i32, metadata: &AudioMetadata) -> Result<(), StoreError> {
        CrudService::update(&mut *self.tx, &self.schema, id, metadata).await
    }

    async fn delete(&mut self, kind: AudioFileType, id: i32) -> Result<(), StoreError> {
        CrudService::delete(&mut *self.tx, &self.schema, kind, id).await
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
