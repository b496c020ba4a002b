//! In-memory session source and request helpers shared by the API tests.

#![allow(dead_code)]

use async_trait::async_trait;
use audiofile_service::{
    app, AppState, AudioFile, AudioFileType, AudioMetadata, AudioSession, Page, SessionSource, StoreError,
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Tables = HashMap<AudioFileType, BTreeMap<i32, AudioFile>>;

/// Sessions work on a snapshot of the shared tables; commit publishes it.
#[derive(Clone, Default)]
pub struct MemorySource {
    tables: Arc<Mutex<Tables>>,
    pub storage_calls: Arc<AtomicUsize>,
    pub opened: Arc<AtomicUsize>,
    pub commits: Arc<AtomicUsize>,
    pub unavailable: Arc<AtomicBool>,
}

impl MemorySource {
    pub fn rows(&self, kind: AudioFileType) -> Vec<AudioFile> {
        let tables = self.tables.lock().unwrap();
        tables.get(&kind).map(|t| t.values().cloned().collect()).unwrap_or_default()
    }

    pub fn storage_calls(&self) -> usize {
        self.storage_calls.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionSource for MemorySource {
    async fn open(&self) -> Result<Box<dyn AudioSession>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Db(sqlx::Error::PoolTimedOut));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        let working = self.tables.lock().unwrap().clone();
        Ok(Box::new(MemorySession {
            working,
            source: self.clone(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

struct MemorySession {
    working: Tables,
    source: MemorySource,
}

impl MemorySession {
    fn table(&mut self, kind: AudioFileType) -> &mut BTreeMap<i32, AudioFile> {
        self.source.storage_calls.fetch_add(1, Ordering::SeqCst);
        self.working.entry(kind).or_default()
    }
}

#[async_trait]
impl AudioSession for MemorySession {
    async fn get_one(&mut self, kind: AudioFileType, id: i32) -> Result<AudioFile, StoreError> {
        self.table(kind)
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind, id })
    }

    async fn get_many(&mut self, kind: AudioFileType, page: Page) -> Result<Vec<AudioFile>, StoreError> {
        Ok(self
            .table(kind)
            .values()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&mut self, metadata: &AudioMetadata) -> Result<AudioFile, StoreError> {
        let (kind, id) = (metadata.kind(), metadata.id());
        let table = self.table(kind);
        if table.contains_key(&id) {
            return Err(StoreError::Conflict { kind, id });
        }
        let row = AudioFile::from_metadata(metadata.clone(), Utc::now());
        table.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&mut self, id: i32, metadata: &AudioMetadata) -> Result<(), StoreError> {
        let kind = metadata.kind();
        let row = self
            .table(kind)
            .get_mut(&id)
            .ok_or(StoreError::NotFound { kind, id })?;
        *row = AudioFile::from_metadata(metadata.clone(), row.uploaded_time());
        Ok(())
    }

    async fn delete(&mut self, kind: AudioFileType, id: i32) -> Result<(), StoreError> {
        self.table(kind)
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { kind, id })
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        *self.source.tables.lock().unwrap() = self.working;
        self.source.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_app() -> (Router, MemorySource) {
    let source = MemorySource::default();
    let router = app(AppState::new(source.clone()), 64 * 1024);
    (router, source)
}

/// Send one request; returns the status and the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}
