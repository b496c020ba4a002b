//! Audio file metadata service: CRUD over songs, podcasts and audiobooks on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod registry;
pub mod response;
pub mod routes;
pub mod service;
pub mod session;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use model::{AudioFile, AudioFileType, AudioMetadata, Page};
pub use routes::{app, audio_routes, common_routes, docs_routes, ApiDoc};
pub use session::{AudioSession, PgSessionSource, SessionSource};
pub use state::AppState;
pub use store::{connect_pool, ensure_database_exists};
