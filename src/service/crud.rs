//! Single-row CRUD against the audio tables, on a caller-owned connection.

use crate::error::StoreError;
use crate::model::{AudioFile, AudioFileType, AudioMetadata, Audiobook, Page, Podcast, Song};
use crate::sql::{self, QueryBuf};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

pub struct CrudService;

impl CrudService {
    pub async fn get_one(
        conn: &mut PgConnection,
        schema: &str,
        kind: AudioFileType,
        id: i32,
    ) -> Result<AudioFile, StoreError> {
        let q = sql::select_by_id(kind, id, schema);
        Self::fetch_optional(conn, kind, &q)
            .await?
            .ok_or(StoreError::NotFound { kind, id })
    }

    /// Page of rows ordered by id. An empty or short table yields a short page.
    pub async fn get_many(
        conn: &mut PgConnection,
        schema: &str,
        kind: AudioFileType,
        page: Page,
    ) -> Result<Vec<AudioFile>, StoreError> {
        let q = sql::select_page(kind, page, schema);
        Self::fetch_all(conn, kind, &q).await
    }

    /// Atomic insert; an existing id surfaces as [`StoreError::Conflict`] from the primary key.
    pub async fn create(
        conn: &mut PgConnection,
        schema: &str,
        metadata: &AudioMetadata,
    ) -> Result<AudioFile, StoreError> {
        let kind = metadata.kind();
        let id = metadata.id();
        let q = sql::insert(metadata, schema);
        match Self::fetch_optional(conn, kind, &q).await {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(StoreError::Db(sqlx::Error::RowNotFound)),
            Err(StoreError::Db(sqlx::Error::Database(e))) if e.is_unique_violation() => {
                tracing::warn!(%kind, id, "insert rejected: id exists");
                Err(StoreError::Conflict { kind, id })
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update(
        conn: &mut PgConnection,
        schema: &str,
        id: i32,
        metadata: &AudioMetadata,
    ) -> Result<(), StoreError> {
        let kind = metadata.kind();
        let q = sql::update(id, metadata, schema);
        match Self::execute(conn, &q).await? {
            0 => Err(StoreError::NotFound { kind, id }),
            1 => Ok(()),
            rows => Err(StoreError::NotUpdated { kind, id, rows }),
        }
    }

    pub async fn delete(
        conn: &mut PgConnection,
        schema: &str,
        kind: AudioFileType,
        id: i32,
    ) -> Result<(), StoreError> {
        let q = sql::delete(kind, id, schema);
        match Self::execute(conn, &q).await? {
            0 => Err(StoreError::NotFound { kind, id }),
            1 => Ok(()),
            rows => Err(StoreError::NotDeleted { kind, id, rows }),
        }
    }

    async fn execute(conn: &mut PgConnection, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = Self::query(q).execute(&mut *conn).await?;
        Ok(done.rows_affected())
    }

    async fn fetch_optional(
        conn: &mut PgConnection,
        kind: AudioFileType,
        q: &QueryBuf,
    ) -> Result<Option<AudioFile>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = Self::query(q).fetch_optional(&mut *conn).await?;
        row.map(|r| decode_row(kind, &r)).transpose()
    }

    async fn fetch_all(
        conn: &mut PgConnection,
        kind: AudioFileType,
        q: &QueryBuf,
    ) -> Result<Vec<AudioFile>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = Self::query(q).fetch_all(&mut *conn).await?;
        rows.iter().map(|r| decode_row(kind, r)).collect()
    }

    fn query(q: &QueryBuf) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
    }
}

fn decode_row(kind: AudioFileType, row: &PgRow) -> Result<AudioFile, StoreError> {
    Ok(match kind {
        AudioFileType::Song => AudioFile::Song(Song::from_row(row)?),
        AudioFileType::Podcast => AudioFile::Podcast(Podcast::from_row(row)?),
        AudioFileType::Audiobook => AudioFile::Audiobook(Audiobook::from_row(row)?),
    })
}
