//! Schema bootstrap: one table per audio file type, created idempotently.

use crate::error::AppError;
use crate::model::AudioFileType;
use crate::registry::{ID_COLUMN, UPLOADED_TIME_COLUMN};
use crate::sql::{qualified_table, quoted};
use sqlx::PgPool;

/// `CREATE TABLE IF NOT EXISTS` for one type.
pub fn create_table_sql(kind: AudioFileType, schema: &str) -> String {
    let spec = kind.table();
    let mut cols = vec![format!("{} INTEGER PRIMARY KEY CHECK ({} > 0)", quoted(ID_COLUMN), quoted(ID_COLUMN))];
    for c in spec.columns {
        let mut def = format!("{} {}", quoted(c.name), c.ddl_type);
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if c.positive {
            def.push_str(&format!(" CHECK ({} > 0)", quoted(c.name)));
        }
        cols.push(def);
    }
    cols.push(format!(
        "{} TIMESTAMPTZ NOT NULL DEFAULT NOW()",
        quoted(UPLOADED_TIME_COLUMN)
    ));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, spec.name),
        cols.join(", ")
    )
}

/// `CREATE INDEX IF NOT EXISTS` for each indexed column of one type.
pub fn create_index_sql(kind: AudioFileType, schema: &str) -> Vec<String> {
    let spec = kind.table();
    spec.columns
        .iter()
        .filter(|c| c.indexed)
        .map(|c| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quoted(&format!("ix_{}_{}", spec.name, c.name)),
                qualified_table(schema, spec.name),
                quoted(c.name)
            )
        })
        .collect()
}

/// Create the schema, the three tables and their indexes if missing.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    for kind in AudioFileType::ALL {
        let ddl = create_table_sql(kind, schema);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        for ddl in create_index_sql(kind, schema) {
            tracing::debug!(sql = %ddl, "migration");
            sqlx::query(&ddl).execute(pool).await?;
        }
    }
    tracing::info!(schema = %schema, "audio tables ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podcast_table_matches_record_shape() {
        assert_eq!(
            create_table_sql(AudioFileType::Podcast, "public"),
            "CREATE TABLE IF NOT EXISTS \"public\".\"podcast\" (\
             \"id\" INTEGER PRIMARY KEY CHECK (\"id\" > 0), \
             \"name\" VARCHAR(100) NOT NULL, \
             \"duration\" INTEGER NOT NULL CHECK (\"duration\" > 0), \
             \"host\" VARCHAR(100) NOT NULL, \
             \"participants\" VARCHAR(1000), \
             \"uploaded_time\" TIMESTAMPTZ NOT NULL DEFAULT NOW())"
        );
    }

    #[test]
    fn audiobook_indexes_people_and_title() {
        let ddl = create_index_sql(AudioFileType::Audiobook, "audio");
        assert_eq!(ddl.len(), 3);
        assert_eq!(
            ddl[0],
            "CREATE INDEX IF NOT EXISTS \"ix_audiobook_title\" ON \"audio\".\"audiobook\" (\"title\")"
        );
    }

    #[test]
    fn song_has_no_nullable_columns() {
        let ddl = create_table_sql(AudioFileType::Song, "public");
        assert!(ddl.contains("\"name\" VARCHAR(100) NOT NULL"));
        assert!(!ddl.contains("VARCHAR(1000)"));
    }
}
