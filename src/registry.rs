//! Type registry: each type tag owns one table and one strict payload schema.

use crate::error::AppError;
use crate::model::{AudioFileType, AudioMetadata, AudiobookMetadata, PodcastMetadata, SongMetadata};
use crate::service::Validate;
use crate::sql::PgBindValue;
use serde_json::Value;

pub const ID_COLUMN: &str = "id";
pub const UPLOADED_TIME_COLUMN: &str = "uploaded_time";

#[derive(Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    /// PostgreSQL type used for parameter casts.
    pub pg_type: &'static str,
    /// Column type in DDL, with its length bound.
    pub ddl_type: &'static str,
    pub nullable: bool,
    pub indexed: bool,
    /// Values must be greater than zero.
    pub positive: bool,
}

const fn short_text(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        pg_type: "varchar",
        ddl_type: "VARCHAR(100)",
        nullable: false,
        indexed: true,
        positive: false,
    }
}

const fn duration() -> ColumnSpec {
    ColumnSpec {
        name: "duration",
        pg_type: "integer",
        ddl_type: "INTEGER",
        nullable: false,
        indexed: false,
        positive: true,
    }
}

/// Storage layout of one record kind. `columns` lists the mutable columns, in
/// the order [`AudioMetadata::column_values`] produces them; `id` and
/// `uploaded_time` are implicit.
#[derive(Debug)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    /// Every column a read returns, in row order.
    pub fn select_columns(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(self.columns.len() + 2);
        out.push(ID_COLUMN);
        out.extend(self.columns.iter().map(|c| c.name));
        out.push(UPLOADED_TIME_COLUMN);
        out
    }
}

static SONG_TABLE: TableSpec = TableSpec {
    name: "song",
    columns: &[short_text("name"), duration()],
};

static PODCAST_TABLE: TableSpec = TableSpec {
    name: "podcast",
    columns: &[
        short_text("name"),
        duration(),
        short_text("host"),
        ColumnSpec {
            name: "participants",
            pg_type: "varchar",
            ddl_type: "VARCHAR(1000)",
            nullable: true,
            indexed: false,
            positive: false,
        },
    ],
};

static AUDIOBOOK_TABLE: TableSpec = TableSpec {
    name: "audiobook",
    columns: &[
        short_text("title"),
        short_text("author"),
        short_text("narrator"),
        duration(),
    ],
};

impl AudioFileType {
    pub fn table(self) -> &'static TableSpec {
        match self {
            AudioFileType::Song => &SONG_TABLE,
            AudioFileType::Podcast => &PODCAST_TABLE,
            AudioFileType::Audiobook => &AUDIOBOOK_TABLE,
        }
    }

    /// Decode `value` strictly against this type's schema, then apply field rules.
    /// A payload shaped for another type fails here, before any storage access.
    pub fn decode_metadata(self, value: Value) -> Result<AudioMetadata, AppError> {
        if !value.is_object() {
            return Err(AppError::Validation("audioFileMetaData must be a JSON object".into()));
        }
        let mismatch = |e: serde_json::Error| {
            AppError::Validation(format!("audioFileMetaData does not match type {}: {}", self, e))
        };
        let metadata = match self {
            AudioFileType::Song => {
                AudioMetadata::Song(serde_json::from_value::<SongMetadata>(value).map_err(mismatch)?)
            }
            AudioFileType::Podcast => {
                AudioMetadata::Podcast(serde_json::from_value::<PodcastMetadata>(value).map_err(mismatch)?)
            }
            AudioFileType::Audiobook => AudioMetadata::Audiobook(
                serde_json::from_value::<AudiobookMetadata>(value).map_err(mismatch)?,
            ),
        };
        metadata.validate()?;
        Ok(metadata)
    }
}

impl AudioMetadata {
    /// Values for the kind's mutable columns.
    pub fn column_values(&self) -> Vec<PgBindValue> {
        match self {
            AudioMetadata::Song(m) => vec![
                PgBindValue::Text(m.name.clone()),
                PgBindValue::Int(m.duration),
            ],
            AudioMetadata::Podcast(m) => vec![
                PgBindValue::Text(m.name.clone()),
                PgBindValue::Int(m.duration),
                PgBindValue::Text(m.host.clone()),
                m.participants
                    .clone()
                    .map(PgBindValue::Text)
                    .unwrap_or(PgBindValue::Null),
            ],
            AudioMetadata::Audiobook(m) => vec![
                PgBindValue::Text(m.title.clone()),
                PgBindValue::Text(m.author.clone()),
                PgBindValue::Text(m.narrator.clone()),
                PgBindValue::Int(m.duration),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn each_type_has_its_own_table() {
        let names: Vec<_> = AudioFileType::ALL.iter().map(|k| k.table().name).collect();
        assert_eq!(names, ["song", "podcast", "audiobook"]);
    }

    #[test]
    fn column_values_line_up_with_table_columns() {
        let samples = [
            json!({"id": 1, "name": "n", "duration": 1}),
            json!({"id": 1, "name": "n", "duration": 1, "host": "h", "participants": "p"}),
            json!({"id": 1, "title": "t", "author": "a", "narrator": "r", "duration": 1}),
        ];
        for (kind, sample) in AudioFileType::ALL.into_iter().zip(samples) {
            let meta = kind.decode_metadata(sample).unwrap();
            assert_eq!(meta.kind(), kind);
            assert_eq!(meta.column_values().len(), kind.table().columns.len());
        }
    }

    #[test]
    fn select_columns_wrap_mutable_columns() {
        assert_eq!(
            AudioFileType::Song.table().select_columns(),
            ["id", "name", "duration", "uploaded_time"]
        );
    }

    #[test]
    fn payload_for_another_type_is_rejected() {
        let podcast_shaped = json!({"id": 1, "name": "n", "duration": 1, "host": "h"});
        let err = AudioFileType::Song.decode_metadata(podcast_shaped).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let audiobook_shaped = json!({"id": 1, "title": "t", "author": "a", "narrator": "r", "duration": 1});
        assert!(AudioFileType::Podcast.decode_metadata(audiobook_shaped).is_err());

        let song_shaped = json!({"id": 1, "name": "n", "duration": 1});
        assert!(AudioFileType::Audiobook.decode_metadata(song_shaped).is_err());
    }

    #[test]
    fn podcast_participants_may_be_omitted() {
        let meta = AudioFileType::Podcast
            .decode_metadata(json!({"id": 4, "name": "n", "duration": 9, "host": "h"}))
            .unwrap();
        match meta {
            AudioMetadata::Podcast(p) => assert_eq!(p.participants, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn field_rules_apply_after_decoding() {
        let err = AudioFileType::Song
            .decode_metadata(json!({"id": 1, "name": "n", "duration": 0}))
            .unwrap_err();
        assert_eq!(err.to_string(), "validation: duration must be greater than 0");
        assert!(AudioFileType::Song.decode_metadata(json!([1, 2])).is_err());
        assert!(AudioFileType::Song
            .decode_metadata(json!({"id": 3000000000u64, "name": "n", "duration": 1}))
            .is_err());
    }
}
