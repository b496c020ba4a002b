//! Audio file record types: the closed type tag, write payloads, stored rows.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Discriminator selecting one of the three record kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AudioFileType {
    Song,
    Podcast,
    Audiobook,
}

impl AudioFileType {
    pub const ALL: [AudioFileType; 3] = [
        AudioFileType::Song,
        AudioFileType::Podcast,
        AudioFileType::Audiobook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFileType::Song => "song",
            AudioFileType::Podcast => "podcast",
            AudioFileType::Audiobook => "audiobook",
        }
    }
}

impl fmt::Display for AudioFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "song" => Ok(AudioFileType::Song),
            "podcast" => Ok(AudioFileType::Podcast),
            "audiobook" => Ok(AudioFileType::Audiobook),
            _ => Err(AppError::Validation(format!(
                "unknown audio file type '{}' (expected song, podcast or audiobook)",
                s
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SongMetadata {
    pub id: i32,
    pub name: String,
    /// Seconds.
    pub duration: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PodcastMetadata {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AudiobookMetadata {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub narrator: String,
    pub duration: i32,
}

/// Validated write payload. The variant is chosen by the request's type tag,
/// never guessed from the payload shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AudioMetadata {
    Song(SongMetadata),
    Podcast(PodcastMetadata),
    Audiobook(AudiobookMetadata),
}

impl AudioMetadata {
    pub fn kind(&self) -> AudioFileType {
        match self {
            AudioMetadata::Song(_) => AudioFileType::Song,
            AudioMetadata::Podcast(_) => AudioFileType::Podcast,
            AudioMetadata::Audiobook(_) => AudioFileType::Audiobook,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            AudioMetadata::Song(m) => m.id,
            AudioMetadata::Podcast(m) => m.id,
            AudioMetadata::Audiobook(m) => m.id,
        }
    }
}

/// Body of `POST /`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateAudioFile {
    #[serde(rename = "audioFileType")]
    pub audio_file_type: AudioFileType,
    #[serde(rename = "audioFileMetaData")]
    #[schema(value_type = AudioMetadata)]
    pub audio_file_meta_data: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Song {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub uploaded_time: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Podcast {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub host: String,
    pub participants: Option<String>,
    pub uploaded_time: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Audiobook {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub narrator: String,
    pub duration: i32,
    pub uploaded_time: DateTime<Utc>,
}

/// A stored record of any kind, serialized as the bare row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AudioFile {
    Song(Song),
    Podcast(Podcast),
    Audiobook(Audiobook),
}

impl AudioFile {
    /// Row as it looks right after insertion at `uploaded_time`.
    pub fn from_metadata(metadata: AudioMetadata, uploaded_time: DateTime<Utc>) -> Self {
        match metadata {
            AudioMetadata::Song(m) => AudioFile::Song(Song {
                id: m.id,
                name: m.name,
                duration: m.duration,
                uploaded_time,
            }),
            AudioMetadata::Podcast(m) => AudioFile::Podcast(Podcast {
                id: m.id,
                name: m.name,
                duration: m.duration,
                host: m.host,
                participants: m.participants,
                uploaded_time,
            }),
            AudioMetadata::Audiobook(m) => AudioFile::Audiobook(Audiobook {
                id: m.id,
                title: m.title,
                author: m.author,
                narrator: m.narrator,
                duration: m.duration,
                uploaded_time,
            }),
        }
    }

    pub fn kind(&self) -> AudioFileType {
        match self {
            AudioFile::Song(_) => AudioFileType::Song,
            AudioFile::Podcast(_) => AudioFileType::Podcast,
            AudioFile::Audiobook(_) => AudioFileType::Audiobook,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            AudioFile::Song(r) => r.id,
            AudioFile::Podcast(r) => r.id,
            AudioFile::Audiobook(r) => r.id,
        }
    }

    pub fn uploaded_time(&self) -> DateTime<Utc> {
        match self {
            AudioFile::Song(r) => r.uploaded_time,
            AudioFile::Podcast(r) => r.uploaded_time,
            AudioFile::Audiobook(r) => r.uploaded_time,
        }
    }

    /// The writable part of the row.
    pub fn metadata(&self) -> AudioMetadata {
        match self {
            AudioFile::Song(r) => AudioMetadata::Song(SongMetadata {
                id: r.id,
                name: r.name.clone(),
                duration: r.duration,
            }),
            AudioFile::Podcast(r) => AudioMetadata::Podcast(PodcastMetadata {
                id: r.id,
                name: r.name.clone(),
                duration: r.duration,
                host: r.host.clone(),
                participants: r.participants.clone(),
            }),
            AudioFile::Audiobook(r) => AudioMetadata::Audiobook(AudiobookMetadata {
                id: r.id,
                title: r.title.clone(),
                author: r.author.clone(),
                narrator: r.narrator.clone(),
                duration: r.duration,
            }),
        }
    }
}

/// Offset pagination for list reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 1000;

    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Page {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}
