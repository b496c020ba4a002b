//! Audio file CRUD handlers: create, read one, read many, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, DbSession};
use crate::model::{AudioFile, AudioFileType, AudioMetadata, CreateAudioFile, Page};
use crate::response::{self, Detail};
use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid id '{}'", id_str)))
}

fn parse_page_param(params: &HashMap<String, String>, key: &str) -> Result<Option<u32>, AppError> {
    params
        .get(key)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| AppError::Validation(format!("{} must be a non-negative integer", key)))
        })
        .transpose()
}

/// Accepts bare metadata or the create envelope; either way the metadata must
/// fit `kind` and keep the record's id.
fn update_payload(kind: AudioFileType, id: i32, body: Value) -> Result<AudioMetadata, AppError> {
    let is_envelope = body.get("audioFileMetaData").is_some();
    let meta = if is_envelope {
        let req: CreateAudioFile =
            serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
        if req.audio_file_type != kind {
            return Err(AppError::Validation(format!(
                "audioFileType '{}' does not match path type '{}'",
                req.audio_file_type, kind
            )));
        }
        req.audio_file_meta_data
    } else {
        body
    };
    let metadata = kind.decode_metadata(meta)?;
    if metadata.id() != id {
        return Err(AppError::Validation(format!(
            "id {} in body does not match id {} in path",
            metadata.id(),
            id
        )));
    }
    Ok(metadata)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "audio",
    request_body = CreateAudioFile,
    responses(
        (status = 201, description = "Created record", body = AudioFile),
        (status = 400, description = "Id already exists for this type", body = ErrorBody),
        (status = 422, description = "Metadata does not match the declared type", body = ErrorBody)
    )
)]
pub async fn create(
    session: DbSession,
    AppJson(body): AppJson<CreateAudioFile>,
) -> Result<impl IntoResponse, AppError> {
    let kind = body.audio_file_type;
    let metadata = kind.decode_metadata(body.audio_file_meta_data)?;
    let row = session.lock().await?.create(&metadata).await?;
    tracing::info!(%kind, id = row.id(), "audio file created");
    Ok(response::created(row))
}

#[utoipa::path(
    get,
    path = "/{audio_type}",
    tag = "audio",
    params(
        ("audio_type" = AudioFileType, Path, description = "Record kind"),
        ("skip" = Option<u32>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<u32>, Query, description = "Page size (default 100, max 1000)")
    ),
    responses(
        (status = 200, description = "Page of records ordered by id", body = [AudioFile]),
        (status = 422, description = "Unknown type or bad paging value", body = ErrorBody)
    )
)]
pub async fn list(
    session: DbSession,
    Path(audio_type): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let kind: AudioFileType = audio_type.parse()?;
    let page = Page::new(
        parse_page_param(&params, "skip")?,
        parse_page_param(&params, "limit")?,
    );
    let rows = session.lock().await?.get_many(kind, page).await?;
    Ok(response::ok(rows))
}

#[utoipa::path(
    get,
    path = "/{audio_type}/{id}",
    tag = "audio",
    params(
        ("audio_type" = AudioFileType, Path, description = "Record kind"),
        ("id" = i32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "The record", body = AudioFile),
        (status = 404, description = "No record with this id", body = ErrorBody)
    )
)]
pub async fn read(
    session: DbSession,
    Path((audio_type, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind: AudioFileType = audio_type.parse()?;
    let id = parse_id(&id_str)?;
    let row = session.lock().await?.get_one(kind, id).await?;
    Ok(response::ok(row))
}

#[utoipa::path(
    put,
    path = "/{audio_type}/{id}",
    tag = "audio",
    params(
        ("audio_type" = AudioFileType, Path, description = "Record kind"),
        ("id" = i32, Path, description = "Record id")
    ),
    request_body = AudioMetadata,
    responses(
        (status = 200, description = "Updated", body = Detail),
        (status = 404, description = "No record with this id", body = ErrorBody),
        (status = 422, description = "Metadata does not match the type", body = ErrorBody),
        (status = 500, description = "Audio file was not updated", body = ErrorBody)
    )
)]
pub async fn update(
    session: DbSession,
    Path((audio_type, id_str)): Path<(String, String)>,
    AppJson(body): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let kind: AudioFileType = audio_type.parse()?;
    let id = parse_id(&id_str)?;
    let metadata = update_payload(kind, id, body)?;
    session.lock().await?.update(id, &metadata).await?;
    tracing::info!(%kind, id, "audio file updated");
    Ok(response::detail("Audio file updated successfully!"))
}

#[utoipa::path(
    delete,
    path = "/{audio_type}/{id}",
    tag = "audio",
    params(
        ("audio_type" = AudioFileType, Path, description = "Record kind"),
        ("id" = i32, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Deleted", body = Detail),
        (status = 404, description = "No record with this id", body = ErrorBody),
        (status = 500, description = "Audio file was not deleted", body = ErrorBody)
    )
)]
pub async fn delete(
    session: DbSession,
    Path((audio_type, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind: AudioFileType = audio_type.parse()?;
    let id = parse_id(&id_str)?;
    session.lock().await?.delete(kind, id).await?;
    tracing::info!(%kind, id, "audio file deleted");
    Ok(response::detail("Audio file deleted successfully!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_accepts_bare_metadata() {
        let meta = update_payload(
            AudioFileType::Song,
            1,
            json!({"id": 1, "name": "B", "duration": 20}),
        )
        .unwrap();
        assert_eq!(meta.id(), 1);
        assert_eq!(meta.kind(), AudioFileType::Song);
    }

    #[test]
    fn update_accepts_matching_envelope() {
        let body = json!({
            "audioFileType": "audiobook",
            "audioFileMetaData": {"id": 2, "title": "t", "author": "a", "narrator": "n", "duration": 5}
        });
        assert!(update_payload(AudioFileType::Audiobook, 2, body).is_ok());
    }

    #[test]
    fn update_rejects_envelope_for_other_type() {
        let body = json!({
            "audioFileType": "song",
            "audioFileMetaData": {"id": 2, "name": "n", "duration": 5}
        });
        let err = update_payload(AudioFileType::Podcast, 2, body).unwrap_err();
        assert!(err.to_string().contains("does not match path type"));
    }

    #[test]
    fn update_cannot_change_id() {
        let err = update_payload(
            AudioFileType::Song,
            1,
            json!({"id": 2, "name": "B", "duration": 20}),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn paging_params_must_be_unsigned() {
        let mut params = HashMap::new();
        params.insert("skip".to_string(), "-1".to_string());
        assert!(parse_page_param(&params, "skip").is_err());
        assert_eq!(parse_page_param(&params, "limit").unwrap(), None);
    }
}
