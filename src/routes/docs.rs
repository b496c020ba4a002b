//! OpenAPI document for the audio routes.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::audio;
use crate::model::{
    AudioFile, AudioFileType, AudioMetadata, Audiobook, AudiobookMetadata, CreateAudioFile, Podcast,
    PodcastMetadata, Song, SongMetadata,
};
use crate::response::Detail;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(audio::create, audio::list, audio::read, audio::update, audio::delete),
    components(schemas(
        AudioFileType,
        SongMetadata,
        PodcastMetadata,
        AudiobookMetadata,
        AudioMetadata,
        CreateAudioFile,
        Song,
        Podcast,
        Audiobook,
        AudioFile,
        Detail,
        ErrorBody,
        ErrorDetail
    )),
    tags((name = "audio", description = "Song, podcast and audiobook metadata"))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /openapi.json
pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths["/"].get("post").is_some());
        assert!(paths["/{audio_type}"].get("get").is_some());
        let item = &paths["/{audio_type}/{id}"];
        for method in ["get", "put", "delete"] {
            assert!(item.get(method).is_some(), "missing {}", method);
        }
        assert!(doc["components"]["schemas"].get("CreateAudioFile").is_some());
    }
}
