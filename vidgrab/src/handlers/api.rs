use axum::{
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, header},
    response::{IntoResponse, Json, Response}
};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;

use crate::download::{self, DownloadPlan, DownloadRequest, OutputKind};
use crate::error::AppError;
use crate::platform::{Platform, is_valid_url};
use crate::quality::{QualityOption, shape_qualities};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VideoInfoRequest {
    url: Option<String>
}

#[derive(Debug, Serialize)]
pub struct VideoInfoResponse {
    success: bool,
    title: String,
    thumbnail: String,
    duration: u64,
    platform: Platform,
    formats: Vec<QualityOption>
}

fn require_url(url: Option<String>) -> Result<String, AppError> {
    url.filter(|u| is_valid_url(u)).ok_or_else(AppError::invalid_url)
}

#[tracing::instrument(skip(state, payload))]
pub async fn video_info(
    State(state): State<AppState>,
    payload: Result<Json<VideoInfoRequest>, JsonRejection>
) -> Result<Json<VideoInfoResponse>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let url = require_url(input.url)?;

    tracing::info!("Fetching video info for URL: {}", url);

    let info = state.extractor.fetch_info(&url).await?;
    let formats = shape_qualities(&info.formats);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let duration = info.duration.map_or(0, |d| d.max(0.0).round() as u64);

    Ok(Json(VideoInfoResponse {
        success: true,
        title: info.title.clone().unwrap_or_else(|| "Unknown".to_string()),
        thumbnail: info.best_thumbnail().unwrap_or_default().to_string(),
        duration,
        platform: Platform::detect(&url),
        formats
    }))
}

#[tracing::instrument(skip(state, payload))]
pub async fn download_video(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>
) -> Result<Response, AppError> {
    let Json(input) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let url = require_url(input.url)?;
    let kind = OutputKind::from_request(input.format.as_deref());
    let plan = DownloadPlan::new(&state.download_dir, kind, &input.quality)?;

    tracing::info!(
        "Downloading {} as {} (quality {}) to {}",
        url,
        kind.extension(),
        input.quality,
        plan.expected_path.display()
    );

    let info = state.extractor.download(&url, &plan.options).await?;

    let file = match tokio::fs::File::open(&plan.expected_path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("yt-dlp finished but {} is missing", plan.expected_path.display());
            return Err(AppError::artifact_missing());
        }
        Err(e) => return Err(e.into())
    };
    let size = file.metadata().await?.len();

    let filename = plan.attachment_name(info.title.as_deref());
    let disposition = HeaderValue::from_str(&download::content_disposition(&filename))
        .map_err(|e| AppError::internal(format!("Failed to build download header: {e}")))?;

    tracing::info!("Serving {} ({} bytes) as {}", plan.expected_path.display(), size, filename);

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(kind.content_type())),
        (header::CONTENT_LENGTH, HeaderValue::from(size)),
        (header::CONTENT_DISPOSITION, disposition)
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Server is running"
    }))
}
