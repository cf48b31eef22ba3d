use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response}
};

#[derive(Debug)]
pub struct AppError {
    pub message: String,
    pub status: StatusCode
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST
        }
    }

    pub fn invalid_url() -> Self {
        Self::bad_request("Invalid URL")
    }

    /// yt-dlp reported success but the expected file is not on disk.
    pub fn artifact_missing() -> Self {
        Self::internal("Download failed")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("handler error: {}", self.message);
        } else {
            tracing::warn!("rejected request: {}", self.message);
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<yt_dlp::Error> for AppError {
    fn from(err: yt_dlp::Error) -> Self {
        AppError::internal(err.summary())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(err.to_string())
    }
}
