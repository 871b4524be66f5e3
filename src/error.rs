use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Artifact encode error: {0}")]
    ArtifactEncode(#[from] bincode::error::EncodeError),

    #[error("Artifact decode error: {0}")]
    ArtifactDecode(#[from] bincode::error::DecodeError),

    #[error("Model error: {0}")]
    Model(#[from] smartcore::error::Failed),

    #[error("Empty file or no data rows")]
    EmptyFile,

    #[error("No training samples for {0}")]
    NoSamples(String),

    #[error("Unknown alloy type: {name:?} (valid: {valid})", name = .0, valid = .1.join(", "))]
    UnknownAlloy(String, Vec<String>),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UnknownAlloy(..) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}
