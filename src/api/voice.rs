//! Voice query and follow-up endpoints

use std::io::Read;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::ApiState;
use crate::relay::SaathiReply;
use crate::{followup, Error};

/// Build voice router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/query", post(query))
        .route("/followup", post(handle_followup))
        .with_state(state)
}

/// Uploaded audio spooled to a named temp file
///
/// The file is removed when the spool drops, so cleanup holds on every
/// exit path out of the handler, success or failure.
struct UploadSpool {
    file: NamedTempFile,
}

impl UploadSpool {
    fn new(data: &[u8]) -> Result<Self, Error> {
        let file = NamedTempFile::with_prefix("saathi-upload-")?;
        std::fs::write(file.path(), data)?;
        tracing::debug!(path = %file.path().display(), bytes = data.len(), "spooled upload");
        Ok(Self { file })
    }

    fn read(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        std::fs::File::open(self.file.path())?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Handle `POST /api/voice/query`
///
/// Multipart form: one audio part named `file` or `audio`, optional
/// `driverId` and `language` text fields.
async fn query(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<SaathiReply>, ApiError> {
    let mut upload: Option<UploadSpool> = None;
    let mut driver_id: Option<String> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Input(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file" | "audio") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Input(format!("failed to read audio part: {e}")))?;
                upload = Some(UploadSpool::new(&data)?);
            }
            Some("driverId") => driver_id = field.text().await.ok(),
            Some("language") => language = field.text().await.ok(),
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| ApiError::Input("no audio file provided".to_string()))?;
    let language = language.unwrap_or_else(|| state.default_language.clone());

    let audio = upload.read()?;
    let reply = state
        .relay
        .handle_query(&audio, driver_id.as_deref(), &language)
        .await?;

    // `upload` drops here, deleting the spool file
    Ok(Json(reply))
}

/// Follow-up request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowupRequest {
    #[allow(dead_code)]
    driver_id: Option<String>,
    action: Option<String>,
}

/// Handle `POST /api/voice/followup`
async fn handle_followup(
    State(_state): State<Arc<ApiState>>,
    Json(request): Json<FollowupRequest>,
) -> Json<SaathiReply> {
    let action = request.action.as_deref().unwrap_or("unknown");
    tracing::info!(action, "handling follow-up");
    Json(followup::dispatch(action))
}

/// Voice API errors
#[derive(Debug)]
enum ApiError {
    /// User-correctable input problem (HTTP 400)
    Input(String),

    /// Anything that failed past input validation (HTTP 500)
    Processing(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Input(msg) => Self::Input(msg),
            other => Self::Processing(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let (status, body) = match self {
            Self::Input(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    details: None,
                },
            ),
            Self::Processing(err) => {
                tracing::error!(error = %err, "voice query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        // All stage failures collapse to one generic message;
                        // the upstream detail rides along for diagnostics.
                        error: "Processing failed".to_string(),
                        details: Some(err.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
