use crate::adapters::storage::{LocalStorage, StagedUpload};
use crate::adapters::workbook::WorkbookFormat;
use crate::config::Settings;
use crate::core::etl::RosterEngine;
use crate::core::pipeline::WorkbookPipeline;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const UPLOAD_FIELD: &str = "file";
pub const REPORT_FILENAME: &str = "teams.pdf";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Team Generator</title></head>
<body>
  <h1>Team Generator</h1>
  <p>Upload a workbook with sheets for Developers, Business Analysts and Data Analysts.</p>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".xlsx,.xls,.ods,.zip" required>
    <button type="submit">Generate teams</button>
  </form>
</body>
</html>
"#;

#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

pub fn build_router(settings: Settings) -> Router {
    let body_limit = settings.max_upload_bytes();
    let state = AppState::new(settings);

    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(healthz_handler))
        .route("/upload", post(upload_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(settings: Settings) -> Result<()> {
    std::fs::create_dir_all(settings.upload_dir())?;

    let listener = TcpListener::bind(settings.listen_addr()).await?;
    tracing::info!("🚀 Server is running on {}", listener.local_addr()?);

    axum::serve(listener, build_router(settings))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz_handler() -> &'static str {
    "ok"
}

fn upload_error(e: MultipartError, limit: usize) -> RosterError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return RosterError::PayloadTooLarge { limit };
    }
    RosterError::UploadError {
        message: e.body_text(),
    }
}

async fn upload_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let Ok(mut multipart) = multipart else {
        return Err(RosterError::NoFileUploaded);
    };

    let limit = state.settings.max_upload_bytes();
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let data = field.bytes().await.map_err(|e| upload_error(e, limit))?;
        if original_name.is_none() && data.is_empty() {
            // browsers send an empty part when no file was chosen
            continue;
        }

        let upload_dir = state.settings.upload_dir().to_path_buf();
        let staged = tokio::task::spawn_blocking(move || {
            StagedUpload::stage(&upload_dir, original_name, &data)
        })
        .await
        .map_err(|e| RosterError::TaskFailure {
            message: e.to_string(),
        })??;
        upload = Some(staged);
        break;
    }

    // Dropping the staged upload deletes it, on every return path below.
    let upload = upload.ok_or(RosterError::NoFileUploaded)?;
    tracing::info!(
        "📥 Received upload {:?} ({})",
        upload.original_name().unwrap_or("<unnamed>"),
        upload.path().display()
    );

    let format = WorkbookFormat::from_file_name(upload.original_name());
    let pipeline = WorkbookPipeline::new(
        LocalStorage::new(state.settings.upload_dir()),
        state.settings.as_ref().clone(),
        upload.file_name(),
        format,
    );
    let engine =
        RosterEngine::new_with_monitoring(pipeline, state.settings.monitoring_enabled());
    let report = engine.run().await?;

    let response = (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", REPORT_FILENAME),
            ),
        ],
        report.bytes,
    )
        .into_response();

    drop(upload);
    Ok(response)
}

impl RosterError {
    pub fn status_code(&self) -> StatusCode {
        if matches!(self, RosterError::PayloadTooLarge { .. }) {
            StatusCode::PAYLOAD_TOO_LARGE
        } else if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            tracing::warn!("⚠️ Rejected upload: {}", self);
        } else {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
        }

        (status, self.user_friendly_message()).into_response()
    }
}
