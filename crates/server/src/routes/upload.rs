use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use docsum_common::DocsumError;
use docsum_extract::{sanitize_upload_name, DocumentKind, UploadedFile};
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::UploadResponse;

#[post("/upload")]
pub async fn upload(
    mut payload: Multipart,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let mut uploaded = None;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(malformed)?;
        let content_disposition = field.content_disposition();

        if content_disposition.get_name() != Some("file") {
            continue;
        }

        let original_name = content_disposition
            .get_filename()
            .unwrap_or_default()
            .to_string();
        if original_name.trim().is_empty() {
            return Err(DocsumError::invalid_input("No file selected").into());
        }

        // Reject by the client's extension before touching the disk
        DocumentKind::from_filename(&original_name)?;
        let filename = sanitize_upload_name(&original_name)?;

        let mut file = UploadedFile::create(
            &state.config.upload_dir,
            &filename,
            state.config.max_upload_bytes,
        )?;

        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(malformed)?;
            file.write_chunk(&data)?;
        }

        info!("Received upload {} ({} bytes)", filename, file.len());
        uploaded = Some((filename, file));
        break;
    }

    let (filename, file) =
        uploaded.ok_or_else(|| DocsumError::invalid_input("No file part in the request"))?;

    // Extraction is blocking; the file is removed when `file` is dropped
    let text = web::block(move || file.extract())
        .await
        .map_err(|e| DocsumError::internal(format!("Extraction task failed: {}", e)))??;

    info!("Extracted {} chars from {}", text.chars().count(), filename);

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        text,
        filename,
    }))
}

fn malformed(err: actix_multipart::MultipartError) -> DocsumError {
    DocsumError::invalid_input(format!("Malformed upload: {}", err))
}
