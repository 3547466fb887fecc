use actix_web::{post, web, HttpResponse};
use docsum_common::DocsumError;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{SummarizeRequest, SummarizeResponse};

#[post("/summarize")]
pub async fn summarize(
    req: web::Json<SummarizeRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let summarizer = state.summarizer()?;

    let req = req.into_inner();
    let style = req.style();
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| DocsumError::invalid_input("Missing text content"))?;

    info!(
        "Summarize request - {} chars, length={}, format={}, focus={}, tone={}",
        text.chars().count(),
        style.length,
        style.format,
        style.focus,
        style.tone
    );

    let summary = summarizer.summarize_text(&text, &style).await?;

    Ok(HttpResponse::Ok().json(SummarizeResponse { summary }))
}
