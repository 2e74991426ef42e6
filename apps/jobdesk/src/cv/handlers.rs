use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::cv::document::Document;
use crate::cv::pdf::export_pdf;
use crate::cv::template::{DisplayCaps, HeaderLayout};
use crate::cv::{render, TemplateId};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TemplateSummary {
    pub key: &'static str,
    pub name: &'static str,
    pub header: HeaderLayout,
    pub caps: DisplayCaps,
}

fn parse_template(key: &str) -> Result<TemplateId, AppError> {
    TemplateId::parse(key).ok_or_else(|| AppError::NotFound(format!("Template '{key}'")))
}

async fn render_current(state: &AppState, template: TemplateId) -> Document {
    let profile = state.profile.read().await.snapshot();
    render(&profile, template, &state.avatars)
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        TemplateId::ALL
            .into_iter()
            .map(|t| TemplateSummary {
                key: t.key(),
                name: t.display_name(),
                header: t.style().header,
                caps: t.style().caps,
            })
            .collect(),
    )
}

/// GET /api/v1/cv/:template/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<Json<Document>, AppError> {
    let template = parse_template(&template)?;
    Ok(Json(render_current(&state, template).await))
}

/// GET /api/v1/cv/:template
pub async fn handle_download(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<Response, AppError> {
    let template = parse_template(&template)?;
    let doc = render_current(&state, template).await;
    let file_name = doc.file_name.clone();

    // PDF layout and serialization are CPU-bound.
    let bytes = tokio::task::spawn_blocking(move || export_pdf(&doc))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    info!(template = template.key(), bytes = bytes.len(), file = %file_name, "CV exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and the UTF-8 name per RFC 5987.
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' { c } else { '_' })
        .collect();
    let encoded: String = file_name
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"-_.".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
