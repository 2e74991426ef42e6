use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::profile::{ExperienceEntry, Profile, ProfileField, ProfileList};
use crate::profile::editor::{ExperienceDraft, ListItem};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Serialize)]
pub struct FieldResponse {
    pub field: &'static str,
    /// `None` when the field is unset and renders as its placeholder.
    pub value: Option<String>,
}

#[derive(Serialize)]
pub struct DraftResponse {
    pub appended: bool,
    pub experiences: Vec<ExperienceEntry>,
}

fn parse_field(key: &str) -> Result<ProfileField, AppError> {
    ProfileField::parse(key).ok_or_else(|| AppError::NotFound(format!("Profile field '{key}'")))
}

fn parse_list(key: &str) -> Result<ProfileList, AppError> {
    ProfileList::parse(key).ok_or_else(|| AppError::NotFound(format!("Profile list '{key}'")))
}

fn parse_item(list: ProfileList, body: Value) -> Result<ListItem, AppError> {
    ListItem::from_json(list, body).map_err(|e| {
        AppError::Validation(format!("Invalid {} item: {e}", list.as_str()))
    })
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<Profile> {
    Json(state.profile.read().await.snapshot())
}

/// PUT /api/v1/profile
pub async fn handle_replace_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Json<Profile> {
    let mut editor = state.profile.write().await;
    editor.replace_profile(profile);
    Json(editor.snapshot())
}

/// GET /api/v1/profile/fields/:field
pub async fn handle_get_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<FieldResponse>, AppError> {
    let field = parse_field(&field)?;
    let editor = state.profile.read().await;
    Ok(Json(FieldResponse {
        field: field.as_str(),
        value: editor.get(field).map(str::to_string),
    }))
}

/// PUT /api/v1/profile/fields/:field
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(req): Json<FieldValue>,
) -> Result<Json<Profile>, AppError> {
    let field = parse_field(&field)?;
    let mut editor = state.profile.write().await;
    editor.set(field, req.value);
    Ok(Json(editor.snapshot()))
}

/// DELETE /api/v1/profile/fields/:field
pub async fn handle_clear_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let field = parse_field(&field)?;
    let mut editor = state.profile.write().await;
    editor.clear(field);
    Ok(Json(editor.snapshot()))
}

/// POST /api/v1/profile/lists/:list
pub async fn handle_append_item(
    State(state): State<AppState>,
    Path(list): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Profile>, AppError> {
    let list = parse_list(&list)?;
    let item = parse_item(list, body)?;
    let mut editor = state.profile.write().await;
    editor.append(list, item);
    Ok(Json(editor.snapshot()))
}

/// PUT /api/v1/profile/lists/:list/:index
pub async fn handle_replace_item(
    State(state): State<AppState>,
    Path((list, index)): Path<(String, usize)>,
    Json(body): Json<Value>,
) -> Result<Json<Profile>, AppError> {
    let list = parse_list(&list)?;
    let item = parse_item(list, body)?;
    let mut editor = state.profile.write().await;
    editor.replace(list, index, item);
    Ok(Json(editor.snapshot()))
}

/// DELETE /api/v1/profile/lists/:list/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((list, index)): Path<(String, usize)>,
) -> Result<Json<Profile>, AppError> {
    let list = parse_list(&list)?;
    let mut editor = state.profile.write().await;
    editor.remove(list, index);
    Ok(Json(editor.snapshot()))
}

/// POST /api/v1/profile/experience-draft
pub async fn handle_submit_experience(
    State(state): State<AppState>,
    Json(draft): Json<ExperienceDraft>,
) -> Json<DraftResponse> {
    let mut editor = state.profile.write().await;
    let appended = editor.submit_experience(draft);
    Json(DraftResponse {
        appended,
        experiences: editor.profile().experiences.clone(),
    })
}
