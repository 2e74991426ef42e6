pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::chat::handlers as chat;
use crate::cv::handlers as cv;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile editor
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_replace_profile),
        )
        .route(
            "/api/v1/profile/fields/:field",
            get(profile::handle_get_field)
                .put(profile::handle_set_field)
                .delete(profile::handle_clear_field),
        )
        .route(
            "/api/v1/profile/lists/:list",
            post(profile::handle_append_item),
        )
        .route(
            "/api/v1/profile/lists/:list/:index",
            put(profile::handle_replace_item).delete(profile::handle_remove_item),
        )
        .route(
            "/api/v1/profile/experience-draft",
            post(profile::handle_submit_experience),
        )
        // CV templates
        .route("/api/v1/templates", get(cv::handle_list_templates))
        .route("/api/v1/cv/:template/preview", get(cv::handle_preview))
        .route("/api/v1/cv/:template", get(cv::handle_download))
        // Chat
        .route(
            "/api/v1/chat/messages",
            get(chat::handle_list_messages).post(chat::handle_submit_message),
        )
        .route("/api/v1/chat/summaries", get(chat::handle_list_summaries))
        .with_state(state)
}
