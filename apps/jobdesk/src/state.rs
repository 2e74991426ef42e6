use std::sync::Arc;

use tokio::sync::RwLock;

use crate::chat::ChatSession;
use crate::cv::AvatarService;
use crate::profile::ProfileEditor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Session-local profile being edited; render calls take a snapshot.
    pub profile: Arc<RwLock<ProfileEditor>>,
    pub chat: Arc<ChatSession>,
    pub avatars: AvatarService,
}
