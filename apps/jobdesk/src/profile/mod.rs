// Session-local profile editing. Nothing in this module persists.

pub mod editor;
pub mod handlers;

pub use editor::ProfileEditor;
