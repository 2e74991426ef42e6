// CV generation: Profile → template style table → document tree → PDF bytes.
// Rendering is pure; PDF export is CPU-bound and runs inside spawn_blocking from handlers.

pub mod avatar;
pub mod document;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod placeholders;
pub mod renderer;
pub mod template;

pub use avatar::AvatarService;
pub use renderer::render;
pub use template::TemplateId;
