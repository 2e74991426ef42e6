// Chat widget: append-only transcript, simulated counter-party, and the persisted
// per-conversation summaries. Independent of the profile/CV flow.

pub mod handlers;
pub mod responder;
pub mod session;
pub mod summary;
pub mod transcript;

pub use session::ChatSession;
