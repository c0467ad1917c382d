mod progress;
mod service;
mod settings;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{ChecklistProgress, GroupProgress};
pub use service::ChecklistSession;
pub use settings::SessionSettings;
