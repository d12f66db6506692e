//! Session lifecycle: state, operations and login auditing.

mod error;
mod listener;
mod manager;
mod session_logging;
mod state;

pub use error::ProfileUpdateError;
pub use manager::SessionManager;
pub use session_logging::SessionLogger;
pub use state::SessionState;
