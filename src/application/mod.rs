//! Application layer - session orchestration and navigation rules.
//!
//! `SessionManager` coordinates the auth, profile and session-log ports;
//! `RouteGuard` turns its state into navigation decisions.

pub mod route_guard;
pub mod session;

pub use route_guard::{Access, AppRoute, GuardDecision, RouteGuard};
pub use session::{ProfileUpdateError, SessionLogger, SessionManager, SessionState};
