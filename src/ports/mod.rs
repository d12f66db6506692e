//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the session layer and the hosted backend. Adapters implement these ports.
//!
//! ## Auth Ports
//!
//! - `AuthClient` - Sign-up, sign-in, sign-out, current session
//! - `AuthStateListener` - Observer for backend-pushed auth changes
//! - `Subscription` - Disposable handle for a listener registration
//!
//! ## Data Ports
//!
//! - `ProfileStore` - `profiles` table
//! - `SessionLogStore` - `user_sessions` audit table

mod auth_client;
mod data_error;
mod profile_store;
mod session_log_store;

pub use auth_client::{AuthClient, AuthStateListener, Subscription, SubscriptionId};
pub use data_error::DataError;
pub use profile_store::ProfileStore;
pub use session_log_store::SessionLogStore;
