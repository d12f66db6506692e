//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the session layer to external systems:
//! - `auth` - Auth clients (mock, hosted)
//! - `profile` - Profile stores (in-memory, hosted)
//! - `session_log` - Login audit stores (in-memory, hosted)
//! - `supabase` - Shared HTTP client and backend wiring

pub mod auth;
mod lock;
pub mod profile;
pub mod session_log;
pub mod supabase;

pub use auth::{ListenerRegistry, MockAuthClient, SupabaseAuthClient};
pub use profile::{InMemoryProfileStore, SupabaseProfileStore};
pub use session_log::{InMemorySessionLogStore, SupabaseSessionLogStore};
pub use supabase::{SupabaseBackend, SupabaseClient};
