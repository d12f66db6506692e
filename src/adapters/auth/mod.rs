//! Authentication adapters.
//!
//! Implementations of the `AuthClient` port:
//!
//! - `mock` - In-process accounts for tests and local runs
//! - `supabase` - Hosted auth service over REST
//!
//! Both keep their observers in a shared `ListenerRegistry`.

mod listeners;
mod mock;
mod supabase;

pub use listeners::ListenerRegistry;
pub use mock::MockAuthClient;
pub use supabase::SupabaseAuthClient;
