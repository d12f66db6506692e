//! Profile module - the application record attached to every identity.

mod record;
mod role;

pub use record::{Profile, ProfileUpdate};
pub use role::UserRole;
