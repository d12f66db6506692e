//! Domain layer containing the client's vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `auth` - Sessions, auth-state events, sign-up/sign-in requests and forms
//! - `profile` - The profile record and role tag
//! - `session_log` - Login audit rows
//! - `schema` - Typed mirror of the remaining backend tables

pub mod auth;
pub mod foundation;
pub mod profile;
pub mod schema;
pub mod session_log;
