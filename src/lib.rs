//! furlink - client-side session and identity layer for a pet-grooming marketplace.
//!
//! This crate tracks who is signed in, their profile and session, mediates
//! sign-up, sign-in, sign-out and profile updates against a hosted backend,
//! and records a login audit trail.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
