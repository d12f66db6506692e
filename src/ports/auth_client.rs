//! Auth client port for the hosted identity backend.
//!
//! This port is the session manager's only view of authentication. It covers
//! the imperative calls (sign up, sign in, sign out, current session) and the
//! backend's push-style change stream, exposed as an observer registration
//! that hands back a disposable [`Subscription`].
//!
//! # Example
//!
//! ```ignore
//! let subscription = auth.on_auth_state_change(listener);
//! // ... listener receives (event, session) pairs ...
//! subscription.unsubscribe();
//! ```

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::domain::auth::{AuthChangeEvent, AuthError, AuthSession, PasswordCredentials, SignUpPayload};

/// Receives auth-state transitions in the order the backend delivers them.
#[async_trait]
pub trait AuthStateListener: Send + Sync {
    /// Called with the event kind and the session now in effect
    /// (`None` after sign-out).
    async fn on_auth_state_change(&self, event: AuthChangeEvent, session: Option<AuthSession>);
}

/// Operations against the auth backend.
///
/// # Contract
///
/// Implementations must:
/// - Deliver a `SignedIn` event to every listener before a successful
///   `sign_in_with_password` returns, and `SignedOut` before `sign_out` returns
/// - Return backend-reported failures as `AuthError::Api` with the backend
///   message untouched
/// - Return `AuthError::ServiceUnavailable` for transport errors
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Session currently held by the client, if any.
    async fn get_current_session(&self) -> Result<Option<AuthSession>, AuthError>;

    /// Registers a listener for auth-state changes.
    ///
    /// The listener stays registered until the returned handle is
    /// unsubscribed or dropped.
    fn on_auth_state_change(&self, listener: Arc<dyn AuthStateListener>) -> Subscription;

    /// Creates an account; profile metadata travels in `payload.options.data`.
    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), AuthError>;

    /// Password grant.
    async fn sign_in_with_password(&self, credentials: &PasswordCredentials) -> Result<(), AuthError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Identifies one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type CancelFn = Box<dyn FnOnce() + Send + Sync>;

/// Disposable handle for a listener registration.
///
/// Releasing happens exactly once: on [`Subscription::unsubscribe`] or when
/// the handle is dropped, whichever comes first.
pub struct Subscription {
    id: SubscriptionId,
    cancel: Option<CancelFn>,
}

impl Subscription {
    /// Wraps a registration with the action that removes it.
    pub fn new(id: SubscriptionId, cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Removes the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
