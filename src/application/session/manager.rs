//! SessionManager - client-side authentication and session lifecycle.
//!
//! Tracks who is signed in, their profile and session, and whether that
//! picture is still loading. State changes come from two places: the
//! one-time bootstrap session check and the auth client's change stream.
//! The imperative operations (`sign_up`, `sign_in`, `sign_out`,
//! `update_profile`) delegate to the backend and let the change stream
//! drive state.
//!
//! # Example
//!
//! ```ignore
//! let manager = SessionManager::start(auth, profiles, session_logs);
//! let state = manager.wait_until_loaded().await;
//!
//! manager
//!     .sign_in(&SignInRequest::new("jane@example.com", "S3cure!pw").with_ip_address("10.0.0.1"))
//!     .await?;
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

use super::listener::SessionListener;
use super::session_logging::SessionLogger;
use super::{ProfileUpdateError, SessionState};
use crate::domain::auth::{AuthError, AuthSession, AuthUser, SignInRequest, SignUpRequest};
use crate::domain::foundation::UserId;
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::ports::{AuthClient, ProfileStore, SessionLogStore, Subscription};

/// State and collaborators shared between the manager, its listener and
/// its background tasks.
pub(crate) struct SessionCore {
    auth: Arc<dyn AuthClient>,
    profiles: Arc<dyn ProfileStore>,
    logger: SessionLogger,
    state: watch::Sender<SessionState>,
    torn_down: AtomicBool,
    bootstrapped: AtomicBool,
    /// Bumped on every change event so a slow bootstrap cannot overwrite
    /// a newer event.
    generation: AtomicU64,
    background: AsyncMutex<Vec<JoinHandle<()>>>,
}

impl SessionCore {
    fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn current_user_id(&self) -> Option<UserId> {
        self.state.borrow().user_id().cloned()
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let session = match self.auth.get_current_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "initial session lookup failed, continuing signed out");
                None
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("auth event arrived during bootstrap, keeping its state");
            return;
        }
        self.apply_session(session).await;
    }

    /// Entry point for the auth change stream.
    pub(crate) async fn handle_auth_change(&self, session: Option<AuthSession>) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.apply_session(session).await;
    }

    async fn apply_session(&self, session: Option<AuthSession>) {
        if self.is_torn_down() {
            return;
        }

        let user: Option<AuthUser> = session.as_ref().map(|s| s.user.clone());
        match user {
            Some(user) => {
                let user_id = user.id.clone();
                self.state.send_modify(|state| {
                    if state.profile.as_ref().map(|p| &p.id) != Some(&user_id) {
                        state.profile = None;
                    }
                    state.session = session;
                    state.user = Some(user);
                    state.loading = true;
                });
                self.load_profile(&user_id).await;
            }
            None => {
                self.state.send_modify(|state| {
                    state.session = None;
                    state.user = None;
                    state.profile = None;
                    state.loading = false;
                });
            }
        }
    }

    /// Fetches the profile for `user_id` and merges it if that user is
    /// still current. Failures leave `profile` unset; `loading` always ends.
    async fn load_profile(&self, user_id: &UserId) {
        let result = self.profiles.fetch_by_id(user_id).await;

        if self.is_torn_down() {
            tracing::debug!(user_id = %user_id, "profile fetch finished after teardown, ignored");
            return;
        }

        let profile: Option<Profile> = match result {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "failed to fetch profile");
                None
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if !state.is_current(user_id) {
                return false;
            }
            if profile.is_some() {
                state.profile = profile;
            }
            state.loading = false;
            true
        });

        if !applied {
            tracing::debug!(user_id = %user_id, "stale profile fetch discarded");
        }
    }

    async fn record_login(&self, ip_address: String, user_agent: Option<String>) {
        let user_id = self.current_user_id();
        self.logger
            .record_login(user_id.as_ref(), &ip_address, user_agent.as_deref())
            .await;
    }

    async fn track(&self, handle: JoinHandle<()>) {
        let mut background = self.background.lock().await;
        background.retain(|task| !task.is_finished());
        background.push(handle);
    }
}

/// Owns the session state and mediates auth operations.
///
/// The change-stream registration is made at construction and released
/// when the manager is dropped or torn down; completions that land after
/// that are ignored.
pub struct SessionManager {
    core: Arc<SessionCore>,
    subscription: Mutex<Option<Subscription>>,
}

impl SessionManager {
    /// Creates the manager and registers its change listener.
    ///
    /// State starts as `SessionState::initial()`. Call [`bootstrap`](Self::bootstrap)
    /// (or use [`start`](Self::start)) to run the initial session check.
    pub fn new(
        auth: Arc<dyn AuthClient>,
        profiles: Arc<dyn ProfileStore>,
        session_logs: Arc<dyn SessionLogStore>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        let core = Arc::new(SessionCore {
            auth,
            profiles,
            logger: SessionLogger::new(session_logs),
            state,
            torn_down: AtomicBool::new(false),
            bootstrapped: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            background: AsyncMutex::new(Vec::new()),
        });

        let listener = Arc::new(SessionListener::new(Arc::downgrade(&core)));
        let subscription = core.auth.on_auth_state_change(listener);

        Self {
            core,
            subscription: Mutex::new(Some(subscription)),
        }
    }

    /// Creates the manager and spawns the bootstrap session check.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        auth: Arc<dyn AuthClient>,
        profiles: Arc<dyn ProfileStore>,
        session_logs: Arc<dyn SessionLogStore>,
    ) -> Self {
        let manager = Self::new(auth, profiles, session_logs);
        let core = Arc::clone(&manager.core);
        let handle = tokio::spawn(async move { core.bootstrap().await });
        // Nothing else can hold the lock before the manager is returned
        if let Ok(mut background) = manager.core.background.try_lock() {
            background.push(handle);
        }
        manager
    }

    /// Runs the initial session check. Only the first call does anything.
    pub async fn bootstrap(&self) {
        self.core.bootstrap().await;
    }

    // === State ===

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.core.snapshot()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.core.state.subscribe()
    }

    /// Waits until `loading` is false and returns that state.
    pub async fn wait_until_loaded(&self) -> SessionState {
        let mut receiver = self.subscribe();
        let loaded = match receiver.wait_for(|state| !state.loading).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        loaded.unwrap_or_else(|| self.snapshot())
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.core.state.borrow().user.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.core.state.borrow().profile.clone()
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.core.state.borrow().session.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.core.state.borrow().loading
    }

    // === Operations ===

    /// Creates an account with profile metadata.
    ///
    /// The backend error is returned unchanged. State is left to the change
    /// stream.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        let result = self.core.auth.sign_up(&request.to_payload()).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "sign-up rejected");
        }
        result
    }

    /// Password sign-in.
    ///
    /// Only email and password reach the backend. When an IP address is
    /// supplied and sign-in succeeds, a session-log row is written in the
    /// background; see [`flush_background`](Self::flush_background).
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<(), AuthError> {
        if let Err(e) = self.core.auth.sign_in_with_password(&request.credentials()).await {
            tracing::debug!(error = %e, "sign-in rejected");
            return Err(e);
        }

        if let Some(ip_address) = request.ip_address.clone() {
            let core = Arc::clone(&self.core);
            let user_agent = request.user_agent.clone();
            let handle = tokio::spawn(async move { core.record_login(ip_address, user_agent).await });
            self.core.track(handle).await;
        }
        Ok(())
    }

    /// Closes the current user's open session-log row, then signs out.
    ///
    /// Audit failures never block sign-out; the backend error is returned
    /// unchanged.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(user_id) = self.core.current_user_id() {
            self.core.logger.record_logout(&user_id).await;
        }

        let result = self.core.auth.sign_out().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "sign-out failed");
        }
        result
    }

    /// Applies a partial update to the current user's profile and reloads it.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ProfileUpdateError> {
        let Some(user_id) = self.core.current_user_id() else {
            return Err(ProfileUpdateError::NoUserLoggedIn);
        };

        self.core.profiles.update_by_id(&user_id, update).await?;
        self.core.load_profile(&user_id).await;
        Ok(())
    }

    /// Waits for background work (bootstrap from `start`, session-log
    /// writes from `sign_in`) to finish.
    pub async fn flush_background(&self) {
        let handles = std::mem::take(&mut *self.core.background.lock().await);
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "background session task failed");
            }
        }
    }

    /// Releases the change-stream registration and stops applying updates.
    pub fn teardown(self) {
        drop(self);
    }

    fn release(&self) {
        self.core.torn_down.store(true, Ordering::SeqCst);
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            tracing::debug!(subscription_id = %subscription.id(), "session manager torn down");
            subscription.unsubscribe();
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.snapshot();
        f.debug_struct("SessionManager")
            .field("user_id", &state.user_id())
            .field("loading", &state.loading)
            .finish()
    }
}
