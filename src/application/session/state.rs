//! Session-state snapshot held by the session manager.

use crate::domain::auth::{AuthSession, AuthUser};
use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;

/// `(user, profile, session, loading)` as seen by route and page collaborators.
///
/// A `user` of `None` always comes with a `profile` of `None`, and a loaded
/// profile always belongs to the current user.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
    pub session: Option<AuthSession>,
    /// True during bootstrap and while a profile fetch triggered by an
    /// auth-state change is in flight.
    pub loading: bool,
}

impl SessionState {
    /// State before the first session check resolves.
    pub fn initial() -> Self {
        Self {
            user: None,
            profile: None,
            session: None,
            loading: true,
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|user| &user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True when `user_id` is the current user.
    pub(crate) fn is_current(&self, user_id: &UserId) -> bool {
        self.user_id() == Some(user_id)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_empty_and_loading() {
        let state = SessionState::default();

        assert!(state.user.is_none());
        assert!(state.profile.is_none());
        assert!(state.session.is_none());
        assert!(state.loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn is_current_compares_user_ids() {
        let id = UserId::new("u1").unwrap();
        let state = SessionState {
            user: Some(AuthUser::new(id.clone(), None)),
            ..SessionState::initial()
        };

        assert!(state.is_current(&id));
        assert!(!state.is_current(&UserId::new("u2").unwrap()));
        assert!(!SessionState::initial().is_current(&id));
    }
}
