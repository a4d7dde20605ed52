use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Authenticated identity attempting an action (owner submitting, tenant
/// browsing). Supplied by the external identity provider; this crate only
/// ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

/// Narrow read interface the core consumes. Core logic never touches the
/// session store directly, only this trait.
pub trait IdentityProvider: Send + Sync {
    fn current_principal(&self) -> Option<Principal>;
}

/// Process-wide session state with an explicit restore/sign-out lifecycle.
///
/// Stands in for the identity collaborator's session handling: `restore`
/// rehydrates a persisted principal at startup, `sign_in`/`sign_out` are the
/// only mutations, and the core reads through [`IdentityProvider`].
#[derive(Debug, Default)]
pub struct SessionHandle {
    current: RwLock<Option<Principal>>,
}

impl SessionHandle {
    pub fn restore(principal: Option<Principal>) -> Self {
        Self {
            current: RwLock::new(principal),
        }
    }

    pub fn sign_in(&self, principal: Principal) {
        let mut guard = self.current.write().expect("session lock poisoned");
        *guard = Some(principal);
    }

    pub fn sign_out(&self) {
        let mut guard = self.current.write().expect("session lock poisoned");
        *guard = None;
    }
}

impl IdentityProvider for SessionHandle {
    fn current_principal(&self) -> Option<Principal> {
        self.current.read().expect("session lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Principal {
        Principal {
            id: "owner-1".to_string(),
            email: "owner-1@example.com".to_string(),
        }
    }

    #[test]
    fn restore_then_sign_out_round_trips() {
        let session = SessionHandle::restore(Some(owner()));
        assert_eq!(session.current_principal(), Some(owner()));

        session.sign_out();
        assert_eq!(session.current_principal(), None);

        session.sign_in(owner());
        assert_eq!(session.current_principal(), Some(owner()));
    }

    #[test]
    fn fresh_session_has_no_principal() {
        let session = SessionHandle::default();
        assert!(session.current_principal().is_none());
    }
}
