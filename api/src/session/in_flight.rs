use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::session::role::Role;

/// Tracks login submissions that are awaiting the rental API, so a second
/// submit for the same account is refused instead of racing the first.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: Mutex<HashSet<(Role, String)>>,
}

impl InFlight {
    /// Marks `(role, email)` as busy. Returns `None` if it already is.
    pub fn begin(&self, role: Role, email: &str) -> Option<InFlightTicket<'_>> {
        let key = (role, email.trim().to_ascii_lowercase());
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.insert(key.clone()) {
            return None;
        }
        Some(InFlightTicket { owner: self, key })
    }

    #[cfg(test)]
    fn is_pending(&self, role: Role, email: &str) -> bool {
        let key = (role, email.trim().to_ascii_lowercase());
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }
}

/// Released when the request that owns it completes.
#[derive(Debug)]
pub struct InFlightTicket<'a> {
    owner: &'a InFlight,
    key: (Role, String),
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.owner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_submission_is_refused_until_first_completes() {
        let logins = InFlight::default();

        let first = logins.begin(Role::User, "a@b.com");
        assert!(first.is_some());
        assert!(logins.begin(Role::User, " A@B.com ").is_none());
        // other role spaces are independent
        assert!(logins.begin(Role::Admin, "a@b.com").is_some());

        drop(first);
        assert!(!logins.is_pending(Role::User, "a@b.com"));
        assert!(logins.begin(Role::User, "a@b.com").is_some());
    }
}
