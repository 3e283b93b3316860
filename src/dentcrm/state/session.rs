use crate::model::{Role, Session};
use serde::{Deserialize, Serialize};

/// Zero or one logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionSlice {
    current: Option<Session>,
}

impl SessionSlice {
    /// Replaces whatever session is there. No validation.
    pub fn set(&mut self, session: Session) {
        self.current = Some(session);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|s| s.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dentist() -> Session {
        Session::new("u1", "a@b.com", Role::Dentist)
    }

    #[test]
    fn set_then_read_returns_same_session() {
        let mut slice = SessionSlice::default();
        slice.set(dentist());
        assert_eq!(slice.current(), Some(&dentist()));
        assert_eq!(slice.role(), Some(Role::Dentist));
    }

    #[test]
    fn set_replaces_wholesale() {
        let mut slice = SessionSlice::default();
        slice.set(dentist().with_token("old"));
        let clinic = Session::new("u2", "desk@clinic.it", Role::Clinic);
        slice.set(clinic.clone());
        assert_eq!(slice.current(), Some(&clinic));
    }

    #[test]
    fn clear_always_leaves_absent() {
        let mut slice = SessionSlice::default();
        slice.clear();
        assert!(slice.current().is_none());

        slice.set(dentist());
        slice.clear();
        assert!(!slice.is_authenticated());
        assert_eq!(slice.role(), None);
    }

    #[test]
    fn absent_session_serializes_as_null() {
        let json = serde_json::to_string(&SessionSlice::default()).unwrap();
        assert_eq!(json, "null");
    }
}
