use crate::commands::{clean, CmdMessage, CmdResult};
use crate::error::{CrmError, Result};
use crate::model::{Role, Session};
use crate::store::{RecordStore, StorageBackend};
use chrono::Utc;

/// What the login view collected.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub token: Option<String>,
}

pub fn login<B: StorageBackend>(
    store: &mut RecordStore<B>,
    credentials: Credentials,
) -> Result<CmdResult> {
    let user_id = credentials.user_id.trim();
    let email = credentials.email.trim();
    if user_id.is_empty() {
        return Err(CrmError::Api("User id cannot be empty".into()));
    }
    if !email.contains('@') {
        return Err(CrmError::Api(format!("Invalid email: {}", email)));
    }

    let mut session = Session::new(user_id, email, credentials.role).stamped(Utc::now());
    session.token = clean(credentials.token);

    let mut result = CmdResult::default();
    if let Some(previous) = store.session() {
        result.add_message(CmdMessage::info(format!(
            "Replacing session of {}",
            previous.email
        )));
    }
    store.set_session(session.clone());
    result.add_message(CmdMessage::success(format!(
        "Logged in as {} ({})",
        session.email, session.role
    )));
    Ok(result.with_session(Some(session)))
}

pub fn logout<B: StorageBackend>(store: &mut RecordStore<B>) -> Result<CmdResult> {
    let previous = store.session();
    store.clear_session();

    let mut result = CmdResult::default();
    match previous {
        Some(session) => {
            result.add_message(CmdMessage::success(format!("Logged out {}", session.email)))
        }
        None => result.add_message(CmdMessage::info("No active session")),
    }
    Ok(result)
}

pub fn whoami<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let session = store.session();
    let mut result = CmdResult::default();
    if session.is_none() {
        result.add_message(CmdMessage::info("Not logged in"));
    }
    Ok(result.with_session(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn creds(email: &str) -> Credentials {
        Credentials {
            user_id: "u1".into(),
            email: email.into(),
            role: Role::Dentist,
            token: None,
        }
    }

    #[test]
    fn login_stores_stamped_session() {
        let mut store = RecordStore::open(MemBackend::new());
        let result = login(&mut store, creds("a@b.com")).unwrap();

        let stored = store.session().unwrap();
        assert_eq!(stored.user_id, "u1");
        assert_eq!(stored.role, Role::Dentist);
        assert!(stored.logged_in_at.is_some());
        assert_eq!(result.session, Some(stored));
    }

    #[test]
    fn relogin_replaces_session() {
        let mut store = RecordStore::open(MemBackend::new());
        login(&mut store, creds("a@b.com")).unwrap();
        let result = login(&mut store, creds("c@d.com")).unwrap();

        assert_eq!(store.session().unwrap().email, "c@d.com");
        assert!(result.messages[0].content.contains("a@b.com"));
    }

    #[test]
    fn blank_token_is_dropped() {
        let mut store = RecordStore::open(MemBackend::new());
        let mut c = creds("a@b.com");
        c.token = Some("   ".into());
        login(&mut store, c).unwrap();
        assert_eq!(store.session().unwrap().token, None);
    }

    #[test]
    fn login_rejects_bad_email() {
        let mut store = RecordStore::open(MemBackend::new());
        assert!(login(&mut store, creds("nobody")).is_err());
        assert!(store.session().is_none());
    }

    #[test]
    fn logout_without_session_is_fine() {
        let mut store = RecordStore::open(MemBackend::new());
        let result = logout(&mut store).unwrap();
        assert_eq!(result.messages[0].content, "No active session");
        assert!(store.session().is_none());
    }

    #[test]
    fn logout_clears_session() {
        let mut store = RecordStore::open(MemBackend::new());
        login(&mut store, creds("a@b.com")).unwrap();
        logout(&mut store).unwrap();
        assert!(whoami(&store).unwrap().session.is_none());
    }
}
