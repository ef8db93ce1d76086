//! Shared handle over the session store.
//!
//! One [`SessionHandle`] is created at startup and cloned into the HTTP
//! client (for token attachment) and the router (for gate checks). All
//! mutation happens through login and logout, on the single UI task; the
//! mutex exists because `reqwest` futures are `Send`, not because two
//! writers ever race.

use std::sync::{Arc, Mutex};

use campus_core::{
  Result,
  role::Role,
  session::{Session, SessionStore},
};

/// Cloneable, injectable access to the current session.
#[derive(Clone)]
pub struct SessionHandle {
  store: Arc<Mutex<SessionStore>>,
}

impl SessionHandle {
  pub fn new(store: SessionStore) -> Self {
    Self { store: Arc::new(Mutex::new(store)) }
  }

  pub fn session(&self) -> Option<Session> {
    self.store.lock().expect("session store poisoned").get().cloned()
  }

  pub fn token(&self) -> Option<String> {
    self.session().map(|s| s.token)
  }

  pub fn role(&self) -> Option<Role> {
    self.session().map(|s| s.role)
  }

  pub fn is_authenticated(&self) -> bool {
    self.session().is_some()
  }

  /// Install a session after a successful login.
  pub fn set(&self, session: Session) -> Result<()> {
    self.store.lock().expect("session store poisoned").set(session)
  }

  /// Drop the session. Idempotent.
  pub fn clear(&self) -> Result<()> {
    self.store.lock().expect("session store poisoned").clear()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn handle_clones_share_state() {
    let handle = SessionHandle::new(SessionStore::in_memory());
    let other = handle.clone();

    handle
      .set(Session { token: "abc".into(), role: Role::Educator })
      .unwrap();
    assert_eq!(other.role(), Some(Role::Educator));

    other.clear().unwrap();
    assert!(!handle.is_authenticated());
  }
}
