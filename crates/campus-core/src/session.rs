//! Session state and its store.
//!
//! The original deployment kept the token and role in ambient browser
//! storage, read from anywhere. Here the session lives in one explicit
//! [`SessionStore`] value that is injected into whatever needs it, with
//! typed accessors and optional persistence to a TOML file so a restarted
//! client picks up where it left off.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  role::Role,
};

/// An authenticated session as returned by the login endpoint.
///
/// The token is opaque to the client. It is never validated locally;
/// a stale or forged token is only discovered when the backend rejects
/// the next request carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub token: String,
  pub role:  Role,
}

/// Holder for the current session, with optional on-disk persistence.
#[derive(Debug)]
pub struct SessionStore {
  path:    Option<PathBuf>,
  current: Option<Session>,
}

impl SessionStore {
  /// A store that lives only for the process lifetime.
  pub fn in_memory() -> Self {
    Self { path: None, current: None }
  }

  /// A store backed by a TOML file. Loads the existing session if the file
  /// is present and parseable; a missing file is simply "logged out".
  pub fn open(path: PathBuf) -> Result<Self> {
    let current = match std::fs::read_to_string(&path) {
      Ok(raw) => Some(
        toml::from_str(&raw)
          .map_err(|e| Error::SessionStore(format!("parsing {}: {e}", path.display())))?,
      ),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
      Err(e) => {
        return Err(Error::SessionStore(format!("reading {}: {e}", path.display())));
      }
    };
    Ok(Self { path: Some(path), current })
  }

  /// The current session, if logged in.
  pub fn get(&self) -> Option<&Session> {
    self.current.as_ref()
  }

  pub fn token(&self) -> Option<&str> {
    self.current.as_ref().map(|s| s.token.as_str())
  }

  pub fn role(&self) -> Option<Role> {
    self.current.as_ref().map(|s| s.role)
  }

  /// Install a new session (login success), persisting it if file-backed.
  pub fn set(&mut self, session: Session) -> Result<()> {
    if let Some(path) = &self.path {
      let raw = toml::to_string_pretty(&session)
        .map_err(|e| Error::SessionStore(format!("encoding session: {e}")))?;
      std::fs::write(path, raw)
        .map_err(|e| Error::SessionStore(format!("writing {}: {e}", path.display())))?;
    }
    self.current = Some(session);
    Ok(())
  }

  /// Drop the session (logout). Idempotent: clearing an already-empty
  /// store is a no-op, including on disk.
  pub fn clear(&mut self) -> Result<()> {
    self.current = None;
    if let Some(path) = &self.path {
      match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
          return Err(Error::SessionStore(format!("removing {}: {e}", path.display())));
        }
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn in_memory_set_get_clear() {
    let mut store = SessionStore::in_memory();
    assert!(store.get().is_none());

    store
      .set(Session { token: "t0k3n".into(), role: Role::Admin })
      .unwrap();
    assert_eq!(store.token(), Some("t0k3n"));
    assert_eq!(store.role(), Some(Role::Admin));

    store.clear().unwrap();
    assert!(store.get().is_none());
  }

  #[test]
  fn clear_is_idempotent() {
    let mut store = SessionStore::in_memory();
    store.clear().unwrap();
    store.clear().unwrap();
    assert!(store.get().is_none());
  }

  #[test]
  fn file_backed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.toml");

    let mut store = SessionStore::open(path.clone()).unwrap();
    assert!(store.get().is_none());
    store
      .set(Session { token: "abc".into(), role: Role::Student })
      .unwrap();

    // A fresh store reads the persisted session back.
    let reopened = SessionStore::open(path.clone()).unwrap();
    assert_eq!(reopened.get(), store.get());

    store.clear().unwrap();
    let reopened = SessionStore::open(path).unwrap();
    assert!(reopened.get().is_none());
  }
}
