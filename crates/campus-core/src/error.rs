//! Error types for `campus-core` and the client crates built on it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request never produced an HTTP response (DNS, connect, timeout).
  #[error("transport error: {0}")]
  Transport(String),

  /// The server answered with a non-success status and a readable message.
  #[error("server error ({status}): {message}")]
  Api { status: u16, message: String },

  /// Missing, expired, or wrong-role credentials (401/403).
  #[error("not authorized: {0}")]
  Unauthorized(String),

  /// The requested record does not exist (404).
  #[error("not found: {0}")]
  NotFound(String),

  /// A draft failed local required-field checks before submission.
  #[error("validation: {0}")]
  Validation(String),

  /// Reading or writing the on-disk session file failed.
  #[error("session store: {0}")]
  SessionStore(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// True for 404s, which call sites on optional relations treat as a
  /// normal empty state rather than a failure.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Error::NotFound(_))
  }

  /// True when the stored token was rejected and the session should be
  /// considered dead.
  pub fn is_unauthorized(&self) -> bool {
    matches!(self, Error::Unauthorized(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
