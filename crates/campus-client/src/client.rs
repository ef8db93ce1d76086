//! Async HTTP client wrapping the campus JSON/multipart API.

use std::time::Duration;

use campus_core::{Error, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::session::SessionHandle;

/// Connection settings for the campus API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the campus REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based and the
/// session handle is shared. Every authenticated request reads the token
/// from the handle at send time, so a login or logout is visible to all
/// clones immediately.
#[derive(Clone)]
pub struct ApiClient {
  http:    Client,
  config:  ApiConfig,
  session: SessionHandle,
}

impl ApiClient {
  pub fn new(config: ApiConfig, session: SessionHandle) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(|e| Error::Transport(format!("building HTTP client: {e}")))?;
    Ok(Self { http, config, session })
  }

  pub fn session(&self) -> &SessionHandle {
    &self.session
  }

  pub(crate) fn http(&self) -> &Client {
    &self.http
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Attach the stored bearer token, if logged in. No local validity
  /// check: a stale token is only discovered when the server rejects it.
  pub(crate) fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    match self.session.token() {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Map a non-success response to a typed error, pulling the server's
  /// `message`/`error` field out of the body when present.
  pub(crate) async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|body| server_message(&body))
      .unwrap_or_else(|| format!("{what} failed ({status})"));

    tracing::debug!(%status, what, %message, "request rejected");
    match status {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthorized(message)),
      StatusCode::NOT_FOUND => Err(Error::NotFound(message)),
      _ => Err(Error::Api { status: status.as_u16(), message }),
    }
  }

  pub(crate) fn transport(what: &str, err: reqwest::Error) -> Error {
    Error::Transport(format!("{what}: {err}"))
  }
}

/// Extract a human-readable message from an error body.
fn server_message(body: &serde_json::Value) -> Option<String> {
  body
    .get("message")
    .or_else(|| body.get("error"))
    .and_then(|m| m.as_str())
    .map(str::to_owned)
}

#[cfg(test)]
mod tests {
  use super::*;
  use campus_core::session::SessionStore;

  fn client(base_url: &str) -> ApiClient {
    ApiClient::new(
      ApiConfig { base_url: base_url.into() },
      SessionHandle::new(SessionStore::in_memory()),
    )
    .unwrap()
  }

  #[test]
  fn url_joins_under_api_prefix() {
    let c = client("http://localhost:8080");
    assert_eq!(c.url("/admin/students"), "http://localhost:8080/api/admin/students");

    // Trailing slash on the base URL must not double up.
    let c = client("http://localhost:8080/");
    assert_eq!(c.url("/auth/login"), "http://localhost:8080/api/auth/login");
  }

  #[test]
  fn server_message_prefers_message_over_error() {
    let body = serde_json::json!({ "message": "username taken", "error": "Bad Request" });
    assert_eq!(server_message(&body).as_deref(), Some("username taken"));

    let body = serde_json::json!({ "error": "Bad Request" });
    assert_eq!(server_message(&body).as_deref(), Some("Bad Request"));

    let body = serde_json::json!({ "status": 500 });
    assert_eq!(server_message(&body), None);
  }
}
