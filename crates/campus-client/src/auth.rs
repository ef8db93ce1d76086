//! Authentication calls: login, logout, password reset.

use campus_core::{Result, role::Role, session::Session};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
  username: &'a str,
  password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
  jwt_token: String,
  role:      Role,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
  email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
  token:        &'a str,
  new_password: &'a str,
}

impl ApiClient {
  /// `POST /api/auth/login` — on success the returned session is also
  /// installed into the shared session handle (and persisted, if the
  /// store is file-backed).
  pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
    let resp = self
      .http()
      .post(self.url("/auth/login"))
      .json(&LoginRequest { username, password })
      .send()
      .await
      .map_err(|e| Self::transport("POST /auth/login", e))?;

    let resp = Self::check(resp, "login").await?;
    let body: LoginResponse = resp
      .json()
      .await
      .map_err(|e| Self::transport("deserialising login response", e))?;

    let session = Session { token: body.jwt_token, role: body.role };
    self.session().set(session.clone())?;
    tracing::info!(role = session.role.label(), "logged in");
    Ok(session)
  }

  /// Drop the stored session. Local only; the backend holds no session
  /// state to tear down. Safe to call when already logged out.
  pub fn logout(&self) -> Result<()> {
    self.session().clear()?;
    tracing::info!("logged out");
    Ok(())
  }

  /// `POST /api/auth/forgot-password/request`.
  ///
  /// The server answers with the same generic success regardless of
  /// whether the address is registered, so callers learn nothing about
  /// which emails exist. Surface its message verbatim.
  pub async fn request_password_reset(&self, email: &str) -> Result<String> {
    let resp = self
      .http()
      .post(self.url("/auth/forgot-password/request"))
      .json(&ForgotPasswordRequest { email })
      .send()
      .await
      .map_err(|e| Self::transport("POST /auth/forgot-password/request", e))?;

    let resp = Self::check(resp, "password reset request").await?;
    resp
      .text()
      .await
      .map_err(|e| Self::transport("reading reset response", e))
  }

  /// `POST /api/auth/forgot-password/reset` — redeem an emailed token.
  pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
    let resp = self
      .http()
      .post(self.url("/auth/forgot-password/reset"))
      .json(&ResetPasswordRequest { token, new_password })
      .send()
      .await
      .map_err(|e| Self::transport("POST /auth/forgot-password/reset", e))?;

    Self::check(resp, "password reset").await?;
    Ok(())
  }
}
