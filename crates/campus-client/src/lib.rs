//! Async HTTP client and resource-management state machines for the
//! campus REST API.
//!
//! The backend is an external collaborator: paginated JSON/multipart CRUD
//! under `/api/admin`, auth under `/api/auth`, and per-role dashboard
//! reads under `/api/student` and `/api/educator`. Everything here is
//! client state; the server remains the source of truth, and the client
//! resynchronizes with a fresh list fetch after every mutation.

// Native async fn in traits; the advisory lint about Send bounds does not
// apply to this single-runtime client.
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod backend;
pub mod client;
pub mod manager;
pub mod portal;
pub mod refdata;
pub mod session;

#[cfg(test)]
mod tests;

pub use client::{ApiClient, ApiConfig};
pub use manager::{FetchTicket, Modal, ResourceManager};
pub use session::SessionHandle;
