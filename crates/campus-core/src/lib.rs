//! Core types for the campus terminal client.
//!
//! This crate is deliberately free of HTTP and terminal dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod class_room;
pub mod educator;
pub mod error;
pub mod feedback;
pub mod page;
pub mod patch;
pub mod resource;
pub mod role;
pub mod session;
pub mod student;
pub mod subject;

pub use error::{Error, Result};
