//! Per-route screen state.

pub mod admin;
pub mod educator;
pub mod student;
