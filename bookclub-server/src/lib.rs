//! Bookclub Server Library
//!
//! This module exports the server components for testing and reuse.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
