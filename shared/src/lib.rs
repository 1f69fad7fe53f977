//! Shared utilities for the document upload backend
//!
//! Holds the pieces every service binary needs at startup: PostgreSQL
//! connection settings and the tracing subscriber setup.

pub mod database;
pub mod observability;
