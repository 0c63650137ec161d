//! Adapters - Implementations of port interfaces.
//!
//! - `sqlite` - Transcript store over SQLite
//! - `memory` - In-memory transcript store for tests and development
//! - `model` - Completion backend clients
//! - `translation` - Translation service clients
//! - `http` - The REST API

pub mod http;
pub mod memory;
pub mod model;
pub mod sqlite;
pub mod translation;
