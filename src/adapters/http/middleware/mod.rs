//! HTTP extractors for cross-cutting request data.
//!
//! - `tenant` - The calling tenant, taken from the `current-user` header

pub mod tenant;

pub use tenant::{CurrentTenant, TENANT_HEADER};
