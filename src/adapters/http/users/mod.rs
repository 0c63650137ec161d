//! HTTP adapter for user endpoints.
//!
//! Users are provisioned, looked up, listed and deleted per tenant.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::UsersAppState;
pub use routes::users_router;
