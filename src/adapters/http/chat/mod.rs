//! HTTP adapter for chat turns.
//!
//! - `POST /path` - Query-string turn, plain-text reply
//! - `POST /v1/waifu` - JSON turn, JSON reply with the user id

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{TurnParams, TurnResponse};
pub use handlers::ChatAppState;
pub use routes::chat_router;
