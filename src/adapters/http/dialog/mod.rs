//! HTTP adapter for dialog-as-data endpoints.
//!
//! A transcript can be read raw or as `[{index, name, message}]`, replaced
//! with such a list, or reset to empty.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{DialogJsonResponse, DialogStrResponse, SetDialogRequest};
pub use handlers::DialogAppState;
pub use routes::dialog_router;
