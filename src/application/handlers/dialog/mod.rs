//! Dialog-as-data handlers: read, replace and reset a user's transcript.

mod get_dialog;
mod reset_dialog;
mod set_dialog;

pub use get_dialog::{GetDialogHandler, GetDialogQuery};
pub use reset_dialog::{ResetDialogCommand, ResetDialogHandler};
pub use set_dialog::{SetDialogCommand, SetDialogHandler};
