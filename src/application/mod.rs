//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers receive the tenant explicitly with every command or query.

pub mod handlers;

pub use handlers::chat::{
    ProcessTurnCommand, ProcessTurnHandler, ProcessTurnResult, TurnOutcome, UserNotice,
};
