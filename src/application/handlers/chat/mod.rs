//! Chat turn handling.

mod process_turn;
mod turn_locks;

pub use process_turn::{
    DegradedReason, FailureReason, ProcessTurnCommand, ProcessTurnHandler, ProcessTurnResult,
    TurnOutcome, TurnStage, UserNotice,
};
pub use turn_locks::TurnLocks;
