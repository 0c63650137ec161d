//! Dialog domain: turn requests, prompt assembly, transcripts and records.

mod assembler;
mod record;
mod transcript;
mod turn;

pub use assembler::{
    is_degraded_html, AssembledPrompt, PromptAssembler, PromptBudget, TurnText, IMPLICIT_SPEAKER,
};
pub use record::ConversationRecord;
pub use transcript::{join_entries, normalize_entries, parse_transcript, DialogEntry, DialogLimits};
pub use turn::{TurnFields, TurnRequest, DEFAULT_RESPONDENT, DEFAULT_USER_ID};
