//! Prompt Assembler.
//!
//! Turns one exchange plus the stored history into two strings under a shared
//! character budget:
//!
//! - the *transcript update*, persisted once the model has answered;
//! - the *model input*, the same text with the scenario preamble and genre tag.
//!
//! Budgets are consumed in a fixed order. The situation is truncated first and
//! whatever it leaves over (`remaining`) bounds the history, the update and the
//! model input. Every truncation keeps the suffix, so an over-budget prompt
//! loses its oldest material and always ends with the respondent's open quote.

use crate::domain::text::{clean_paragraph, tail_chars};

/// Speaker label used when a message arrives without a sender name.
pub const IMPLICIT_SPEAKER: &str = "You";

/// Character budgets for assembling and storing a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBudget {
    /// Shared bound for the transcript update and the model input.
    pub max_total_length: usize,
    pub max_message_length: usize,
    pub max_situation_length: usize,
    /// Independent ceiling for the transcript written after a completion.
    pub max_stored_length: usize,
}

impl Default for PromptBudget {
    fn default() -> Self {
        Self {
            max_total_length: 1500,
            max_message_length: 1250,
            max_situation_length: 700,
            max_stored_length: 3300,
        }
    }
}

/// Inputs of a single assembly, borrowed from the turn being processed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnText<'a> {
    pub old_transcript: &'a str,
    pub situation: &'a str,
    pub from_name: &'a str,
    pub to_name: &'a str,
    /// Message in the pivot language.
    pub message: &'a str,
}

/// Result of assembling one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    /// History plus the new exchange, ending in the respondent's open quote.
    pub transcript_update: String,
    /// What is sent to the completion backend.
    pub model_input: String,
}

#[derive(Debug, Clone)]
pub struct PromptAssembler {
    budget: PromptBudget,
    genre: String,
}

impl PromptAssembler {
    pub fn new(budget: PromptBudget, genre: impl Into<String>) -> Self {
        Self {
            budget,
            genre: genre.into(),
        }
    }

    pub fn budget(&self) -> &PromptBudget {
        &self.budget
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Builds the transcript update and the model input for one turn.
    ///
    /// Never fails. A situation longer than the total budget leaves no room
    /// for anything else, and both outputs come back empty.
    pub fn assemble(&self, turn: &TurnText<'_>) -> AssembledPrompt {
        let message_clean = clean_paragraph(turn.message);
        let message = tail_chars(&message_clean, self.budget.max_message_length);
        let situation_clean = clean_paragraph(turn.situation);
        let situation = tail_chars(&situation_clean, self.budget.max_situation_length);

        let remaining = self
            .budget
            .max_total_length
            .saturating_sub(situation.chars().count());

        let old = tail_chars(turn.old_transcript, remaining);
        let exchange = speaker_turn(turn.from_name, turn.to_name, message);

        let update = format!("{old} {exchange}");
        let model_input = format!("[ Genre: {} ] {old} {situation} {exchange}", self.genre);

        AssembledPrompt {
            transcript_update: tail_chars(&update, remaining).to_string(),
            model_input: tail_chars(&model_input, remaining).to_string(),
        }
    }

    /// Closes the respondent's turn with the completion and applies the storage ceiling.
    pub fn finalize(&self, transcript_update: &str, completion: &str) -> String {
        let closed = format!("{transcript_update}{completion}\"");
        tail_chars(&closed, self.budget.max_stored_length).to_string()
    }
}

/// Renders the new exchange, ending with the respondent's open quote.
fn speaker_turn(from_name: &str, to_name: &str, message: &str) -> String {
    if from_name.is_empty() && message.is_empty() {
        return format!("{to_name} said: \"");
    }
    let speaker = if from_name.is_empty() {
        IMPLICIT_SPEAKER
    } else {
        from_name
    };
    format!("{speaker} said: \"{message}\" {to_name} said: \"")
}

/// True when a completion is really an HTML error page from the backend.
pub fn is_degraded_html(completion: &str) -> bool {
    const MARKERS: [&str; 2] = ["<!DOCTYPE HTML", "!DOCTYPE HTML"];
    let head = completion.trim_start();
    MARKERS.iter().any(|marker| {
        head.get(..marker.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(marker))
    })
}
