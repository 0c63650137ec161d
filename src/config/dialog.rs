//! Transcript budget and input limit configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialog::{DialogLimits, PromptBudget};
use crate::domain::text::InputLimits;

/// Limits applied to turn inputs, prompts and stored transcripts
#[derive(Debug, Clone, Deserialize)]
pub struct DialogConfig {
    /// Character budget shared by the transcript update and the model input
    #[serde(default = "default_max_dialog_length")]
    pub max_dialog_length: usize,

    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    #[serde(default = "default_max_situation_length")]
    pub max_situation_length: usize,

    /// Ceiling applied to the transcript written after a completed turn
    #[serde(default = "default_max_stored_length")]
    pub max_stored_length: usize,

    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    #[serde(default = "default_max_user_id_length")]
    pub max_user_id_length: usize,

    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Hold a per-user lock from transcript load to persist
    #[serde(default)]
    pub serialize_turns: bool,
}

impl DialogConfig {
    /// Budgets consumed by the prompt assembler
    pub fn prompt_budget(&self) -> PromptBudget {
        PromptBudget {
            max_total_length: self.max_dialog_length,
            max_message_length: self.max_message_length,
            max_situation_length: self.max_situation_length,
            max_stored_length: self.max_stored_length,
        }
    }

    /// Limits applied when a turn request is constructed
    pub fn input_limits(&self) -> InputLimits {
        InputLimits {
            max_message_length: self.max_message_length,
            max_name_length: self.max_name_length,
            max_user_id_length: self.max_user_id_length,
        }
    }

    /// Limits applied when a structured dialog replaces a transcript
    pub fn dialog_limits(&self) -> DialogLimits {
        DialogLimits {
            max_message_length: self.max_message_length,
            ..DialogLimits::default()
        }
    }

    /// Validate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let limits = [
            ("MAX_DIALOG_LENGTH", self.max_dialog_length),
            ("MAX_MESSAGE_LENGTH", self.max_message_length),
            ("MAX_SITUATION_LENGTH", self.max_situation_length),
            ("MAX_STORED_LENGTH", self.max_stored_length),
            ("MAX_NAME_LENGTH", self.max_name_length),
            ("MAX_USER_ID_LENGTH", self.max_user_id_length),
            ("DEFAULT_PAGE_SIZE", self.default_page_size as usize),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ValidationError::NonPositiveLimit(name));
            }
        }
        if self.default_page_size > self.max_page_size {
            return Err(ValidationError::InvalidPageSize);
        }
        if self.max_stored_length < self.max_dialog_length {
            return Err(ValidationError::StorageCeilingTooSmall);
        }
        Ok(())
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            max_dialog_length: default_max_dialog_length(),
            max_message_length: default_max_message_length(),
            max_situation_length: default_max_situation_length(),
            max_stored_length: default_max_stored_length(),
            max_name_length: default_max_name_length(),
            max_user_id_length: default_max_user_id_length(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            serialize_turns: false,
        }
    }
}

fn default_max_dialog_length() -> usize {
    1500
}

fn default_max_message_length() -> usize {
    1250
}

fn default_max_situation_length() -> usize {
    700
}

fn default_max_stored_length() -> usize {
    3300
}

fn default_max_name_length() -> usize {
    20
}

fn default_max_user_id_length() -> usize {
    256
}

fn default_page_size() -> u32 {
    100
}

fn default_max_page_size() -> u32 {
    1000
}
