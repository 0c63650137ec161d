//! Request and response types for the dialog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::dialog::DialogEntry;

/// Structured dialog of a user; `dialog` is null for unknown users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogJsonResponse {
    pub user_id: String,
    pub dialog: Option<Vec<DialogEntry>>,
}

/// Raw transcript of a user; `dialog` is null for unknown users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogStrResponse {
    pub user_id: String,
    pub dialog: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetDialogRequest {
    #[serde(default)]
    pub dialog: Vec<DialogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_without_index_deserialize() {
        let request: SetDialogRequest =
            serde_json::from_str(r#"{"dialog": [{"name": "Alice", "message": "Hi"}]}"#).unwrap();
        assert_eq!(request.dialog, vec![DialogEntry::new(0, "Alice", "Hi")]);
    }

    #[test]
    fn missing_dialog_is_empty() {
        let request: SetDialogRequest = serde_json::from_str("{}").unwrap();
        assert!(request.dialog.is_empty());
    }
}
