use serde::{Deserialize, Serialize};

/// A free-text annotation appended to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub text: String,
    /// `DD/MM/YYYY HH:MM`; parsed tolerantly when evaluated.
    #[serde(default)]
    pub recorded_at: String,
}

impl Note {
    pub fn new(text: impl Into<String>, recorded_at: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recorded_at: recorded_at.into(),
        }
    }
}
