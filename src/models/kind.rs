use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The three movement kinds a record can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Entry,
    Exit,
    Loan,
}

impl RecordKind {
    /// Parse a kind coming from a form or the CLI (case-insensitive).
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Some(Self::Entry),
            "exit" => Some(Self::Exit),
            "loan" => Some(Self::Loan),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Entry => "entry",
            RecordKind::Exit => "exit",
            RecordKind::Loan => "loan",
        }
    }

    /// Human label used by the list views.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Entry => "Entry",
            RecordKind::Exit => "Exit",
            RecordKind::Loan => "Loan",
        }
    }
}
