use super::{kind::RecordKind, note::Note};
use serde::{Deserialize, Serialize};

/// Catch-all reason/hardware category; the description lives in the
/// matching `*_detail` field.
pub const OTHER_CATEGORY: &str = "other";

/// Kind-specific part of a record.
///
/// Serialized inline in the record with a `kind` tag, e.g.
/// `{"id": 3, "kind": "loan", "borrower": "...", "due_at": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Movement {
    Entry {
        #[serde(default)]
        in_stock: bool,
    },
    Exit,
    Loan {
        #[serde(default)]
        borrower: String,
        /// `DD/MM/YYYY HH:MM`
        #[serde(default)]
        due_at: String,
    },
}

impl Movement {
    pub fn kind(&self) -> RecordKind {
        match self {
            Movement::Entry { .. } => RecordKind::Entry,
            Movement::Exit => RecordKind::Exit,
            Movement::Loan { .. } => RecordKind::Loan,
        }
    }
}

/// Who submitted the record and from where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMeta {
    /// `web` or `cli`
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(default)]
    pub registered_at: String,
}

impl SubmissionMeta {
    pub fn cli(registered_at: impl Into<String>) -> Self {
        Self {
            source: "cli".to_string(),
            client_ip: None,
            registered_at: registered_at.into(),
        }
    }

    pub fn web(client_ip: Option<String>, registered_at: impl Into<String>) -> Self {
        Self {
            source: "web".to_string(),
            client_ip,
            registered_at: registered_at.into(),
        }
    }
}

/// One logged hardware movement.
///
/// Every field except `id` and `kind` is optional on disk, so files written
/// by older versions or edited by hand still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub movement: Movement,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub asset_tag: String,
    #[serde(default)]
    pub workflow: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub reason_detail: String,
    #[serde(default)]
    pub hardware: String,
    #[serde(default)]
    pub hardware_detail: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    /// `DD/MM/YYYY HH:MM`
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub returned: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<SubmissionMeta>,
}

impl Record {
    /// A blank record of the given movement; used by the registration
    /// logic and by tests.
    pub fn new(id: u64, movement: Movement) -> Self {
        Self {
            id,
            movement,
            responsible: String::new(),
            asset_tag: String::new(),
            workflow: String::new(),
            reason: String::new(),
            reason_detail: String::new(),
            hardware: String::new(),
            hardware_detail: String::new(),
            brand: String::new(),
            model: String::new(),
            started_at: String::new(),
            returned: false,
            hidden: false,
            status_text: None,
            notes: Vec::new(),
            submitted: None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.movement.kind()
    }

    pub fn is_entry(&self) -> bool {
        matches!(self.movement, Movement::Entry { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.movement, Movement::Exit)
    }

    pub fn is_loan(&self) -> bool {
        matches!(self.movement, Movement::Loan { .. })
    }

    /// `true` only for entries flagged as back in stock.
    pub fn in_stock(&self) -> bool {
        matches!(self.movement, Movement::Entry { in_stock: true })
    }

    pub fn borrower(&self) -> &str {
        match &self.movement {
            Movement::Loan { borrower, .. } => borrower,
            _ => "",
        }
    }

    pub fn due_at(&self) -> Option<&str> {
        match &self.movement {
            Movement::Loan { due_at, .. } => Some(due_at),
            _ => None,
        }
    }

    /// Trimmed workflow id, `None` when blank.
    pub fn workflow_id(&self) -> Option<&str> {
        let w = self.workflow.trim();
        if w.is_empty() { None } else { Some(w) }
    }

    pub fn has_other_reason(&self) -> bool {
        self.reason.trim().eq_ignore_ascii_case(OTHER_CATEGORY)
    }

    /// Reason as shown to users: the description for `other`, the category
    /// otherwise.
    pub fn reason_display(&self) -> &str {
        if self.has_other_reason() && !self.reason_detail.trim().is_empty() {
            self.reason_detail.trim()
        } else {
            &self.reason
        }
    }

    pub fn hardware_display(&self) -> &str {
        if self.hardware.trim().eq_ignore_ascii_case(OTHER_CATEGORY)
            && !self.hardware_detail.trim().is_empty()
        {
            self.hardware_detail.trim()
        } else {
            &self.hardware
        }
    }

    pub fn source(&self) -> &str {
        self.submitted.as_ref().map_or("", |m| m.source.as_str())
    }

    pub fn client_ip(&self) -> &str {
        self.submitted
            .as_ref()
            .and_then(|m| m.client_ip.as_deref())
            .unwrap_or("")
    }

    pub fn registered_at(&self) -> &str {
        self.submitted
            .as_ref()
            .map_or("", |m| m.registered_at.as_str())
    }
}
