use crate::utils::date::format_local;
use chrono::NaiveDateTime;
use std::fmt;

/// Derived, human-facing status of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLabel {
    /// Soft-deleted.
    Deleted,
    Returned,
    /// Returned, with the override text stored on the record
    /// (e.g. `Returned (ID: 12)`).
    Custom(String),
    /// Loan past its due date; carries the parsed due timestamp.
    Overdue(NaiveDateTime),
    InStock,
    Active,
    /// Entries and exits without any special state.
    Empty,
}

impl StatusLabel {
    /// Stable machine tag, used for CSS classes and export filters.
    pub fn tag(&self) -> &'static str {
        match self {
            StatusLabel::Deleted => "deleted",
            StatusLabel::Returned | StatusLabel::Custom(_) => "returned",
            StatusLabel::Overdue(_) => "overdue",
            StatusLabel::InStock => "in_stock",
            StatusLabel::Active => "active",
            StatusLabel::Empty => "none",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::Deleted => f.write_str("Deleted"),
            StatusLabel::Returned => f.write_str("Returned"),
            StatusLabel::Custom(text) => f.write_str(text),
            StatusLabel::Overdue(due) => write!(f, "Overdue ({})", format_local(due)),
            StatusLabel::InStock => f.write_str("In stock"),
            StatusLabel::Active => f.write_str("Active"),
            StatusLabel::Empty => Ok(()),
        }
    }
}
