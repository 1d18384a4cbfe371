pub mod kind;
pub mod note;
pub mod record;
pub mod status;

pub use kind::RecordKind;
pub use note::Note;
pub use record::{Movement, Record, SubmissionMeta};
pub use status::StatusLabel;
