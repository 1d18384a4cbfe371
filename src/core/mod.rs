pub mod actions;
pub mod backup;
pub mod register;
pub mod status;

pub use actions::RecordActions;
pub use register::{RegisterLogic, RegistrationForm};
pub use status::StatusEngine;
