pub mod json_store;
pub mod store;

pub use json_store::JsonFileStore;
pub use store::{RecordStore, next_id};
