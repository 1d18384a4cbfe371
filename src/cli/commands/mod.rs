pub mod actions;
pub mod add;
pub mod backup;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod serve;
pub mod show;

use crate::config::Config;
use crate::db::JsonFileStore;
use crate::errors::AppResult;

/// Open the record file named by the configuration.
pub(crate) fn open_store(cfg: &Config) -> AppResult<JsonFileStore> {
    JsonFileStore::open(&cfg.data_file)
}
