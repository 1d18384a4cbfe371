//! Unified application error type.
//! All modules (db, core, cli, export, web) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Record file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid record kind: {0}")]
    InvalidKind(String),

    // ---------------------------
    // Record lifecycle errors
    // ---------------------------
    #[error("Record {0} not found")]
    NotFound(u64),

    #[error("Record {id}: {reason}")]
    InvalidTransition { id: u64, reason: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Server
    // ---------------------------
    #[error("Server error: {0}")]
    Server(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn transition(id: u64, reason: impl Into<String>) -> Self {
        AppError::InvalidTransition {
            id,
            reason: reason.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
