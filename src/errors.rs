//! Unified application error type.
//! All modules (config, store, core, cli) return AppError to keep the error
//! handling consistent and easy to surface to the user.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Ledger file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    // ---------------------------
    // Malformed data
    // ---------------------------
    #[error("Corrupt persisted data: {0}")]
    Decode(String),

    #[error("Malformed import document: {0}")]
    Parse(String),

    #[error("Invalid record at position {position}: {reason}")]
    Validation { position: usize, reason: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config / domain rules
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown work area '{0}'")]
    InvalidArea(String),

    #[error("Monthly goal already reached ({count}/{goal}); confirm to record an extra day")]
    GoalReached { count: usize, goal: u32 },

    // ---------------------------
    // Export
    // ---------------------------
    #[error("Serialization error: {0}")]
    Serialize(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures raised by the ledger backend itself.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Db(_) | AppError::Csv(_) | AppError::Storage(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
