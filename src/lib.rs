//! Planboard - view and edit a project migration plan from the terminal.
//!
//! This library provides the core functionality for the `pb` CLI tool:
//! the plan document model, pure edit operations, derived views (timeline,
//! progress, theme), comments and the local store.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod comments;
pub mod config;
pub mod edit;
pub mod logging;
pub mod models;
pub mod storage;
pub mod views;


/// Library-level error type for planboard operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for planboard operations.
pub type Result<T> = std::result::Result<T, Error>;
