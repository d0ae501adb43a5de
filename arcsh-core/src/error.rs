//! Error types for the archive shell.
//!
//! The `Display` text of the recoverable variants is exactly what the shell
//! prints back to the user, so the dispatcher renders them with `to_string()`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the archive or running a command.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Error: provided file is not a ZIP archive: {}", .0.display())]
    NotAnArchive(PathBuf),

    #[error("Error: directory not found.")]
    PathNotFound,

    #[error("Error: directory '{0}' is not empty. Remove all files inside first.")]
    DirectoryNotEmpty(String),

    #[error("Error: {0} command requires an argument.")]
    MissingArgument(&'static str),

    #[error("Error: too many arguments for '{0}'.")]
    TooManyArguments(&'static str),

    #[error("Unknown command.")]
    UnknownCommand(String),

    #[error("Unknown option")]
    UnknownOption(String),

    #[error("Error: file '{0}' not found.")]
    FileNotFound(String),

    #[error("Error: '{0}' is a directory.")]
    IsADirectory(String),

    #[error("Error: failed to rewrite archive: {0}")]
    ArchiveRewrite(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;
