// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while substituting variables into a command template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("command template references unknown variable '${{{0}}}'")]
    MissingVariable(String),

    #[error("unterminated placeholder in command template token '{0}'")]
    UnterminatedPlaceholder(String),

    #[error("unterminated quote in '{0}'")]
    UnterminatedQuote(String),

    #[error("command template rendered to an empty command")]
    EmptyCommand,
}

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Cannot resolve job path '{path}': {source}")]
    Resolution {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for engine process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Signal handling error: {0}")]
    Signal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
