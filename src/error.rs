//! Error type for operations that can be refused or fail.
//!
//! Texture failures and stale body references never show up here: the first is
//! recovered with a fallback color, the second is a silent no-op.

use std::path::PathBuf;

/// Errors surfaced to the caller (and, in the app, to the status line).
#[derive(thiserror::Error, Debug)]
pub enum OrreryError {
    #[error("there is no system to save")]
    EmptyRegistry,

    #[error("system name must not be empty")]
    EmptySystemName,

    #[error("no saved system named {0:?}")]
    UnknownSystem(String),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("invalid body {name:?}: {reason}")]
    InvalidBody { name: String, reason: &'static str },

    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{path} does not hold a JSON object")]
    StoreNotObject { path: PathBuf },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = OrreryError> = std::result::Result<T, E>;
