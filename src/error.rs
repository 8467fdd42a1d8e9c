// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for contrastbot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContrastError>;

#[derive(Error, Debug)]
pub enum ContrastError {
    #[error("Invalid color format: {value:?} (expected 6 hex digits, optional leading '#')")]
    InvalidColorFormat { value: String },

    #[error("Unknown color token: {name:?}")]
    UnknownColorToken { name: String },

    #[error("Duplicate color token: {name:?}")]
    DuplicateToken { name: String },

    #[error("Cannot audit an empty assertion set")]
    EmptyAssertionSet,

    #[error("Unknown theme: {name:?}")]
    UnknownTheme { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ContrastError {
    pub(crate) fn invalid_color(value: &str) -> Self {
        ContrastError::InvalidColorFormat {
            value: value.to_string(),
        }
    }

    pub(crate) fn unknown_token(name: &str) -> Self {
        ContrastError::UnknownColorToken {
            name: name.to_string(),
        }
    }
}
