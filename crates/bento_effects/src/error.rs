//! # Configuration Error Types
//!
//! The effects themselves never fail: a missing card or section simply
//! means no effect. Loading configuration is the one fallible step.

use std::path::PathBuf;

use bento_ui::ParseColorError;
use thiserror::Error;

/// Errors that can occur while loading effect configuration or card content.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The TOML was malformed or had the wrong shape.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The glow color was not an `r,g,b` triple.
    #[error("invalid glow color: {0}")]
    InvalidGlowColor(#[from] ParseColorError),

    /// The spotlight radius was not a positive finite number.
    #[error("spotlight radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// The responsive breakpoint was negative or not finite.
    #[error("breakpoint must be non-negative and finite, got {0}")]
    InvalidBreakpoint(f32),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
