//! Unified error handling for the santa-draw crate
//!
//! [`DrawError`] is the engine's own typed failure and is what library
//! callers match on. Everything around the engine (input files, config, the
//! CLI) reports through the crate-level [`Error`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use santa_draw::error::{Classify, Error};
//!
//! fn report(err: Error) {
//!     if err.is_recoverable() {
//!         println!("Fix and retry: {}", err.user_message());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::draw::error::DrawError;
pub use crate::draw::result::InvariantViolation;

/// Common classification interface for the crate's error types
pub trait Classify: std::error::Error {
    /// Whether the user can fix the input and try again
    fn is_recoverable(&self) -> bool;

    /// Message for the person running the draw
    fn user_message(&self) -> String;

    /// Error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed draw input (member count, duplicates)
    Validation,
    /// Constraints admit no assignment
    Constraints,
    /// An assignment list breaks the draw invariants
    Integrity,
    /// Reading or parsing files
    Input,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Constraints => "constraints",
            Self::Integrity => "integrity",
            Self::Input => "input",
        }
    }
}

impl Classify for DrawError {
    fn is_recoverable(&self) -> bool {
        DrawError::is_recoverable(self)
    }

    fn user_message(&self) -> String {
        DrawError::user_message(self)
    }

    fn category(&self) -> ErrorCategory {
        if self.is_validation() {
            ErrorCategory::Validation
        } else {
            ErrorCategory::Constraints
        }
    }
}

/// Unified error type for the santa-draw crate
#[derive(Error, Debug)]
pub enum Error {
    /// Draw validation or feasibility failure
    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),

    /// Stored assignments fail verification
    #[error("Invalid assignments: {0}")]
    Invariant(#[from] InvariantViolation),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Input file with an extension we can't parse
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

impl Classify for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Draw(e) => e.is_recoverable(),
            Self::Invariant(_) => false,
            Self::Io(_) => true,
            Self::Json(_) | Self::Toml(_) | Self::UnsupportedFormat(_) => true,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Draw(e) => e.user_message(),
            Self::Invariant(e) => format!("Stored assignments are not a valid draw: {e}"),
            Self::Io(e) => format!("Could not read input: {e}"),
            Self::Json(e) => format!("Malformed JSON input: {e}"),
            Self::Toml(e) => format!("Malformed TOML input: {e}"),
            Self::UnsupportedFormat(ext) => {
                format!("Unsupported input format '{ext}'. Use .json or .toml.")
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Draw(e) => e.category(),
            Self::Invariant(_) => ErrorCategory::Integrity,
            Self::Io(_) | Self::Json(_) | Self::Toml(_) | Self::UnsupportedFormat(_) => {
                ErrorCategory::Input
            }
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
