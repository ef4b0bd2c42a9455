//! Structured error types for planner generation.
//!
//! The variants follow the three real failure classes: a config that never
//! should have reached the engine, a document writer that gave up, and a run
//! that was cancelled from outside. Link targets that don't resolve are not
//! errors and never show up here.

use std::fmt;

use thiserror::Error;

/// Where in the pipeline a writer failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Pass 1: creating a blank page per graph node.
    Allocate,
    /// Pass 2: drawing content and link annotations.
    Render,
    /// Final encoding of the whole document.
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Allocate => write!(f, "page allocation"),
            Stage::Render => write!(f, "page rendering"),
            Stage::Encode => write!(f, "document encoding"),
        }
    }
}

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// JSON input failed to parse as a planner config.
    #[error("Failed to parse planner config: {source}{}", hint_suffix(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A config value is out of range or malformed.
    #[error("Invalid config `{field}`: {message}")]
    ConfigError { field: &'static str, message: String },

    /// The device/orientation pair is recognized but not enabled.
    #[error("Unsupported layout: device `{device}` in {orientation} orientation is not enabled")]
    UnsupportedLayout { device: String, orientation: String },

    /// An embedded image could not be read or decoded.
    #[error("Image error: {0}")]
    ImageError(String),

    /// The document writer failed.
    #[error("{stage} failed{}: {message}", page_suffix(.page))]
    WriterError {
        stage: Stage,
        page: Option<String>,
        message: String,
    },

    /// The generation task was cancelled before it finished.
    #[error("Generation cancelled")]
    Cancelled,

    /// The generation thread died without reporting a result.
    #[error("Generation aborted: {0}")]
    Aborted(String),
}

impl FolioError {
    pub fn config(field: &'static str, message: impl Into<String>) -> Self {
        FolioError::ConfigError {
            field,
            message: message.into(),
        }
    }

    pub fn writer(stage: Stage, page: Option<String>, message: impl Into<String>) -> Self {
        FolioError::WriterError {
            stage,
            page,
            message: message.into(),
        }
    }

    /// Attach the offending page to a writer failure that doesn't have one yet.
    pub fn on_page(self, page: &str) -> Self {
        match self {
            FolioError::WriterError {
                stage,
                page: None,
                message,
            } => FolioError::WriterError {
                stage,
                page: Some(page.to_string()),
                message,
            },
            other => other,
        }
    }
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

fn page_suffix(page: &Option<String>) -> String {
    match page {
        Some(id) => format!(" on page `{}`", id),
        None => String::new(),
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the planner config schema. Check field names and enum values.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::ParseError { source: e, hint }
    }
}
