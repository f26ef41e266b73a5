//! Structured errors, serializable for the CLI's JSON output

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("[{code:?}] {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EditorNotRunning,
    StepFailed,
    Timeout,
    TemplateMissing,
    InvalidTitle,
    QueryFailed,
    Clipboard,
    Config,
    Io,
    Unknown,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestions: Vec::new(),
            context: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn editor_not_running(process: &str) -> Self {
        Self::new(
            ErrorCode::EditorNotRunning,
            format!("Editor process not running: {}", process),
        )
        .with_suggestions(vec![
            "Open a figure first, e.g. `figflow edit-figure <path>`".to_string(),
        ])
    }

    pub fn step_failed(command: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::StepFailed,
            format!("`{}` failed: {}", command, reason),
        )
    }

    pub fn timeout(what: &str, timeout_ms: u64) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Timeout after {}ms waiting for: {}", timeout_ms, what),
        )
    }

    pub fn template_missing(path: &std::path::Path) -> Self {
        Self::new(
            ErrorCode::TemplateMissing,
            format!("Template not found: {}", path.display()),
        )
        .with_suggestions(vec![
            "Set \"template\" in ~/.config/figflow/config.json".to_string(),
        ])
    }

    pub fn invalid_title(title: &str) -> Self {
        Self::new(
            ErrorCode::InvalidTitle,
            format!("Title {:?} does not produce a usable filename", title),
        )
    }

    pub fn query_failed(command: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::QueryFailed,
            format!("Could not read output of `{}`: {}", command, reason),
        )
    }

    pub fn clipboard(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::Clipboard, reason)
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, reason)
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorCode::Io, e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorCode::QueryFailed, e.to_string())
    }
}
