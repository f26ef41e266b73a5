//! Tool configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. Looked up at `~/.config/figflow/config.json` unless a path is
//! given explicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_RELATIVE: &str = ".config/figflow/config.json";
const FIGURES_DIR: &str = "figures";

/// Inkscape command-line dialect used for PDF+LaTeX export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportSyntax {
    /// Inkscape 0.92: `-f in.svg -A out.pdf --export-latex`
    Legacy,
    /// Inkscape 1.x: `in.svg --export-filename=out.pdf --export-latex`
    Modern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub template: PathBuf,
    pub editor: String,
    pub editor_process: String,
    pub export_syntax: ExportSyntax,
    pub window_manager: String,
    pub chooser: String,
    pub accent_color: String,
    pub scratch_buffer: PathBuf,
    pub terminal_app: String,
    pub terminal_bounds: [i32; 4],
    pub snippet_editor: String,
    pub close_terminal: Vec<String>,
    pub paste_target: String,
    pub poll_interval_ms: u64,
    pub paste_delay_ms: u64,
    pub snippet_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: default_template(),
            editor: "inkscape".to_string(),
            editor_process: "inkscape-bin".to_string(),
            export_syntax: ExportSyntax::Legacy,
            window_manager: "yabai".to_string(),
            chooser: "choose".to_string(),
            accent_color: "85c1e9".to_string(),
            scratch_buffer: PathBuf::from("/tmp/latex-temp.text"),
            terminal_app: "iTerm2".to_string(),
            terminal_bounds: [60, 690, 700, 800],
            snippet_editor: "vim".to_string(),
            close_terminal: vec!["tmux".to_string(), "kill-pane".to_string()],
            paste_target: "XQuartz".to_string(),
            poll_interval_ms: 10,
            paste_delay_ms: 100,
            snippet_timeout_ms: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Explicit path if given, else the per-user file when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match user_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn figures_dir(&self, root: &Path) -> PathBuf {
        root.join(FIGURES_DIR)
    }
}

fn user_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(CONFIG_RELATIVE))
}

// template.svg is installed next to the binary.
fn default_template() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| fs::canonicalize(exe).ok())
        .and_then(|exe| exe.parent().map(|dir| dir.join("template.svg")))
        .unwrap_or_else(|| PathBuf::from("template.svg"))
}
