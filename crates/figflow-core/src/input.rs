//! Simulated keyboard input

use crate::apps::{escape, osascript};
use crate::runner::Cmd;

/// Press a keyboard shortcut (e.g. `v` with `["control"]`).
pub fn shortcut(key: &str, modifiers: &[&str]) -> Cmd {
    let modifier_str = modifiers
        .iter()
        .map(|m| format!("{} down", m))
        .collect::<Vec<_>>()
        .join(", ");

    osascript(&format!(
        r#"tell application "System Events" to keystroke "{}" using {{{}}}"#,
        escape(key),
        modifier_str
    ))
}

/// Ctrl+V, the paste binding inside XQuartz apps.
pub fn paste() -> Cmd {
    shortcut("v", &["control"])
}
