//! Ephemeral yabai spaces for hosting the vector editor
//!
//! A [`DesktopSession`] creates a floating space, focuses it, and on drop
//! destroys it and returns focus to the space that was active before.
//! The new space's index is assumed to be `count + 1`; nothing verifies
//! this if spaces change concurrently.

use crate::error::{Error, Result};
use crate::runner::{run_steps, Cmd, Runner, Step};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

/// One entry of `yabai -m query --spaces`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceInfo {
    pub index: u32,
    /// Older yabai reports `focused: 1`.
    #[serde(default)]
    pub focused: Option<serde_json::Value>,
    /// Newer yabai reports `has-focus: true`.
    #[serde(rename = "has-focus", default)]
    pub has_focus: Option<bool>,
}

impl SpaceInfo {
    pub fn is_focused(&self) -> bool {
        if self.has_focus == Some(true) {
            return true;
        }
        match &self.focused {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_u64() == Some(1),
            _ => false,
        }
    }
}

pub struct Desktop<'a> {
    runner: &'a dyn Runner,
    window_manager: &'a str,
}

impl<'a> Desktop<'a> {
    pub fn new(runner: &'a dyn Runner, window_manager: &'a str) -> Self {
        Self {
            runner,
            window_manager,
        }
    }

    fn yabai(&self) -> Cmd {
        Cmd::new(self.window_manager).arg("-m")
    }

    pub fn spaces(&self) -> Result<Vec<SpaceInfo>> {
        let cmd = self.yabai().args(["query", "--spaces"]);
        let captured = self.runner.output(&cmd)?;
        if !captured.exit.success() {
            return Err(Error::query_failed(&cmd.to_string(), &captured.exit.to_string()));
        }
        serde_json::from_str(&captured.stdout)
            .map_err(|e| Error::query_failed(&cmd.to_string(), &e.to_string()))
    }

    pub fn focused_space(&self) -> Result<u32> {
        self.spaces()?
            .iter()
            .find(|s| s.is_focused())
            .map(|s| s.index)
            .ok_or_else(|| Error::query_failed("yabai -m query --spaces", "no focused space"))
    }

    /// Create and focus a floating space. Torn down when the session drops.
    pub fn open_session(&self) -> Result<DesktopSession<'_>> {
        let previous = self.focused_space()?;
        let index = self.spaces()?.len() as u32 + 1;

        run_steps(
            self.runner,
            &[
                Step::best_effort(self.yabai().args(["space", "--create"])),
                Step::best_effort(self.yabai().args(["space", "--focus"]).arg(index.to_string())),
                Step::best_effort(self.yabai().args(["space", "--layout", "float"])),
            ],
        )?;
        info!("opened space {} (was {})", index, previous);

        Ok(DesktopSession {
            desktop: self,
            index,
            previous,
        })
    }

    /// Run `f(path)` on a fresh floating space, then tear the space down.
    ///
    /// The space is destroyed even when `f` fails.
    pub fn with_floating_editor<T, F>(&self, path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let _session = self.open_session()?;
        f(path)
    }
}

pub struct DesktopSession<'a> {
    desktop: &'a Desktop<'a>,
    index: u32,
    previous: u32,
}

impl DesktopSession<'_> {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn previous(&self) -> u32 {
        self.previous
    }
}

impl Drop for DesktopSession<'_> {
    fn drop(&mut self) {
        let d = self.desktop;
        let steps = [
            Step::best_effort(
                d.yabai()
                    .arg("space")
                    .arg(self.index.to_string())
                    .arg("--destroy"),
            ),
            Step::best_effort(
                d.yabai()
                    .args(["space", "--focus"])
                    .arg(self.previous.to_string()),
            ),
        ];
        match run_steps(d.runner, &steps) {
            Ok(()) => info!("closed space {}, back on {}", self.index, self.previous),
            Err(e) => warn!("failed to close space {}: {}", self.index, e),
        }
    }
}
