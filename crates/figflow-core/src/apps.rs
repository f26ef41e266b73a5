//! Application lookup and focus, via pgrep and AppleScript

use crate::error::Result;
use crate::runner::{Cmd, Runner};

/// Build an `osascript` call with one `-e` per non-blank script line.
pub fn osascript(script: &str) -> Cmd {
    let mut cmd = Cmd::new("osascript");
    for line in script.lines().map(str::trim).filter(|l| !l.is_empty()) {
        cmd = cmd.arg("-e").arg(line);
    }
    cmd
}

/// Whether a process with exactly this name is running.
pub fn is_running(runner: &dyn Runner, process: &str) -> Result<bool> {
    let captured = runner.output(&Cmd::new("pgrep").args(["-x", process]))?;
    Ok(captured.exit.success() && !captured.stdout.trim().is_empty())
}

/// Bring a process to the front through System Events.
pub fn set_frontmost(process: &str) -> Cmd {
    osascript(&format!(
        r#"tell application "System Events" to tell process "{}" to set frontmost to true"#,
        escape(process)
    ))
}

/// Open a terminal window at `bounds` and type `command` into it.
pub fn open_terminal(app: &str, bounds: [i32; 4], command: &str) -> Cmd {
    let [left, top, right, bottom] = bounds;
    osascript(&format!(
        r#"
        tell application "{}"
            set newWindow to (create window with default profile)
            set bounds of front window to {{{}, {}, {}, {}}}
            tell current session of newWindow
                write text "{}"
            end tell
        end tell
        "#,
        escape(app),
        left,
        top,
        right,
        bottom,
        escape(command)
    ))
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
