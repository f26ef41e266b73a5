//! LaTeX snippet handoff into the running editor
//!
//! A floating terminal opens a text editor on a scratch file. Once the user
//! saves something, the first line is put on the clipboard, focus goes back
//! to the editor's X11 window, and a Ctrl+V is sent.

use crate::apps;
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::input;
use crate::runner::{run_steps, Cmd, Runner, Step};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// A single-use handoff file, created empty and removed on drop.
pub struct ScratchBuffer {
    path: PathBuf,
}

impl ScratchBuffer {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        File::create(&path)?;
        debug!("scratch buffer at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the file is non-empty, polling every `poll`.
    ///
    /// With `timeout` unset this waits forever. A missing file counts as
    /// empty since editors may replace it while saving.
    pub fn wait_for_content(&self, poll: Duration, timeout: Option<Duration>) -> Result<()> {
        let started = Instant::now();
        loop {
            match fs::metadata(&self.path) {
                Ok(meta) if meta.len() > 0 => return Ok(()),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            if let Some(limit) = timeout {
                if started.elapsed() >= limit {
                    return Err(Error::timeout(
                        &self.path.display().to_string(),
                        limit.as_millis() as u64,
                    ));
                }
            }
            thread::sleep(poll);
        }
    }

    pub fn first_line(&self) -> Result<String> {
        Ok(first_line(&fs::read_to_string(&self.path)?))
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", self.path.display(), e),
        }
    }
}

/// First line of `text` without its line terminator.
pub fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

pub struct SnippetBridge<'a> {
    runner: &'a dyn Runner,
    clipboard: &'a mut dyn Clipboard,
    config: &'a Config,
}

impl<'a> SnippetBridge<'a> {
    pub fn new(runner: &'a dyn Runner, clipboard: &'a mut dyn Clipboard, config: &'a Config) -> Self {
        Self {
            runner,
            clipboard,
            config,
        }
    }

    /// Collect one line of LaTeX from the user and paste it into the editor.
    ///
    /// Fails with `EditorNotRunning` before touching anything when the
    /// editor process is absent. Returns the pasted text.
    pub fn insert(&mut self) -> Result<String> {
        let config = self.config;
        if !apps::is_running(self.runner, &config.editor_process)? {
            return Err(Error::editor_not_running(&config.editor_process));
        }

        let buffer = ScratchBuffer::create(&config.scratch_buffer)?;
        let command = format!("{} {}", config.snippet_editor, buffer.path().display());
        run_steps(
            self.runner,
            &[Step::required(apps::open_terminal(
                &config.terminal_app,
                config.terminal_bounds,
                &command,
            ))],
        )?;

        info!("waiting for snippet in {}", buffer.path().display());
        buffer.wait_for_content(
            Duration::from_millis(config.poll_interval_ms),
            config.snippet_timeout_ms.map(Duration::from_millis),
        )?;

        let mut steps: Vec<Step> = Cmd::from_argv(&config.close_terminal)
            .map(Step::best_effort)
            .into_iter()
            .collect();
        steps.push(Step::best_effort(apps::set_frontmost(&config.paste_target)));
        run_steps(self.runner, &steps)?;

        let snippet = buffer.first_line()?;
        self.clipboard.set_text(&snippet)?;

        thread::sleep(Duration::from_millis(config.paste_delay_ms));
        run_steps(self.runner, &[Step::best_effort(input::paste())])?;
        info!("pasted {:?} into {}", snippet, config.paste_target);
        Ok(snippet)
    }
}
