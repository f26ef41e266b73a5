#![allow(dead_code)]

use figflow_core::runner::{Captured, Cmd, Exit, Runner};
use figflow_core::{Clipboard, Config, Result};
use std::cell::RefCell;
use std::path::Path;

pub const SPACES_JSON: &str = r#"[
    {"id": 1, "index": 1, "has-focus": false},
    {"id": 2, "index": 2, "has-focus": true},
    {"id": 3, "index": 3, "has-focus": false}
]"#;

type Hook = Box<dyn Fn(&Cmd)>;

/// Records every command; answers `output` calls by command-line prefix.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Cmd>>,
    responses: Vec<(String, Captured)>,
    hooks: Vec<(String, Hook)>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
            .respond("yabai -m query --spaces", SPACES_JSON)
            .respond("pgrep -x inkscape-bin", "4242\n")
    }

    pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.responses.insert(
            0,
            (
                prefix.to_string(),
                Captured {
                    exit: Exit::SUCCESS,
                    stdout: stdout.to_string(),
                },
            ),
        );
        self
    }

    pub fn fail(mut self, prefix: &str) -> Self {
        self.responses.insert(
            0,
            (
                prefix.to_string(),
                Captured {
                    exit: Exit { code: Some(1) },
                    stdout: String::new(),
                },
            ),
        );
        self
    }

    /// Run `hook` whenever a command starting with `prefix` is executed.
    pub fn on(mut self, prefix: &str, hook: impl Fn(&Cmd) + 'static) -> Self {
        self.hooks.push((prefix.to_string(), Box::new(hook)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    pub fn commands(&self) -> Vec<Cmd> {
        self.calls.borrow().clone()
    }

    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.starts_with(prefix))
    }

    fn record(&self, cmd: &Cmd) {
        self.calls.borrow_mut().push(cmd.clone());
        let line = cmd.to_string();
        for (prefix, hook) in &self.hooks {
            if line.starts_with(prefix.as_str()) {
                hook(cmd);
            }
        }
    }
}

impl Runner for FakeRunner {
    fn status(&self, cmd: &Cmd) -> Result<Exit> {
        self.record(cmd);
        Ok(Exit::SUCCESS)
    }

    fn output(&self, cmd: &Cmd) -> Result<Captured> {
        self.record(cmd);
        let line = cmd.to_string();
        Ok(self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, captured)| captured.clone())
            .unwrap_or(Captured {
                exit: Exit::SUCCESS,
                stdout: String::new(),
            }))
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

pub const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="240" height="120"/>"#;

/// Config pointing at a template and scratch file inside `dir`.
pub fn test_config(dir: &Path) -> Config {
    let template = dir.join("template.svg");
    std::fs::write(&template, TEMPLATE).unwrap();
    Config {
        template,
        scratch_buffer: dir.join("latex-temp.text"),
        poll_interval_ms: 1,
        paste_delay_ms: 0,
        snippet_timeout_ms: Some(2_000),
        ..Config::default()
    }
}

pub fn touch(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), format!("contents of {}", name)).unwrap();
    }
}
