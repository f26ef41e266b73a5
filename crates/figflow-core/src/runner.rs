//! External process execution
//!
//! Every interaction with yabai, Inkscape, osascript and friends goes through
//! a [`Runner`], so workflows can be driven by a recording fake in tests.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

/// A program invocation: argv plus optional text fed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Build from an argv slice; `None` when it is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, rest) = argv.split_first()?;
        Some(Self::new(program.clone()).args(rest.iter().cloned()))
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub code: Option<i32>,
}

impl Exit {
    pub const SUCCESS: Exit = Exit { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Stdout of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub exit: Exit,
    pub stdout: String,
}

pub trait Runner {
    /// Run with inherited stdio and block until the process exits.
    fn status(&self, cmd: &Cmd) -> Result<Exit>;

    /// Run with stdout captured, feeding `cmd.stdin` if set.
    fn output(&self, cmd: &Cmd) -> Result<Captured>;
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn status(&self, cmd: &Cmd) -> Result<Exit> {
        debug!("run: {}", cmd);
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .status()
            .map_err(|e| Error::step_failed(&cmd.to_string(), &e.to_string()))?;
        Ok(Exit {
            code: status.code(),
        })
    }

    fn output(&self, cmd: &Cmd) -> Result<Captured> {
        debug!("capture: {}", cmd);
        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::query_failed(&cmd.to_string(), &e.to_string()))?;

        if let (Some(input), Some(mut pipe)) = (cmd.stdin.as_ref(), child.stdin.take()) {
            pipe.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        Ok(Captured {
            exit: Exit {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// What to do when a step fails to spawn or exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    Continue,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub cmd: Cmd,
    pub policy: OnError,
}

impl Step {
    pub fn best_effort(cmd: Cmd) -> Self {
        Self {
            cmd,
            policy: OnError::Continue,
        }
    }

    pub fn required(cmd: Cmd) -> Self {
        Self {
            cmd,
            policy: OnError::Abort,
        }
    }
}

/// Run `steps` in order, honouring each step's [`OnError`] policy.
pub fn run_steps(runner: &dyn Runner, steps: &[Step]) -> Result<()> {
    for step in steps {
        let failure = match runner.status(&step.cmd) {
            Ok(exit) if exit.success() => None,
            Ok(exit) => Some(exit.to_string()),
            Err(e) => Some(e.message),
        };

        if let Some(reason) = failure {
            match step.policy {
                OnError::Continue => warn!("ignoring failed step `{}`: {}", step.cmd, reason),
                OnError::Abort => return Err(Error::step_failed(&step.cmd.to_string(), &reason)),
            }
        }
    }
    Ok(())
}
