//! Fuzzy figure selection through `choose`

use crate::error::{Error, Result};
use crate::export::svg_files;
use crate::naming::{beautify, simplify};
use crate::runner::{Cmd, Runner};
use log::{debug, info};
use std::path::Path;

pub struct Chooser<'a> {
    runner: &'a dyn Runner,
    program: &'a str,
    accent_color: &'a str,
}

impl<'a> Chooser<'a> {
    pub fn new(runner: &'a dyn Runner, program: &'a str, accent_color: &'a str) -> Self {
        Self {
            runner,
            program,
            accent_color,
        }
    }

    /// Ask the user to pick a figure in `dir`; `None` when nothing was chosen.
    pub fn pick(&self, dir: &Path) -> Result<Option<String>> {
        let options = menu_options(dir)?;
        let cmd = Cmd::new(self.program)
            .args(["-c", self.accent_color])
            .stdin(options);
        let captured = self.runner.output(&cmd)?;
        if !captured.exit.success() && !captured.stdout.trim().is_empty() {
            return Err(Error::query_failed(&cmd.to_string(), &captured.exit.to_string()));
        }

        let choice = parse_choice(&captured.stdout);
        match &choice {
            Some(stem) => info!("selected figure {}", stem),
            None => debug!("selection cancelled"),
        }
        Ok(choice)
    }
}

/// Display titles for every SVG in `dir`, one per line.
pub fn menu_options(dir: &Path) -> Result<String> {
    let mut options = String::new();
    for svg in svg_files(dir)? {
        if let Some(name) = svg.file_name() {
            options.push_str(&beautify(&name.to_string_lossy()));
            options.push('\n');
        }
    }
    Ok(options)
}

/// Map the chooser's raw output back to a stem.
pub fn parse_choice(raw: &str) -> Option<String> {
    let title = raw
        .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        .lines()
        .next()
        .unwrap_or_default();
    let stem = simplify(title);
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}
