//! The user-facing figure operations, composed from the other modules

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::desktop::Desktop;
use crate::error::{Error, Result};
use crate::export::{ExportReport, Exporter};
use crate::naming::{next_free_stem, simplify};
use crate::runner::{run_steps, Cmd, Runner, Step};
use crate::select::Chooser;
use crate::snippet::SnippetBridge;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extensions that make up one figure, sharing a stem.
pub const FIGURE_EXTENSIONS: [&str; 3] = ["svg", "pdf", "pdf_tex"];

#[derive(Debug, Clone, Serialize)]
pub struct CreatedFigure {
    pub stem: String,
    pub svg: PathBuf,
    pub export: ExportReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditedFigure {
    pub stem: String,
    pub svg: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedFigure {
    pub stem: String,
    pub removed: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<PathBuf>,
}

pub struct Workflow<'a> {
    config: &'a Config,
    runner: &'a dyn Runner,
    clipboard: &'a mut dyn Clipboard,
}

impl<'a> Workflow<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn Runner, clipboard: &'a mut dyn Clipboard) -> Self {
        Self {
            config,
            runner,
            clipboard,
        }
    }

    fn desktop(&self) -> Desktop<'a> {
        Desktop::new(self.runner, &self.config.window_manager)
    }

    fn exporter(&self) -> Exporter<'a> {
        Exporter::new(self.runner, &self.config.editor, self.config.export_syntax)
    }

    fn chooser(&self) -> Chooser<'a> {
        Chooser::new(self.runner, &self.config.chooser, &self.config.accent_color)
    }

    // Blocks until the editor window is closed.
    fn open_in_editor(&self, svg: &Path) -> Result<()> {
        let cmd = Cmd::new(self.config.editor.as_str()).arg(svg.display().to_string());
        run_steps(self.runner, &[Step::best_effort(cmd)])
    }

    /// Copy the template to `<root>/figures/<stem>.svg`, edit it, export
    /// the figures directory, and leave the stem on the clipboard.
    pub fn create_figure(&mut self, title: &str, root: &Path) -> Result<CreatedFigure> {
        let stem = simplify(title);
        if stem.is_empty() {
            return Err(Error::invalid_title(title));
        }
        if !self.config.template.is_file() {
            return Err(Error::template_missing(&self.config.template));
        }

        let figures = self.config.figures_dir(root);
        fs::create_dir_all(&figures)?;

        let stem = next_free_stem(&figures, &stem);
        let svg = figures.join(format!("{}.svg", stem));
        fs::copy(&self.config.template, &svg)?;
        info!("created {}", svg.display());

        self.desktop()
            .with_floating_editor(&svg, |path| self.open_in_editor(path))?;
        let export = self.exporter().export_missing(&figures)?;
        self.clipboard.set_text(&stem)?;

        Ok(CreatedFigure { stem, svg, export })
    }

    /// Paste one line of LaTeX into the running editor.
    pub fn insert_latex(&mut self) -> Result<String> {
        SnippetBridge::new(self.runner, &mut *self.clipboard, self.config).insert()
    }

    /// Pick a figure, reopen it, and re-export it. `None` when cancelled.
    pub fn edit_figure(&mut self, root: &Path) -> Result<Option<EditedFigure>> {
        let figures = self.config.figures_dir(root);
        let Some(stem) = self.chooser().pick(&figures)? else {
            return Ok(None);
        };

        let svg = figures.join(format!("{}.svg", stem));
        self.desktop()
            .with_floating_editor(&svg, |path| self.open_in_editor(path))?;
        self.exporter().export_one(&svg)?;

        Ok(Some(EditedFigure { stem, svg }))
    }

    /// Pick a figure and remove its SVG, PDF and overlay. `None` when cancelled.
    pub fn delete_figure(&mut self, root: &Path) -> Result<Option<DeletedFigure>> {
        let figures = self.config.figures_dir(root);
        let Some(stem) = self.chooser().pick(&figures)? else {
            return Ok(None);
        };
        Ok(Some(delete_files(&figures, &stem)))
    }
}

/// Remove `<stem>.svg`, `.pdf` and `.pdf_tex` from `dir`, best-effort.
pub fn delete_files(dir: &Path, stem: &str) -> DeletedFigure {
    let mut removed = Vec::new();
    let mut missing = Vec::new();
    for ext in FIGURE_EXTENSIONS {
        let path = dir.join(format!("{}.{}", stem, ext));
        match fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("could not remove {}: {}", path.display(), e);
                }
                missing.push(path);
            }
        }
    }
    info!("deleted figure {} ({} files)", stem, removed.len());
    DeletedFigure {
        stem: stem.to_string(),
        removed,
        missing,
    }
}
