//! SVG -> PDF + `.pdf_tex` export through Inkscape

use crate::config::ExportSyntax;
use crate::error::Result;
use crate::runner::{run_steps, Cmd, Runner, Step};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub exported: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct Exporter<'a> {
    runner: &'a dyn Runner,
    editor: &'a str,
    syntax: ExportSyntax,
}

impl<'a> Exporter<'a> {
    pub fn new(runner: &'a dyn Runner, editor: &'a str, syntax: ExportSyntax) -> Self {
        Self {
            runner,
            editor,
            syntax,
        }
    }

    /// The Inkscape invocation that writes `<stem>.pdf` and `<stem>.pdf_tex`.
    pub fn export_command(&self, svg: &Path) -> Cmd {
        let pdf = svg.with_extension("pdf");
        let svg = svg.display().to_string();
        let pdf = pdf.display().to_string();
        match self.syntax {
            ExportSyntax::Legacy => Cmd::new(self.editor)
                .args(["-f", svg.as_str(), "-A", pdf.as_str()])
                .arg("--export-latex"),
            ExportSyntax::Modern => Cmd::new(self.editor)
                .arg(svg)
                .arg(format!("--export-filename={}", pdf))
                .arg("--export-latex"),
        }
    }

    /// Export one figure unconditionally.
    pub fn export_one(&self, svg: &Path) -> Result<()> {
        info!("exporting {}", svg.display());
        run_steps(self.runner, &[Step::best_effort(self.export_command(svg))])
    }

    /// Export every SVG in `dir` that has no sibling PDF.
    ///
    /// Existing PDFs are never regenerated, even when the SVG is newer.
    pub fn export_missing(&self, dir: &Path) -> Result<ExportReport> {
        let mut report = ExportReport::default();
        for svg in svg_files(dir)? {
            let stem = stem_of(&svg);
            if svg.with_extension("pdf").is_file() {
                debug!("{} already exported", stem);
                report.skipped.push(stem);
                continue;
            }
            self.export_one(&svg)?;
            report.exported.push(stem);
        }
        Ok(report)
    }
}

/// `.svg` files directly inside `dir`, sorted by name.
pub fn svg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "svg") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Captured, Exit};

    struct Noop;

    impl Runner for Noop {
        fn status(&self, _cmd: &Cmd) -> Result<Exit> {
            Ok(Exit::SUCCESS)
        }
        fn output(&self, _cmd: &Cmd) -> Result<Captured> {
            unreachable!()
        }
    }

    #[test]
    fn legacy_command_line() {
        let exporter = Exporter::new(&Noop, "inkscape", ExportSyntax::Legacy);
        let cmd = exporter.export_command(Path::new("/doc/figures/plot.svg"));
        assert_eq!(
            cmd.to_string(),
            "inkscape -f /doc/figures/plot.svg -A /doc/figures/plot.pdf --export-latex"
        );
    }

    #[test]
    fn modern_command_line() {
        let exporter = Exporter::new(&Noop, "inkscape", ExportSyntax::Modern);
        let cmd = exporter.export_command(Path::new("/doc/figures/plot.svg"));
        assert_eq!(
            cmd.args,
            vec![
                "/doc/figures/plot.svg",
                "--export-filename=/doc/figures/plot.pdf",
                "--export-latex"
            ]
        );
    }

    #[test]
    fn svg_files_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.svg", "a.svg", "a.pdf", "a.pdf_tex", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let names: Vec<String> = svg_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| stem_of(p))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
