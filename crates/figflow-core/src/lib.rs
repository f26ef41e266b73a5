//! figflow-core - figure lifecycle for LaTeX documents
//!
//! Creates Inkscape figures from a template, edits them on a throwaway
//! yabai space, exports PDF + `.pdf_tex` overlays, and hands LaTeX snippets
//! from a terminal editor to Inkscape through the clipboard.
//!
//! Everything external goes through a [`Runner`], so each workflow can be
//! exercised without yabai or Inkscape installed.

pub mod apps;
pub mod clipboard;
pub mod config;
pub mod desktop;
pub mod error;
pub mod export;
pub mod input;
pub mod naming;
pub mod runner;
pub mod select;
pub mod snippet;
pub mod workflow;

pub use clipboard::{Clipboard, SystemClipboard};
pub use config::{Config, ExportSyntax};
pub use error::{Error, ErrorCode, Result};
pub use runner::{Cmd, Runner, SystemRunner};
pub use workflow::Workflow;

pub mod prelude {
    pub use crate::clipboard::{Clipboard, SystemClipboard};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::runner::{Runner, SystemRunner};
    pub use crate::workflow::{CreatedFigure, DeletedFigure, EditedFigure, Workflow};
}
