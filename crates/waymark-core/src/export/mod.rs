//! Getting plans out of (and back into) the planner.
//!
//! - [`ExportFormat`]: JSON or YAML plan files, read back by import.
//! - [`PdfLayout`]: a printable A4 document, export only.

pub mod format;
pub mod pdf;

pub use format::ExportFormat;
pub use pdf::{PdfLayout, TextLine};
