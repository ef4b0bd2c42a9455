//! # Folio
//!
//! A hyperlinked digital planner generator.
//!
//! A planner is a few hundred pages that all point at each other: the year
//! page links to every month, each month grid links to its weeks and days,
//! every day links to the days either side of it, and every page carries
//! month tabs and quick links into the appendix. Drawing boxes is the easy
//! part. The real work is knowing, before anything is drawn, which pages
//! exist and where each one is.
//!
//! Folio does that in two passes. It builds the whole page graph up front
//! from the config, asks the writer for one blank page per node, and only
//! then renders, so any page can link to any other no matter where it sits
//! in the document. Links to pages that don't exist (the day before
//! January 1st) are dropped, not reported.
//!
//! ## Architecture
//!
//! ```text
//! PlannerConfig (JSON)
//!       ↓
//!   [config]    Parse + validate
//!       ↓
//!   [calendar]  Month grids for the span
//!       ↓
//!   [graph]     Ordered, deduplicated pages with typed ids
//!       ↓
//!   [generate]  Pass 1: allocate a page per node
//!               Pass 2: [render] + [nav] per node, links via the handle map
//!       ↓
//!   [pdf]       Serialize to PDF bytes
//! ```

pub mod calendar;
pub mod config;
pub mod draw;
pub mod error;
pub mod font;
pub mod generate;
pub mod geometry;
pub mod graph;
pub mod image_loader;
pub mod nav;
pub mod pdf;
pub mod render;
pub mod style;
pub mod task;
pub mod writer;

#[cfg(test)]
mod testing;

pub use config::PlannerConfig;
pub use error::FolioError;
pub use generate::{Generator, NullSink, Progress, ProgressSink};
pub use graph::{PageGraph, PageId};
pub use writer::DocumentWriter;

use pdf::PdfWriter;

/// Generate a planner PDF.
///
/// This is the primary entry point. Validates the config, builds the page
/// graph and returns the bytes of a complete PDF.
pub fn generate(config: &PlannerConfig) -> Result<Vec<u8>, FolioError> {
    generate_with(config, PdfWriter::new().with_title(config.document_title()), &mut NullSink)
}

/// Generate a planner from a JSON config.
pub fn generate_json(json: &str) -> Result<Vec<u8>, FolioError> {
    let config = PlannerConfig::from_json(json)?;
    generate(&config)
}

/// Generate with any document writer, reporting progress per page.
pub fn generate_with<W: DocumentWriter, S: ProgressSink + ?Sized>(
    config: &PlannerConfig,
    writer: W,
    sink: &mut S,
) -> Result<Vec<u8>, FolioError> {
    Generator::new(config).run(writer, sink)
}
