//! The document writer seam.
//!
//! The engine decides what goes where; a [`DocumentWriter`] turns that into
//! bytes. Handles are opaque to the engine: it only ever hands them back to
//! the writer that issued them.

use crate::draw::{DrawCommand, Rect};
use crate::error::FolioError;

/// A page created by a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(pub usize);

/// An image embedded in a writer's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub usize);

/// An embedded image and its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub handle: ImageHandle,
    pub width_px: u32,
    pub height_px: u32,
}

pub trait DocumentWriter {
    /// Append a blank page of the given size in points.
    fn create_page(&mut self, width: f64, height: f64) -> Result<PageHandle, FolioError>;

    /// Draw onto a page. Unknown handles are ignored.
    fn draw(&mut self, page: PageHandle, command: &DrawCommand);

    /// Make `rect` on `page` jump to `target`.
    fn add_link(&mut self, page: PageHandle, rect: Rect, target: PageHandle);

    /// Embed encoded image bytes (JPEG or PNG).
    fn embed_image(&mut self, bytes: &[u8]) -> Result<EmbeddedImage, FolioError>;

    /// Encode the whole document.
    fn finalize(self) -> Result<Vec<u8>, FolioError>;
}
