//! Test doubles shared by the unit tests.

use crate::draw::{DrawCommand, Rect, TargetResolver};
use crate::error::{FolioError, Stage};
use crate::graph::{PageGraph, PageId};
use crate::writer::{DocumentWriter, EmbeddedImage, ImageHandle, PageHandle};

/// Resolves against graph positions, for rendering without a writer.
pub struct GraphResolver<'a>(pub &'a PageGraph);

impl TargetResolver for GraphResolver<'_> {
    fn resolve(&self, id: &PageId) -> Option<PageHandle> {
        self.0.position(id).map(PageHandle)
    }
}

/// Keeps everything it is given.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub pages: Vec<(f64, f64)>,
    pub commands: Vec<(PageHandle, DrawCommand)>,
    pub links: Vec<(PageHandle, Rect, PageHandle)>,
    pub images: usize,
    /// Fail `create_page` once this many pages exist.
    pub fail_after: Option<usize>,
    /// Panic on the first draw call.
    pub panic_on_draw: bool,
}

impl RecordingWriter {
    fn new_page(&mut self, width: f64, height: f64) -> Result<PageHandle, FolioError> {
        if self.fail_after == Some(self.pages.len()) {
            return Err(FolioError::writer(Stage::Allocate, None, "out of pages"));
        }
        self.pages.push((width, height));
        Ok(PageHandle(self.pages.len() - 1))
    }

    fn record(&mut self, page: PageHandle, command: &DrawCommand) {
        if self.panic_on_draw {
            panic!("writer crashed while drawing on page {}", page.0);
        }
        self.commands.push((page, command.clone()));
    }

    fn new_image(&mut self) -> EmbeddedImage {
        self.images += 1;
        EmbeddedImage {
            handle: ImageHandle(self.images - 1),
            width_px: 1,
            height_px: 1,
        }
    }

    fn summary(&self) -> Vec<u8> {
        format!("{} pages", self.pages.len()).into_bytes()
    }
}

impl DocumentWriter for RecordingWriter {
    fn create_page(&mut self, width: f64, height: f64) -> Result<PageHandle, FolioError> {
        self.new_page(width, height)
    }

    fn draw(&mut self, page: PageHandle, command: &DrawCommand) {
        self.record(page, command);
    }

    fn add_link(&mut self, page: PageHandle, rect: Rect, target: PageHandle) {
        self.links.push((page, rect, target));
    }

    fn embed_image(&mut self, _bytes: &[u8]) -> Result<EmbeddedImage, FolioError> {
        Ok(self.new_image())
    }

    fn finalize(self) -> Result<Vec<u8>, FolioError> {
        Ok(self.summary())
    }
}

/// Lets a test keep the writer and inspect it after the run.
impl DocumentWriter for &mut RecordingWriter {
    fn create_page(&mut self, width: f64, height: f64) -> Result<PageHandle, FolioError> {
        self.new_page(width, height)
    }

    fn draw(&mut self, page: PageHandle, command: &DrawCommand) {
        self.record(page, command);
    }

    fn add_link(&mut self, page: PageHandle, rect: Rect, target: PageHandle) {
        self.links.push((page, rect, target));
    }

    fn embed_image(&mut self, _bytes: &[u8]) -> Result<EmbeddedImage, FolioError> {
        Ok(self.new_image())
    }

    fn finalize(self) -> Result<Vec<u8>, FolioError> {
        Ok(self.summary())
    }
}
