//! # Two-Pass Orchestrator
//!
//! Pages link forwards as freely as backwards (January's grid links to its
//! days, the year page links to December), so every page must exist before
//! any link is drawn. Generation is split into two passes and the split is
//! enforced by types:
//!
//! ```text
//!  Allocating ──allocate()──▶ Resolving ──resolve()──▶ finalize()
//!  (graph only)               (owns the HandleMap)
//! ```
//!
//! [`HandleMap`] is the only [`TargetResolver`] that maps identifiers to
//! writer pages, and the only way to get one is to finish pass 1.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::PlannerConfig;
use crate::draw::{PageCanvas, TargetResolver};
use crate::error::{FolioError, Stage};
use crate::geometry::GeometryProfile;
use crate::graph::{PageGraph, PageId};
use crate::image_loader;
use crate::nav::Overlay;
use crate::render::{self, RenderContext};
use crate::writer::{DocumentWriter, EmbeddedImage, PageHandle};

/// One page of pass 2 done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 1-based.
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl Progress {
    /// Completion in whole percent.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Receives progress events. Fire-and-forget.
pub trait ProgressSink {
    fn progress(&mut self, event: Progress);
}

impl<F: FnMut(Progress)> ProgressSink for F {
    fn progress(&mut self, event: Progress) {
        self(event)
    }
}

/// Discards progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn progress(&mut self, _event: Progress) {}
}

/// Pass 1: every node still needs a page.
pub struct Allocating<'g> {
    graph: &'g PageGraph,
}

impl<'g> Allocating<'g> {
    pub fn new(graph: &'g PageGraph) -> Self {
        Self { graph }
    }

    /// Create one blank page per node, in graph order.
    pub fn allocate<W: DocumentWriter>(
        self,
        writer: &mut W,
        geometry: &GeometryProfile,
    ) -> Result<Resolving<'g>, FolioError> {
        let mut handles = Vec::with_capacity(self.graph.len());
        for node in self.graph.iter() {
            let handle = writer
                .create_page(geometry.width, geometry.height)
                .map_err(|e| e.on_page(&node.id.to_string()))?;
            handles.push(handle);
        }
        log::debug!("allocated {} pages", handles.len());

        Ok(Resolving {
            handles: HandleMap {
                graph: self.graph,
                handles,
            },
        })
    }
}

/// Identifier → page handle for every node of a graph.
#[derive(Debug)]
pub struct HandleMap<'g> {
    graph: &'g PageGraph,
    /// Parallel to the graph's nodes.
    handles: Vec<PageHandle>,
}

impl HandleMap<'_> {
    pub fn handle_of(&self, id: &PageId) -> Option<PageHandle> {
        self.graph.position(id).and_then(|i| self.handles.get(i).copied())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl TargetResolver for HandleMap<'_> {
    fn resolve(&self, id: &PageId) -> Option<PageHandle> {
        self.handle_of(id)
    }
}

/// Pass 2: every node has a page; draw content, overlay and links.
pub struct Resolving<'g> {
    handles: HandleMap<'g>,
}

impl<'g> Resolving<'g> {
    pub fn handles(&self) -> &HandleMap<'g> {
        &self.handles
    }

    /// Render every node in graph order, forwarding drawing and links to the
    /// writer. One progress event per node.
    pub fn resolve<W: DocumentWriter, S: ProgressSink + ?Sized>(
        &self,
        writer: &mut W,
        ctx: &RenderContext<'_>,
        sink: &mut S,
        cancel: Option<&AtomicBool>,
    ) -> Result<(), FolioError> {
        let graph = self.handles.graph;
        let total = graph.len();

        for (i, node) in graph.iter().enumerate() {
            if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
                log::info!("generation cancelled at page {} of {}", i, total);
                return Err(FolioError::Cancelled);
            }

            let page = self.handles.handles[i];
            let mut canvas = PageCanvas::new(node.id, &self.handles);
            render::render_page(node, ctx, &mut canvas);
            Overlay::compute(node, &ctx.geometry, ctx.config, &ctx.fonts).draw(
                &mut canvas,
                &ctx.fonts,
                ctx.geometry.handedness,
            );
            let (commands, links) = canvas.finish();

            for command in &commands {
                writer.draw(page, command);
            }
            for link in &links {
                let target = self.handles.handle_of(&link.target).ok_or_else(|| {
                    FolioError::writer(
                        Stage::Render,
                        Some(node.id.to_string()),
                        format!("link target `{}` has no page", link.target),
                    )
                })?;
                writer.add_link(page, link.rect, target);
            }

            log::debug!("{}: {} commands, {} links", node.id, commands.len(), links.len());
            sink.progress(Progress {
                current: i + 1,
                total,
                message: format!("Rendering {}...", node.title),
            });
        }
        Ok(())
    }
}

/// Runs one generation from config to encoded bytes.
pub struct Generator<'c> {
    config: &'c PlannerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'c> Generator<'c> {
    pub fn new(config: &'c PlannerConfig) -> Self {
        Self { config, cancel: None }
    }

    /// Stop between pages once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn run<W: DocumentWriter, S: ProgressSink + ?Sized>(
        &self,
        mut writer: W,
        sink: &mut S,
    ) -> Result<Vec<u8>, FolioError> {
        let config = self.config;
        config.validate()?;

        let graph = PageGraph::build(config);
        let geometry = GeometryProfile::for_config(config);
        log::info!(
            "generating {} pages for {} ({} {}, {:.0}x{:.0}pt)",
            graph.len(),
            config.year,
            config.device,
            config.orientation,
            geometry.width,
            geometry.height
        );

        let resolving = Allocating::new(&graph).allocate(&mut writer, &geometry)?;

        let cover_image = embed_cover_image(config, &mut writer)?;
        let ctx = RenderContext::new(config).with_cover_image(cover_image);
        resolving.resolve(&mut writer, &ctx, sink, self.cancel.as_deref())?;

        if self.is_cancelled() {
            return Err(FolioError::Cancelled);
        }
        let bytes = writer.finalize()?;
        log::info!("encoded {} pages into {} bytes", graph.len(), bytes.len());
        Ok(bytes)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

fn embed_cover_image<W: DocumentWriter>(
    config: &PlannerConfig,
    writer: &mut W,
) -> Result<Option<EmbeddedImage>, FolioError> {
    let payload = match config.cover.as_ref().and_then(|c| c.image.as_deref()) {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Ok(None),
    };
    let bytes = image_loader::read_payload(payload)?;
    let image = writer.embed_image(&bytes)?;
    log::debug!("embedded cover image {}x{}", image.width_px, image.height_px);
    Ok(Some(image))
}
