//! # Page Renderers
//!
//! One renderer per page kind. Each gets the node, a [`RenderContext`] and a
//! [`PageCanvas`], draws inside the content rectangle and asks the canvas for
//! links on anything navigable (month cells, week rows, year cells). None of
//! them know about page handles; the canvas filters links to pages that don't
//! exist.
//!
//! Proportions are fixed fractions of the content area:
//!
//! | page  | split                                         |
//! |-------|-----------------------------------------------|
//! | month | 80% grid, 20% goals                           |
//! | week  | 20% focus + habits, 80% day rows              |
//! | day   | 40% / 60% columns                             |
//! | year  | 80% month grid, 20% goals                     |
//! | index | 65% three columns, 30% books + links          |

pub mod cover;
pub mod day;
pub mod index;
pub mod month;
pub mod note;
pub mod week;
pub mod year;

use crate::config::PlannerConfig;
use crate::draw::{PageCanvas, Rect, Stroke};
use crate::font::{FontContext, StandardFont};
use crate::geometry::GeometryProfile;
use crate::graph::{PageKind, PageNode};
use crate::style::Color;
use crate::writer::EmbeddedImage;

pub const SECTION_HEADER_HEIGHT: f64 = 20.0;
pub const SECTION_TITLE_SIZE: f64 = 10.0;
pub const PAGE_TITLE_SIZE: f64 = 18.0;
pub const CHECKBOX_SIZE: f64 = 12.0;

const SECTION_TITLE_COLOR: Color = Color::gray(0.3);
const CHECKBOX_BORDER: Color = Color::gray(0.7);

/// Everything a renderer may read. Shared by every page of one run.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub config: &'a PlannerConfig,
    pub geometry: GeometryProfile,
    pub fonts: FontContext,
    pub accent: Color,
    /// The cover background, if the config has one and it was embedded.
    pub cover_image: Option<EmbeddedImage>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self {
            config,
            geometry: GeometryProfile::for_config(config),
            fonts: FontContext::for_family(&config.theme.font),
            accent: Color::hex(&config.theme.accent_color),
            cover_image: None,
        }
    }

    pub fn with_cover_image(mut self, image: Option<EmbeddedImage>) -> Self {
        self.cover_image = image;
        self
    }

    pub fn content(&self) -> Rect {
        self.geometry.content()
    }

    /// Body font.
    pub fn font(&self) -> StandardFont {
        self.fonts.regular()
    }
}

/// Draw a page's content. The navigation overlay is separate.
pub fn render_page(node: &PageNode, ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    match node.kind {
        PageKind::Cover => cover::render(ctx, canvas),
        PageKind::Index => index::render(ctx, canvas),
        PageKind::Year => year::render(node, ctx, canvas),
        PageKind::Month => month::render(node, ctx, canvas),
        PageKind::Week => week::render(node, ctx, canvas),
        PageKind::Day => day::render(node, ctx, canvas),
        PageKind::Note => note::render(node, ctx, canvas),
    }
}

/// Page heading just above the content area.
pub fn page_title(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, text: &str, offset: f64) {
    let content = ctx.content();
    canvas.text(content.x, content.top() + offset, text, ctx.font(), PAGE_TITLE_SIZE, Color::BLACK);
}

/// A bordered box with a shaded header strip. Returns the area below the header.
pub fn section_box(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, rect: Rect, title: &str) -> Rect {
    let header_y = rect.top() - SECTION_HEADER_HEIGHT;
    canvas.fill_rect(
        Rect::new(rect.x, header_y, rect.width, SECTION_HEADER_HEIGHT),
        Color::HEADER_FILL,
    );
    canvas.line((rect.x, header_y), (rect.right(), header_y), Stroke::hairline());
    canvas.stroke_rect(rect, Stroke::hairline());
    canvas.text(
        rect.x + 10.0,
        rect.top() - 14.0,
        title,
        ctx.font(),
        SECTION_TITLE_SIZE,
        SECTION_TITLE_COLOR,
    );
    Rect::new(rect.x, rect.y, rect.width, rect.height - SECTION_HEADER_HEIGHT)
}

/// Evenly spaced writing lines inside a section box.
pub fn lines_in_box(canvas: &mut PageCanvas<'_>, rect: Rect, count: usize) {
    if count == 0 {
        return;
    }
    let spacing = (rect.height - 40.0) / count as f64;
    for i in 0..count {
        let y = rect.top() - 40.0 - i as f64 * spacing;
        canvas.line((rect.x + 10.0, y), (rect.right() - 10.0, y), Stroke::hairline());
    }
}

/// A checkbox followed by a writing line `width` long.
pub fn checkbox_line(canvas: &mut PageCanvas<'_>, x: f64, y: f64, width: f64) {
    canvas.stroke_rect(
        Rect::new(x, y, CHECKBOX_SIZE, CHECKBOX_SIZE),
        Stroke::solid(CHECKBOX_BORDER, 1.0),
    );
    canvas.line((x + 20.0, y + 2.0), (x + width, y + 2.0), Stroke::hairline());
}
