//! # Drawing Primitives
//!
//! What renderers produce: a flat list of [`DrawCommand`]s per page plus the
//! [`LinkRequest`]s for that page. Coordinates are PDF user space in points,
//! origin at the bottom-left corner, y growing upwards.

use crate::font::StandardFont;
use crate::graph::PageId;
use crate::style::Color;
use crate::writer::{ImageHandle, PageHandle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Grow by `by` on every side.
    pub fn inflate(&self, by: f64) -> Self {
        Self::new(
            self.x - by,
            self.y - by,
            self.width + 2.0 * by,
            self.height + 2.0 * by,
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.top()
    }
}

/// Stroke style for outlines and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash and gap lengths. `None` is a solid line.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(color: Color, width: f64, on: f64, off: f64) -> Self {
        Self {
            color,
            width,
            dash: Some((on, off)),
        }
    }

    /// The default hairline used for rules and box outlines.
    pub const fn hairline() -> Self {
        Self::solid(Color::RULE, 0.5)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    /// An open or closed polygonal path.
    Path {
        points: Vec<(f64, f64)>,
        closed: bool,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Single-line text. `(x, y)` is the baseline origin; `rotation` is in
    /// degrees counter-clockwise around that origin.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
        rotation: f64,
    },
    Image {
        image: ImageHandle,
        rect: Rect,
        opacity: f64,
    },
}

/// A pending hyperlink from a rectangle on one page to another page.
///
/// Only ever constructed for targets that resolved to a page handle.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRequest {
    pub source: PageId,
    pub rect: Rect,
    pub target: PageId,
}

/// Identifier → page handle lookup, available once every page exists.
pub trait TargetResolver {
    fn resolve(&self, id: &PageId) -> Option<PageHandle>;
}

/// Per-page accumulator for drawing commands and link requests.
///
/// Links whose target doesn't resolve are dropped here, which is the single
/// place that rule is enforced.
pub struct PageCanvas<'a> {
    page: PageId,
    resolver: &'a dyn TargetResolver,
    commands: Vec<DrawCommand>,
    links: Vec<LinkRequest>,
}

impl<'a> PageCanvas<'a> {
    pub fn new(page: PageId, resolver: &'a dyn TargetResolver) -> Self {
        Self {
            page,
            resolver,
            commands: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::Rect {
            rect,
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.push(DrawCommand::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
        });
    }

    pub fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>) {
        self.push(DrawCommand::Rect { rect, fill, stroke });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    pub fn dot(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, font: StandardFont, size: f64, color: Color) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font,
            size,
            color,
            rotation: 0.0,
        });
    }

    /// Request a link to `target`. Returns whether it was kept.
    pub fn link(&mut self, rect: Rect, target: PageId) -> bool {
        if self.resolver.resolve(&target).is_none() {
            log::trace!("{}: dropping link to missing page {}", self.page, target);
            return false;
        }
        self.links.push(LinkRequest {
            source: self.page,
            rect,
            target,
        });
        true
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn links(&self) -> &[LinkRequest] {
        &self.links
    }

    pub fn finish(self) -> (Vec<DrawCommand>, Vec<LinkRequest>) {
        (self.commands, self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Fixed(HashMap<PageId, PageHandle>);

    impl TargetResolver for Fixed {
        fn resolve(&self, id: &PageId) -> Option<PageHandle> {
            self.0.get(id).copied()
        }
    }

    #[test]
    fn test_rect_edges_and_inflate() {
        let r = Rect::new(10.0, 20.0, 16.0, 16.0);
        assert_eq!(r.right(), 26.0);
        assert_eq!(r.top(), 36.0);
        let big = r.inflate(5.0);
        assert_eq!(big, Rect::new(5.0, 15.0, 26.0, 26.0));
        assert!(big.contains(5.0, 41.0));
        assert!(!r.contains(9.9, 25.0));
    }

    #[test]
    fn test_canvas_drops_unresolved_links() {
        let resolver = Fixed(HashMap::from([(PageId::Index, PageHandle(1))]));
        let mut canvas = PageCanvas::new(PageId::Cover, &resolver);
        assert!(canvas.link(Rect::new(0.0, 0.0, 1.0, 1.0), PageId::Index));
        assert!(!canvas.link(Rect::new(0.0, 0.0, 1.0, 1.0), PageId::YearOverview));
        let (_, links) = canvas.finish();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source, PageId::Cover);
        assert_eq!(links[0].target, PageId::Index);
    }
}
