//! Appendix note pages: lined, dotted or blank, spaced by the theme's line
//! height.

use crate::config::NoteTemplate;
use crate::draw::{PageCanvas, Stroke};
use crate::graph::PageNode;
use crate::style::Color;

use super::{page_title, RenderContext};

/// Line spacing at a line height of 1.0.
pub const BASE_LINE_SPACING: f64 = 20.0;
const FOOTER_SIZE: f64 = 9.0;

pub fn render(node: &PageNode, ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let content = ctx.content();
    page_title(canvas, ctx, &node.title, 10.0);

    let template = node.note.as_ref().map(|n| n.template).unwrap_or_default();
    let spacing = ctx.config.theme.line_height * BASE_LINE_SPACING;
    let rows = (content.height / spacing).floor() as usize;

    match template {
        NoteTemplate::Lined => {
            for i in 0..rows {
                let y = content.top() - (i + 1) as f64 * spacing;
                canvas.line((content.x, y), (content.right(), y), Stroke::hairline());
            }
        }
        NoteTemplate::Dotted => {
            let cols = (content.width / spacing).floor() as usize;
            for r in 0..rows {
                let y = content.top() - (r + 1) as f64 * spacing;
                for c in 0..cols {
                    canvas.dot(content.x + c as f64 * spacing, y, 1.0, Color::RULE);
                }
            }
        }
        NoteTemplate::Blank => {}
    }

    if let Some(meta) = &node.note {
        let footer = format!("{} / {}", meta.page_index + 1, meta.total_pages);
        let width = ctx.fonts.measure_regular(&footer, FOOTER_SIZE);
        canvas.text(content.right() - width, content.y - 20.0, footer, ctx.font(), FOOTER_SIZE, Color::MUTED);
    }
}
