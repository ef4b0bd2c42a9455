//! Index page: a hand-maintained table of contents.
//!
//! Three columns on top (projects, areas, learnings over travel) and books
//! plus links underneath. Nothing on this page links anywhere; the overlay
//! provides all of its navigation.

use crate::draw::{PageCanvas, Rect};

use super::{lines_in_box, section_box, RenderContext};

const COLUMN_GAP: f64 = 15.0;

pub fn render(ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let content = ctx.content();
    let col_width = (content.width - COLUMN_GAP * 2.0) / 3.0;
    let top_height = content.height * 0.65;
    let bottom_height = content.height * 0.30;
    let top = content.top();
    let col_x = |i: usize| content.x + i as f64 * (col_width + COLUMN_GAP);

    for (i, title) in ["ACTIVE PROJECTS", "AREAS"].into_iter().enumerate() {
        let rect = Rect::new(col_x(i), top - top_height, col_width, top_height);
        section_box(canvas, ctx, rect, title);
        lines_in_box(canvas, rect, 20);
    }

    let split = (top_height - COLUMN_GAP) / 2.0;
    let learnings = Rect::new(col_x(2), top - split, col_width, split);
    section_box(canvas, ctx, learnings, "LEARNINGS");
    lines_in_box(canvas, learnings, 10);
    let travel = Rect::new(col_x(2), top - top_height, col_width, split);
    section_box(canvas, ctx, travel, "TRAVEL");
    lines_in_box(canvas, travel, 10);

    let books = Rect::new(col_x(0), content.y, col_width * 2.0 + COLUMN_GAP, bottom_height);
    section_box(canvas, ctx, books, "BOOKS");
    lines_in_box(canvas, books, 8);
    let links = Rect::new(col_x(2), content.y, col_width, bottom_height);
    section_box(canvas, ctx, links, "LINKS");
    lines_in_box(canvas, links, 8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::draw::DrawCommand;
    use crate::graph::{PageGraph, PageId};
    use crate::testing::GraphResolver;

    #[test]
    fn test_index_sections_and_no_links() {
        let config = PlannerConfig::for_year(2025);
        let graph = PageGraph::build(&config);
        let resolver = GraphResolver(&graph);
        let ctx = RenderContext::new(&config);
        let mut canvas = PageCanvas::new(PageId::Index, &resolver);
        render(&ctx, &mut canvas);

        let titles: Vec<String> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            titles,
            vec!["ACTIVE PROJECTS", "AREAS", "LEARNINGS", "TRAVEL", "BOOKS", "LINKS"]
        );
        assert!(canvas.links().is_empty());
    }
}
