//! Year overview: one linked cell per month of the span, then yearly goals.

use crate::calendar::MONTH_NAMES;
use crate::draw::{PageCanvas, Rect, Stroke};
use crate::graph::{PageId, PageNode};
use crate::style::Color;

use super::{page_title, RenderContext};

const COLUMNS: usize = 3;
const MIN_ROWS: usize = 4;
const CELL_INSET: f64 = 5.0;
const GOAL_LINE_SPACING: f64 = 25.0;

pub fn render(node: &PageNode, ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let content = ctx.content();
    page_title(canvas, ctx, &node.title, 15.0);

    let goals_height = content.height * 0.2;
    let grid_height = content.height - goals_height - 20.0;
    let grid_top = content.top();

    for (cell, target) in month_cells(node, content.x, grid_top, content.width, grid_height) {
        canvas.rect(
            cell,
            Some(Color::gray(0.98)),
            Some(Stroke::solid(Color::gray(0.9), 1.0)),
        );
        canvas.text(
            cell.x + 10.0,
            cell.top() - 20.0,
            cell_label(target, ctx.config.year),
            ctx.font(),
            12.0,
            ctx.accent,
        );
        canvas.link(cell, target);
    }

    let goals_y = content.y;
    canvas.text(content.x, goals_y + goals_height - 15.0, "Yearly Goals", ctx.font(), 14.0, Color::BLACK);
    canvas.stroke_rect(
        Rect::new(content.x, goals_y, content.width, goals_height - 25.0),
        Stroke::hairline(),
    );
    let lines = ((goals_height - 35.0) / GOAL_LINE_SPACING).floor().max(0.0) as usize;
    for i in 0..lines {
        let y = goals_y + goals_height - 45.0 - i as f64 * GOAL_LINE_SPACING;
        canvas.line(
            (content.x + 10.0, y),
            (content.right() - 10.0, y),
            Stroke::dashed(Color::RULE, 0.5, 2.0, 2.0),
        );
    }
}

/// Month cells in reading order, inset from the grid. Spans longer than a
/// year add rows instead of shrinking the columns.
fn month_cells(
    node: &PageNode,
    x: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Vec<(Rect, PageId)> {
    let count = node.links.len();
    let rows = MIN_ROWS.max((count + COLUMNS - 1) / COLUMNS);
    let cell_w = width / COLUMNS as f64;
    let cell_h = height / rows as f64;

    node.links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let col = (i % COLUMNS) as f64;
            let row = (i / COLUMNS) as f64;
            let cell = Rect::new(x + col * cell_w, top - (row + 1.0) * cell_h, cell_w, cell_h);
            (cell.inflate(-CELL_INSET), link.target)
        })
        .collect()
}

/// `March`, or `March 2026` when the month is outside the planner year.
fn cell_label(target: PageId, planner_year: i32) -> String {
    match target {
        PageId::Month { year, month } => {
            let name = MONTH_NAMES[(month as usize).saturating_sub(1) % 12];
            if year == planner_year {
                name.to_string()
            } else {
                format!("{} {}", name, year)
            }
        }
        other => other.to_string(),
    }
}
