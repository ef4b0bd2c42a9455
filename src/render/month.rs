//! Month page: weekday header, a six-row day grid and monthly goals.
//!
//! Each row starts with a narrow week cell linking to that week's page, so a
//! week that straddles two months is reachable from both. Day cells link to
//! their day pages, bleed days included.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{self, MonthGrid};
use crate::draw::{PageCanvas, Rect, Stroke};
use crate::graph::{PageId, PageNode};
use crate::style::Color;

use super::{lines_in_box, page_title, section_box, RenderContext};

pub const GRID_ROWS: usize = 6;
pub const HEADER_HEIGHT: f64 = 30.0;
/// Width of the week-link column left of the grid.
pub const WEEK_COLUMN_WIDTH: f64 = 24.0;

const BLEED_FILL: Color = Color::gray(0.98);
const BLEED_TEXT: Color = Color::gray(0.6);
const HEADER_TEXT: Color = Color::gray(0.3);

/// Where everything on a month page goes.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub header: Vec<Rect>,
    /// One per displayed week: the week cell and its seven day cells.
    pub rows: Vec<(Rect, [Rect; 7])>,
    pub goals: Rect,
}

pub fn layout(content: Rect, weeks: usize) -> MonthLayout {
    let goals_height = content.height * 0.2;
    let grid_height = content.height - goals_height - 20.0;
    let grid_x = content.x + WEEK_COLUMN_WIDTH;
    let cell_w = (content.width - WEEK_COLUMN_WIDTH) / 7.0;
    let cell_h = (grid_height - HEADER_HEIGHT) / GRID_ROWS as f64;
    let header_y = content.top() - HEADER_HEIGHT;

    let header = (0..7)
        .map(|i| Rect::new(grid_x + i as f64 * cell_w, header_y, cell_w, HEADER_HEIGHT))
        .collect();

    let rows = (0..weeks.min(GRID_ROWS))
        .map(|row| {
            let y = header_y - (row + 1) as f64 * cell_h;
            let week = Rect::new(content.x, y, WEEK_COLUMN_WIDTH, cell_h);
            let days = std::array::from_fn(|col| Rect::new(grid_x + col as f64 * cell_w, y, cell_w, cell_h));
            (week, days)
        })
        .collect();

    MonthLayout {
        header,
        rows,
        goals: Rect::new(content.x, content.y, content.width, goals_height),
    }
}

pub fn render(node: &PageNode, ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let Some(anchor) = node.date else {
        log::warn!("{}: month page without a date", node.id);
        return;
    };
    let week_start = ctx.config.week_start;
    let grid = MonthGrid::new(anchor, week_start);
    let plan = layout(ctx.content(), grid.weeks.len());
    let font = ctx.font();

    page_title(canvas, ctx, &node.title, 15.0);

    for (rect, label) in plan.header.iter().zip(calendar::weekday_labels(week_start)) {
        canvas.rect(*rect, Some(Color::HEADER_FILL), Some(Stroke::hairline()));
        canvas.text(rect.x + 5.0, rect.y + 10.0, label, font, 10.0, HEADER_TEXT);
    }

    for ((week_rect, day_rects), week) in plan.rows.iter().zip(&grid.weeks) {
        canvas.rect(*week_rect, Some(Color::HEADER_FILL), Some(Stroke::hairline()));
        canvas.text(
            week_rect.x + 4.0,
            week_rect.top() - 15.0,
            week_label(week),
            font,
            8.0,
            HEADER_TEXT,
        );
        canvas.link(*week_rect, PageId::Week(week[0]));

        for (rect, &date) in day_rects.iter().zip(week) {
            let in_month = grid.in_month(date);
            canvas.rect(
                *rect,
                Some(if in_month { Color::WHITE } else { BLEED_FILL }),
                Some(Stroke::hairline()),
            );
            canvas.text(
                rect.x + 5.0,
                rect.top() - 15.0,
                date.day().to_string(),
                font,
                12.0,
                if in_month { Color::BLACK } else { BLEED_TEXT },
            );
            canvas.link(*rect, PageId::Day(date));
        }
    }

    section_box(canvas, ctx, plan.goals, "MONTHLY GOALS");
    lines_in_box(canvas, plan.goals, 5);
}

/// ISO week number of the week's Thursday, e.g. `W14`.
fn week_label(week: &[NaiveDate; 7]) -> String {
    let thursday = week
        .iter()
        .find(|d| d.weekday() == chrono::Weekday::Thu)
        .unwrap_or(&week[0]);
    format!("W{}", thursday.iso_week().week())
}
