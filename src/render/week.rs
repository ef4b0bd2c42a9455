//! Week page: weekly focus and a habit tracker on top, then one linked row
//! per day.

use crate::calendar;
use crate::draw::{PageCanvas, Rect, Stroke};
use crate::graph::{PageId, PageNode};
use crate::style::Color;

use super::{page_title, RenderContext, CHECKBOX_SIZE};

pub const HABIT_ROWS: usize = 5;
const HABIT_NAME_WIDTH: f64 = 90.0;
const HABIT_HEADER_HEIGHT: f64 = 20.0;
const BOX_BORDER: Color = Color::gray(0.7);

pub fn render(node: &PageNode, ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let Some(start) = node.date else {
        log::warn!("{}: week page without a date", node.id);
        return;
    };
    let content = ctx.content();
    let font = ctx.font();
    page_title(canvas, ctx, &node.title, 15.0);

    let top_height = content.height * 0.2;
    let days_height = content.height - top_height - 20.0;
    let half = (content.width - 20.0) / 2.0;
    let box_y = content.top() - top_height;
    let box_h = top_height - 25.0;

    canvas.text(content.x, content.top() - 15.0, "Weekly Focus", font, 12.0, Color::BLACK);
    canvas.stroke_rect(Rect::new(content.x, box_y, half, box_h), Stroke::hairline());

    let habits = Rect::new(content.x + half + 20.0, box_y, half, box_h);
    canvas.text(habits.x, content.top() - 15.0, "Habit Tracker", font, 12.0, Color::BLACK);
    habit_grid(canvas, ctx, habits);

    let day_h = days_height / 7.0;
    let names = calendar::weekday_names(ctx.config.week_start);
    for (i, date) in calendar::week_days(start).into_iter().enumerate() {
        let row = Rect::new(content.x, content.y + days_height - (i + 1) as f64 * day_h, content.width, day_h);
        canvas.rect(row, Some(Color::WHITE), Some(Stroke::hairline()));
        canvas.text(row.x + 10.0, row.top() - 20.0, names[i], font, 12.0, Color::BLACK);
        canvas.text(
            row.x + 100.0,
            row.top() - 20.0,
            calendar::short_date(date),
            font,
            12.0,
            Color::gray(0.5),
        );
        canvas.link(row, PageId::Day(date));
    }
}

/// Five habits by seven days of checkboxes.
fn habit_grid(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, area: Rect) {
    let row_h = (area.height - HABIT_HEADER_HEIGHT) / HABIT_ROWS as f64;
    let col_w = (area.width - HABIT_NAME_WIDTH) / 7.0;
    let days_x = area.x + HABIT_NAME_WIDTH;

    for (i, label) in calendar::weekday_initials(ctx.config.week_start).into_iter().enumerate() {
        canvas.text(
            days_x + i as f64 * col_w + col_w / 2.0 - 3.0,
            area.top() - 14.0,
            label,
            ctx.font(),
            9.0,
            Color::MUTED,
        );
    }

    for row in 0..HABIT_ROWS {
        let y = area.top() - HABIT_HEADER_HEIGHT - (row + 1) as f64 * row_h;
        canvas.line((area.x, y), (days_x - 10.0, y), Stroke::hairline());
        for d in 0..7 {
            let x = days_x + d as f64 * col_w + col_w / 2.0 - CHECKBOX_SIZE / 2.0;
            canvas.stroke_rect(
                Rect::new(x, y + row_h / 2.0 - CHECKBOX_SIZE / 2.0, CHECKBOX_SIZE, CHECKBOX_SIZE),
                Stroke::solid(BOX_BORDER, 0.5),
            );
        }
    }
}
