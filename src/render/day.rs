//! Day page. Left column (40%): top three priorities and an hourly
//! schedule. Right column (60%): to-do list, reflection, water and weather
//! trackers, and a dotted notes area filling what's left.

use std::f64::consts::PI;

use crate::draw::{DrawCommand, PageCanvas, Rect, Stroke};
use crate::graph::PageNode;
use crate::style::Color;

use super::{checkbox_line, lines_in_box, page_title, section_box, RenderContext};

pub const FIRST_HOUR: u32 = 6;
pub const LAST_HOUR: u32 = 22;
pub const TODO_LINES: usize = 10;
const TODO_LINE_HEIGHT: f64 = 20.0;
const COLUMN_GAP: f64 = 20.0;
const SECTION_GAP: f64 = 15.0;
const PRIORITIES_HEIGHT: f64 = 100.0;
const REFLECT_HEIGHT: f64 = 80.0;
const TRACKER_HEIGHT: f64 = 50.0;
const DOT_SPACING: f64 = 20.0;
const WATER_GLASSES: usize = 6;
const ICON_GREY: Color = Color::gray(0.5);

pub fn render(node: &PageNode, ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let content = ctx.content();
    page_title(canvas, ctx, &node.title, 15.0);

    let left_w = (content.width - COLUMN_GAP) * 0.4;
    let right_w = (content.width - COLUMN_GAP) * 0.6;
    let right_x = content.x + left_w + COLUMN_GAP;

    // Left column.
    let mut top = content.top();
    let priorities = Rect::new(content.x, top - PRIORITIES_HEIGHT, left_w, PRIORITIES_HEIGHT);
    section_box(canvas, ctx, priorities, "TOP 3 PRIORITIES");
    for i in 0..3 {
        checkbox_line(canvas, content.x + 10.0, top - 40.0 - i as f64 * 25.0, left_w - 20.0);
    }
    top -= PRIORITIES_HEIGHT + SECTION_GAP;

    let schedule = Rect::new(content.x, content.y, left_w, top - content.y);
    section_box(canvas, ctx, schedule, "SCHEDULE");
    timeline(canvas, ctx, schedule);

    // Right column.
    let mut top = content.top();
    let todo_h = TODO_LINES as f64 * TODO_LINE_HEIGHT + 30.0;
    section_box(canvas, ctx, Rect::new(right_x, top - todo_h, right_w, todo_h), "TO-DO LIST");
    for i in 0..TODO_LINES {
        checkbox_line(canvas, right_x + 10.0, top - 40.0 - i as f64 * TODO_LINE_HEIGHT, right_w - 20.0);
    }
    top -= todo_h + SECTION_GAP;

    let reflect = Rect::new(right_x, top - REFLECT_HEIGHT, right_w, REFLECT_HEIGHT);
    section_box(canvas, ctx, reflect, "REFLECT / GRATITUDE");
    lines_in_box(canvas, reflect, 2);
    top -= REFLECT_HEIGHT + SECTION_GAP;

    let half = (right_w - 10.0) / 2.0;
    let water = Rect::new(right_x, top - TRACKER_HEIGHT, half, TRACKER_HEIGHT);
    section_box(canvas, ctx, water, "WATER");
    water_glasses(canvas, water);
    let weather = Rect::new(right_x + half + 10.0, top - TRACKER_HEIGHT, half, TRACKER_HEIGHT);
    section_box(canvas, ctx, weather, "WEATHER");
    weather_icons(canvas, weather);
    top -= TRACKER_HEIGHT + SECTION_GAP;

    let notes = Rect::new(right_x, content.y, right_w, top - content.y);
    section_box(canvas, ctx, notes, "NOTES");
    dot_grid(canvas, notes);
}

/// Hour labels and rules from 06:00 through 22:00.
fn timeline(canvas: &mut PageCanvas<'_>, ctx: &RenderContext<'_>, area: Rect) {
    let hours = LAST_HOUR - FIRST_HOUR + 1;
    let hour_h = (area.height - 40.0) / hours as f64;
    for (i, hour) in (FIRST_HOUR..=LAST_HOUR).enumerate() {
        let y = area.top() - 40.0 - i as f64 * hour_h;
        canvas.text(area.x + 5.0, y - 4.0, format!("{}:00", hour), ctx.font(), 9.0, ICON_GREY);
        canvas.line((area.x + 35.0, y), (area.right() - 10.0, y), Stroke::solid(Color::gray(0.9), 0.5));
    }
}

fn water_glasses(canvas: &mut PageCanvas<'_>, area: Rect) {
    let size = 12.0;
    let gap = 5.0;
    let start = area.x + (area.width - WATER_GLASSES as f64 * (size + gap)) / 2.0 + 5.0;
    for i in 0..WATER_GLASSES {
        let x = start + i as f64 * (size + gap);
        canvas.push(DrawCommand::Path {
            points: droplet(x + size / 2.0, area.y + 15.0, size),
            closed: true,
            fill: Some(Color::WHITE),
            stroke: Some(Stroke::solid(Color::gray(0.6), 1.0)),
        });
    }
}

/// A droplet `size` tall standing on `base_y`: a pointed top over a round bottom.
fn droplet(cx: f64, base_y: f64, size: f64) -> Vec<(f64, f64)> {
    let r = size * 0.35;
    let cy = base_y + r;
    let mut points = vec![(cx, base_y + size)];
    for step in 0..=10 {
        // From the right side round the bottom to the left side.
        let a = step as f64 / 10.0 * PI;
        points.push((cx + r * a.cos(), cy - r * a.sin()));
    }
    points
}

fn weather_icons(canvas: &mut PageCanvas<'_>, area: Rect) {
    let size = 12.0;
    let gap = 8.0;
    let start = area.x + (area.width - 5.0 * (size + gap)) / 2.0 + 5.0;
    let y = area.y + 15.0;
    let stroke = Stroke::solid(ICON_GREY, 1.0);

    for i in 0..5 {
        let x = start + i as f64 * (size + gap);
        let (cx, cy) = (x + size / 2.0, y + size / 2.0);
        match i {
            // Sun
            0 => {
                canvas.dot(cx, cy, 2.5, ICON_GREY);
                for ray in 0..8 {
                    let a = ray as f64 * PI / 4.0;
                    canvas.line(
                        (cx + 4.0 * a.cos(), cy + 4.0 * a.sin()),
                        (cx + 6.0 * a.cos(), cy + 6.0 * a.sin()),
                        stroke,
                    );
                }
            }
            // Cloud
            1 => {
                canvas.dot(cx - 2.5, cy - 1.0, 3.0, ICON_GREY);
                canvas.dot(cx + 1.0, cy + 1.0, 3.5, ICON_GREY);
                canvas.dot(cx + 3.5, cy - 1.5, 2.5, ICON_GREY);
            }
            // Storm
            2 => canvas.push(DrawCommand::Path {
                points: vec![
                    (x + 7.0, y + 12.0),
                    (x + 3.0, y + 5.5),
                    (x + 6.0, y + 5.5),
                    (x + 4.5, y),
                    (x + 9.5, y + 7.0),
                    (x + 6.5, y + 7.0),
                    (x + 9.0, y + 12.0),
                ],
                closed: true,
                fill: Some(ICON_GREY),
                stroke: None,
            }),
            // Wind
            3 => {
                for (dy, len) in [(3.0, 10.0), (6.0, 12.0), (9.0, 8.0)] {
                    canvas.line((x, y + dy), (x + len, y + dy), stroke);
                }
            }
            // Snow
            _ => canvas.push(DrawCommand::Circle {
                cx,
                cy,
                radius: 5.0,
                fill: None,
                stroke: Some(stroke),
            }),
        }
    }
}

/// Dots every 20pt inside a section body.
fn dot_grid(canvas: &mut PageCanvas<'_>, area: Rect) {
    let cols = ((area.width - 20.0) / DOT_SPACING).floor().max(0.0) as usize;
    let rows = ((area.height - 40.0) / DOT_SPACING).floor().max(0.0) as usize;
    for r in 0..rows {
        for c in 0..cols {
            canvas.dot(
                area.x + 10.0 + c as f64 * DOT_SPACING,
                area.top() - 40.0 - r as f64 * DOT_SPACING,
                1.0,
                Color::RULE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::graph::{PageGraph, PageId};
    use crate::testing::GraphResolver;
    use chrono::NaiveDate;

    fn render_day(config: &PlannerConfig) -> (Vec<DrawCommand>, usize) {
        let graph = PageGraph::build(config);
        let resolver = GraphResolver(&graph);
        let ctx = RenderContext::new(config);
        let id = PageId::Day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let mut canvas = PageCanvas::new(id, &resolver);
        render(graph.get(&id).unwrap(), &ctx, &mut canvas);
        let (commands, links) = canvas.finish();
        (commands, links.len())
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_day_sections_and_title() {
        let (commands, links) = render_day(&PlannerConfig::for_year(2025));
        let texts = texts(&commands);
        assert_eq!(texts[0], "Wednesday, January 1, 2025");
        for section in ["TOP 3 PRIORITIES", "SCHEDULE", "TO-DO LIST", "REFLECT / GRATITUDE", "WATER", "WEATHER", "NOTES"] {
            assert!(texts.contains(&section), "missing {}", section);
        }
        assert_eq!(links, 0);
    }

    #[test]
    fn test_schedule_covers_six_to_twenty_two() {
        let (commands, _) = render_day(&PlannerConfig::for_year(2025));
        let texts = texts(&commands);
        let hours: Vec<&&str> = texts.iter().filter(|t| t.ends_with(":00")).collect();
        assert_eq!(hours.len(), 17);
        assert_eq!(*hours[0], "6:00");
        assert_eq!(*hours[16], "22:00");
    }

    #[test]
    fn test_droplet_shape() {
        let points = droplet(10.0, 0.0, 12.0);
        assert_eq!(points[0], (10.0, 12.0));
        let lowest = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        assert!(lowest.abs() < 1e-9);
    }
}
