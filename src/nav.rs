//! # Navigation Overlay
//!
//! Every page except the cover carries the same chrome:
//!
//! - twelve month tabs stacked along the tab strip, one seasonal color each,
//!   labels rotated to read along the strip;
//! - a right-aligned row of icons in the top strip: home and year always,
//!   then month, week, previous day and next day on calendar pages;
//! - the appendix section titles, packed right-to-left just left of the icons.
//!
//! [`Overlay::compute`] works out every rectangle and every target identifier
//! without looking at page handles. [`Overlay::draw`] emits it onto a
//! [`PageCanvas`], which silently drops links whose target page doesn't exist
//! (the day before January 1st, a month outside the span, ...).

use chrono::{Datelike, Days};

use crate::calendar::{self, MONTH_ABBREVIATIONS};
use crate::config::{Handedness, PlannerConfig};
use crate::draw::{DrawCommand, PageCanvas, Rect, Stroke};
use crate::font::FontContext;
use crate::geometry::GeometryProfile;
use crate::graph::{PageId, PageKind, PageNode};
use crate::style::Color;

pub const ICON_SIZE: f64 = 16.0;
pub const ICON_GAP: f64 = 20.0;
/// Extra touch area around each icon.
pub const ICON_HIT_PADDING: f64 = 5.0;
/// Distance from the icon row baseline to the top of the content area.
pub const ICON_ROW_OFFSET: f64 = 12.0;
/// Space between the icon group and the rightmost appendix label.
pub const APPENDIX_OFFSET: f64 = 20.0;
pub const APPENDIX_GAP: f64 = 15.0;
pub const APPENDIX_FONT_SIZE: f64 = 10.0;
pub const APPENDIX_LABEL_CHARS: usize = 8;
pub const TAB_FONT_SIZE: f64 = 10.0;

/// One color per month, winter through fall and back.
pub const MONTH_TAB_COLORS: [Color; 12] = [
    Color::rgb(0.9, 0.92, 0.95),  // cool grey
    Color::rgb(0.85, 0.9, 0.95),  // pale blue
    Color::rgb(0.7, 0.8, 0.95),   // bluebonnet
    Color::rgb(0.85, 0.7, 0.9),   // wildflower
    Color::rgb(0.7, 0.9, 0.7),    // fresh green
    Color::rgb(0.95, 0.9, 0.6),   // sunny yellow
    Color::rgb(0.95, 0.8, 0.6),   // bright orange
    Color::rgb(0.95, 0.7, 0.6),   // hot red
    Color::rgb(0.9, 0.6, 0.4),    // burnt orange
    Color::rgb(0.95, 0.7, 0.4),   // pumpkin
    Color::rgb(0.85, 0.75, 0.65), // harvest brown
    Color::rgb(0.95, 0.95, 0.98), // icy white
];

const TAB_BORDER: Color = Color::gray(0.6);
const TAB_TEXT: Color = Color::gray(0.2);
const ICON_COLOR: Color = Color::gray(0.3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Home,
    Year,
    Month,
    Week,
    PreviousDay,
    NextDay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTab {
    /// 1-12.
    pub month: u32,
    pub label: &'static str,
    pub rect: Rect,
    pub color: Color,
    pub target: PageId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub kind: IconKind,
    /// Where the glyph is drawn.
    pub rect: Rect,
    /// The link area, larger than the glyph.
    pub hit: Rect,
    pub target: PageId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppendixLabel {
    pub section: usize,
    pub label: String,
    pub rect: Rect,
    pub target: PageId,
}

/// Navigation chrome for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub tabs: Vec<MonthTab>,
    pub icons: Vec<Icon>,
    pub appendix: Vec<AppendixLabel>,
}

impl Overlay {
    pub fn compute(
        node: &PageNode,
        geometry: &GeometryProfile,
        config: &PlannerConfig,
        fonts: &FontContext,
    ) -> Self {
        if node.kind == PageKind::Cover {
            return Overlay::default();
        }

        let tabs = month_tabs(geometry, config);
        let icons = icon_row(node, geometry, config);
        let group_x = icons.first().map(|i| i.rect.x).unwrap_or(geometry.width - geometry.margin_right);
        let appendix = appendix_labels(group_x, geometry, config, fonts);

        Overlay {
            tabs,
            icons,
            appendix,
        }
    }

    /// Emit drawing commands and links onto a page.
    pub fn draw(&self, canvas: &mut PageCanvas<'_>, fonts: &FontContext, handedness: Handedness) {
        let font = fonts.regular();

        for tab in &self.tabs {
            canvas.rect(tab.rect, Some(tab.color), Some(Stroke::solid(TAB_BORDER, 0.5)));

            let width = fonts.measure_regular(tab.label, TAB_FONT_SIZE);
            let cx = tab.rect.x + tab.rect.width / 2.0;
            let cy = tab.rect.y + tab.rect.height / 2.0;
            let half_cap = TAB_FONT_SIZE * 0.35;
            // Tabs on the left edge read bottom to top, on the right edge top to bottom.
            let (x, y, rotation) = match handedness {
                Handedness::Right => (cx + half_cap, cy - width / 2.0, 90.0),
                Handedness::Left => (cx - half_cap, cy + width / 2.0, -90.0),
            };
            canvas.push(DrawCommand::Text {
                x,
                y,
                text: tab.label.to_string(),
                font,
                size: TAB_FONT_SIZE,
                color: TAB_TEXT,
                rotation,
            });

            canvas.link(tab.rect, tab.target);
        }

        for icon in &self.icons {
            draw_icon(canvas, icon.kind, icon.rect);
            canvas.link(icon.hit, icon.target);
        }

        for label in &self.appendix {
            canvas.text(
                label.rect.x,
                label.rect.y + 4.0,
                label.label.clone(),
                font,
                APPENDIX_FONT_SIZE,
                Color::MUTED,
            );
            canvas.link(label.rect, label.target);
        }
    }
}

/// Twelve stacked tabs covering the content height.
fn month_tabs(geometry: &GeometryProfile, config: &PlannerConfig) -> Vec<MonthTab> {
    let tab_height = geometry.content_height / 12.0;
    let x = geometry.tab_x();
    let anchors = calendar::month_anchors(config.year, config.start_month, config.duration_months);

    (0..12u32)
        .map(|i| {
            let month = i + 1;
            let top = geometry.height - geometry.margin_top - i as f64 * tab_height;
            // The first occurrence of this month in the span; outside the
            // span the target simply won't resolve.
            let target = anchors
                .iter()
                .find(|a| a.month() == month)
                .map(|a| PageId::month_of(*a))
                .unwrap_or(PageId::Month {
                    year: config.year,
                    month,
                });
            MonthTab {
                month,
                label: MONTH_ABBREVIATIONS[i as usize],
                rect: Rect::new(x, top - tab_height, geometry.tab_width, tab_height),
                color: MONTH_TAB_COLORS[i as usize],
                target,
            }
        })
        .collect()
}

/// Which icons a page gets, in left-to-right order.
pub fn icon_targets(node: &PageNode, config: &PlannerConfig) -> Vec<(IconKind, PageId)> {
    let mut targets = vec![
        (IconKind::Home, PageId::Index),
        (IconKind::Year, PageId::YearOverview),
    ];

    let Some(date) = node.date else {
        return targets;
    };

    targets.push((IconKind::Month, PageId::month_of(date)));
    targets.push((
        IconKind::Week,
        PageId::Week(calendar::week_start_of(date, config.week_start)),
    ));

    if let Some(prev) = date.checked_sub_days(Days::new(1)) {
        if prev.year() == config.year {
            targets.push((IconKind::PreviousDay, PageId::Day(prev)));
        }
    }
    if let Some(next) = date.checked_add_days(Days::new(1)) {
        if next.year() == config.year {
            targets.push((IconKind::NextDay, PageId::Day(next)));
        }
    }

    targets
}

fn icon_row(node: &PageNode, geometry: &GeometryProfile, config: &PlannerConfig) -> Vec<Icon> {
    let targets = icon_targets(node, config);
    let count = targets.len() as f64;
    let total_width = count * (ICON_SIZE + ICON_GAP) - ICON_GAP;
    let group_x = geometry.width - geometry.margin_right - total_width;
    let y = geometry.height - geometry.margin_top + ICON_ROW_OFFSET;

    targets
        .into_iter()
        .enumerate()
        .map(|(i, (kind, target))| {
            let rect = Rect::new(group_x + i as f64 * (ICON_SIZE + ICON_GAP), y, ICON_SIZE, ICON_SIZE);
            Icon {
                kind,
                rect,
                hit: rect.inflate(ICON_HIT_PADDING),
                target,
            }
        })
        .collect()
}

/// Section labels packed leftwards from the icon group. The last configured
/// section ends up rightmost.
fn appendix_labels(
    group_x: f64,
    geometry: &GeometryProfile,
    config: &PlannerConfig,
    fonts: &FontContext,
) -> Vec<AppendixLabel> {
    let y = geometry.height - geometry.margin_top + ICON_ROW_OFFSET;
    let mut cursor = group_x - APPENDIX_OFFSET;
    let mut labels = Vec::with_capacity(config.custom_sections.len());

    for (section, config_section) in config.custom_sections.iter().enumerate().rev() {
        let label: String = config_section.title.chars().take(APPENDIX_LABEL_CHARS).collect();
        let width = fonts.measure_regular(&label, APPENDIX_FONT_SIZE);
        cursor -= width;
        labels.push(AppendixLabel {
            section,
            label,
            rect: Rect::new(cursor, y, width, ICON_SIZE),
            target: PageId::section_start(section),
        });
        cursor -= APPENDIX_GAP;
    }

    labels
}

/// Draw an icon glyph inside a 16pt box.
fn draw_icon(canvas: &mut PageCanvas<'_>, kind: IconKind, r: Rect) {
    let (x, y) = (r.x, r.y);
    let s = r.width / ICON_SIZE;
    let p = |dx: f64, dy: f64| (x + dx * s, y + dy * s);
    let outline = Stroke::solid(ICON_COLOR, 1.0);

    match kind {
        IconKind::Home => {
            canvas.push(DrawCommand::Path {
                points: vec![p(2.0, 1.0), p(2.0, 9.0), p(8.0, 15.0), p(14.0, 9.0), p(14.0, 1.0)],
                closed: true,
                fill: None,
                stroke: Some(outline),
            });
            canvas.stroke_rect(Rect::new(x + 6.5 * s, y + 1.0 * s, 3.0 * s, 5.0 * s), outline);
        }
        IconKind::Year => {
            let body = Rect::new(x + 1.5 * s, y + 1.0 * s, 13.0 * s, 12.5 * s);
            canvas.stroke_rect(body, outline);
            canvas.line(p(1.5, 10.0), p(14.5, 10.0), outline);
            canvas.line(p(5.0, 12.5), p(5.0, 15.5), outline);
            canvas.line(p(11.0, 12.5), p(11.0, 15.5), outline);
        }
        IconKind::Month => {
            for row in 0..2 {
                for col in 0..3 {
                    let cell = Rect::new(
                        x + (1.0 + col as f64 * 5.0) * s,
                        y + (2.0 + row as f64 * 6.5) * s,
                        4.0 * s,
                        5.5 * s,
                    );
                    canvas.fill_rect(cell, ICON_COLOR);
                }
            }
        }
        IconKind::Week => {
            canvas.fill_rect(Rect::new(x + 1.0 * s, y + 2.0 * s, 14.0 * s, 5.0 * s), ICON_COLOR);
            canvas.fill_rect(Rect::new(x + 1.0 * s, y + 9.0 * s, 14.0 * s, 5.0 * s), ICON_COLOR);
        }
        IconKind::PreviousDay | IconKind::NextDay => {
            let points = if kind == IconKind::PreviousDay {
                vec![p(10.5, 14.0), p(4.5, 8.0), p(10.5, 2.0)]
            } else {
                vec![p(5.5, 14.0), p(11.5, 8.0), p(5.5, 2.0)]
            };
            canvas.push(DrawCommand::Path {
                points,
                closed: false,
                fill: None,
                stroke: Some(Stroke::solid(ICON_COLOR, 1.5)),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppendixSection, NoteTemplate};
    use crate::graph::PageGraph;
    use crate::testing::GraphResolver;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn with_sections(titles: &[&str]) -> PlannerConfig {
        let mut config = PlannerConfig::for_year(2025);
        for title in titles {
            config.custom_sections.push(AppendixSection {
                title: title.to_string(),
                page_count: 2,
                template: NoteTemplate::Lined,
            });
        }
        config
    }

    fn links_for(config: &PlannerConfig, id: PageId) -> Vec<crate::draw::LinkRequest> {
        let graph = PageGraph::build(config);
        let geometry = GeometryProfile::for_config(config);
        let fonts = FontContext::for_family(&config.theme.font);
        let resolver = GraphResolver(&graph);
        let node = graph.get(&id).unwrap();
        let mut canvas = PageCanvas::new(id, &resolver);
        Overlay::compute(node, &geometry, config, &fonts).draw(&mut canvas, &fonts, geometry.handedness);
        canvas.finish().1
    }

    #[test]
    fn test_cover_has_no_overlay() {
        let config = PlannerConfig::for_year(2025);
        let graph = PageGraph::build(&config);
        let overlay = Overlay::compute(
            graph.get(&PageId::Cover).unwrap(),
            &GeometryProfile::for_config(&config),
            &config,
            &FontContext::new(),
        );
        assert_eq!(overlay, Overlay::default());
    }

    #[test]
    fn test_month_tabs_stack_along_strip() {
        let config = PlannerConfig::for_year(2025);
        let geometry = GeometryProfile::for_config(&config);
        let tabs = month_tabs(&geometry, &config);
        assert_eq!(tabs.len(), 12);
        let height = geometry.content_height / 12.0;
        assert!((tabs[0].rect.top() - (geometry.height - geometry.margin_top)).abs() < 1e-9);
        assert!((tabs[11].rect.y - geometry.margin_bottom).abs() < 1e-9);
        for tab in &tabs {
            assert_eq!(tab.rect.x, 0.0);
            assert_eq!(tab.rect.width, 40.0);
            assert!((tab.rect.height - height).abs() < 1e-9);
        }
        assert_eq!(tabs[8].label, "Sep");
        assert_eq!(tabs[8].target, PageId::Month { year: 2025, month: 9 });
    }

    #[test]
    fn test_month_tabs_follow_span_across_years() {
        let mut config = PlannerConfig::for_year(2025);
        config.start_month = 7;
        let geometry = GeometryProfile::for_config(&config);
        let tabs = month_tabs(&geometry, &config);
        assert_eq!(tabs[0].target, PageId::Month { year: 2026, month: 1 });
        assert_eq!(tabs[6].target, PageId::Month { year: 2025, month: 7 });
    }

    #[test]
    fn test_tabs_sit_away_from_stylus_hand() {
        let mut config = PlannerConfig::for_year(2025);
        config.handedness = Handedness::Left;
        let geometry = GeometryProfile::for_config(&config);
        assert!(month_tabs(&geometry, &config).iter().all(|t| t.rect.x == 560.0));
        assert!(month_tabs(&geometry, &config)
            .iter()
            .all(|t| t.rect.x >= geometry.width - geometry.margin_right));

        config.handedness = Handedness::Right;
        let geometry = GeometryProfile::for_config(&config);
        assert!(month_tabs(&geometry, &config)
            .iter()
            .all(|t| t.rect.right() <= geometry.margin_left));
    }

    #[test]
    fn test_index_page_gets_home_and_year_only() {
        let config = PlannerConfig::for_year(2025);
        let graph = PageGraph::build(&config);
        let kinds: Vec<IconKind> = icon_targets(graph.get(&PageId::Index).unwrap(), &config)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(kinds, vec![IconKind::Home, IconKind::Year]);

        let year = icon_targets(graph.get(&PageId::YearOverview).unwrap(), &config);
        assert_eq!(year.len(), 2);
    }

    #[test]
    fn test_day_page_icon_targets() {
        let config = PlannerConfig::for_year(2025);
        let graph = PageGraph::build(&config);
        let targets = icon_targets(graph.get(&PageId::Day(ymd(2025, 3, 1))).unwrap(), &config);
        assert_eq!(
            targets,
            vec![
                (IconKind::Home, PageId::Index),
                (IconKind::Year, PageId::YearOverview),
                (IconKind::Month, PageId::Month { year: 2025, month: 3 }),
                (IconKind::Week, PageId::Week(ymd(2025, 2, 23))),
                (IconKind::PreviousDay, PageId::Day(ymd(2025, 2, 28))),
                (IconKind::NextDay, PageId::Day(ymd(2025, 3, 2))),
            ]
        );
    }

    #[test]
    fn test_no_previous_day_before_january_first() {
        let config = PlannerConfig::for_year(2025);
        let id = PageId::Day(ymd(2025, 1, 1));
        let links = links_for(&config, id);
        assert!(links.iter().all(|l| l.target != PageId::Day(ymd(2024, 12, 31))));
        assert!(links.iter().any(|l| l.target == PageId::Day(ymd(2025, 1, 2))));
    }

    #[test]
    fn test_bleed_day_outside_year_drops_cross_year_links() {
        // Dec 31 2024 is a bleed day of January 2025. It exists as a page,
        // but its month page doesn't, and the day before it is outside the year.
        let config = PlannerConfig::for_year(2025);
        let links = links_for(&config, PageId::Day(ymd(2024, 12, 31)));
        assert!(links.iter().all(|l| l.target != PageId::Month { year: 2024, month: 12 }));
        assert!(links.iter().any(|l| l.target == PageId::Week(ymd(2024, 12, 29))));
        assert!(links.iter().all(|l| l.target != PageId::Day(ymd(2024, 12, 30))));
        assert!(links.iter().any(|l| l.target == PageId::Day(ymd(2025, 1, 1))));
    }

    #[test]
    fn test_icon_row_right_aligned() {
        let config = PlannerConfig::for_year(2025);
        let graph = PageGraph::build(&config);
        let geometry = GeometryProfile::for_config(&config);
        let icons = icon_row(graph.get(&PageId::Day(ymd(2025, 6, 15))).unwrap(), &geometry, &config);
        assert_eq!(icons.len(), 6);
        let last = icons.last().unwrap();
        assert!((last.rect.right() - (geometry.width - geometry.margin_right)).abs() < 1e-9);
        assert_eq!(icons[0].rect.x, 540.0 - (6.0 * 36.0 - 20.0));
        assert_eq!(icons[0].rect.y, 892.0);
        assert_eq!(icons[0].hit, icons[0].rect.inflate(5.0));
    }

    #[test]
    fn test_appendix_labels_pack_right_to_left() {
        let config = with_sections(&["Journal", "Meeting Notes", "Ideas"]);
        let geometry = GeometryProfile::for_config(&config);
        let fonts = FontContext::new();
        let group_x = 400.0;
        let labels = appendix_labels(group_x, &geometry, &config, &fonts);

        let order: Vec<usize> = labels.iter().map(|l| l.section).collect();
        assert_eq!(order, vec![2, 1, 0]);
        assert_eq!(labels[1].label, "Meeting ");

        // Rightmost label ends 20pt left of the icons.
        assert!((labels[0].rect.right() - (group_x - APPENDIX_OFFSET)).abs() < 1e-9);
        for pair in labels.windows(2) {
            let gap = pair[0].rect.x - pair[1].rect.right();
            assert!((gap - APPENDIX_GAP).abs() < 1e-9);
        }
        assert_eq!(labels[2].target, PageId::Note { section: 0, page: 0 });
    }

    #[test]
    fn test_empty_appendix_contributes_nothing() {
        let config = PlannerConfig::for_year(2025);
        let geometry = GeometryProfile::for_config(&config);
        assert!(appendix_labels(300.0, &geometry, &config, &FontContext::new()).is_empty());
    }

    #[test]
    fn test_overlay_links_resolve_to_sections() {
        let config = with_sections(&["Journal"]);
        let links = links_for(&config, PageId::Index);
        assert!(links.iter().any(|l| l.target == PageId::section_start(0)));
        // 12 tabs + home + year + one section label.
        assert_eq!(links.len(), 15);
    }
}
