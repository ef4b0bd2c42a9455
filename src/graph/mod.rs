//! # Page Graph
//!
//! The complete, ordered set of pages for one run, built before anything is
//! drawn. Insertion order is the print order:
//!
//! ```text
//! cover, index, year-overview,
//!   month-2025-01, week-2024-12-29, 2024-12-29 .. 2025-01-04, week-2025-01-05, ..
//!   month-2025-02, (weeks/days not already present) ..
//! section-0-page-0, section-0-page-1, ..
//! ```
//!
//! A week that straddles two months (or two years) is inserted once, the
//! first time a month grid mentions it, and both months link to that one
//! node. The same holds for every bleed day.
//!
//! Nodes are immutable once built. The only links stored on a node are the
//! year overview's month links, which need nothing but the graph itself;
//! everything else is resolved at render time against page handles.

pub mod id;

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{self, MONTH_ABBREVIATIONS};
use crate::config::{NoteTemplate, PlannerConfig};

pub use id::{PageId, ParsePageIdError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Cover,
    Index,
    Year,
    Month,
    Week,
    Day,
    Note,
}

/// Section data carried by appendix pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMeta {
    pub section_title: String,
    pub template: NoteTemplate,
    /// Zero-based position within the section.
    pub page_index: usize,
    pub total_pages: usize,
}

/// A link known at graph construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralLink {
    pub label: String,
    pub target: PageId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageNode {
    pub id: PageId,
    pub kind: PageKind,
    pub title: String,
    /// Calendar anchor for month, week and day pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteMeta>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<StructuralLink>,
}

impl PageNode {
    fn new(id: PageId, kind: PageKind, title: String) -> Self {
        Self {
            id,
            kind,
            title,
            date: None,
            note: None,
            links: Vec::new(),
        }
    }

    fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Ordered, deduplicated pages plus an identifier index.
#[derive(Debug, Clone, Default)]
pub struct PageGraph {
    nodes: Vec<PageNode>,
    index: HashMap<PageId, usize>,
}

impl PageGraph {
    /// Build the graph for a config.
    ///
    /// The config is assumed to be validated; dates that fall outside what
    /// the calendar can represent are skipped rather than reported.
    pub fn build(config: &PlannerConfig) -> Self {
        let mut graph = PageGraph::default();

        graph.add_page(PageNode::new(PageId::Cover, PageKind::Cover, "Cover".into()));
        graph.add_page(PageNode::new(PageId::Index, PageKind::Index, "Index".into()));

        let grids = calendar::enumerate(
            config.year,
            config.start_month,
            config.duration_months,
            config.week_start,
        );

        let mut year = PageNode::new(
            PageId::YearOverview,
            PageKind::Year,
            format!("{} Overview", config.year),
        );
        year.links = grids
            .iter()
            .map(|grid| StructuralLink {
                label: MONTH_ABBREVIATIONS[grid.anchor.month0() as usize].to_string(),
                target: PageId::month_of(grid.anchor),
            })
            .collect();
        graph.add_page(year);

        for grid in &grids {
            graph.add_page(
                PageNode::new(
                    PageId::month_of(grid.anchor),
                    PageKind::Month,
                    calendar::month_title(grid.anchor),
                )
                .with_date(grid.anchor),
            );

            for week in &grid.weeks {
                let start = week[0];
                let week_id = PageId::Week(start);
                if !graph.contains(&week_id) {
                    graph.add_page(
                        PageNode::new(
                            week_id,
                            PageKind::Week,
                            format!("Week of {}", calendar::short_date(start)),
                        )
                        .with_date(start),
                    );
                }

                for &day in week {
                    let day_id = PageId::Day(day);
                    if !graph.contains(&day_id) {
                        graph.add_page(
                            PageNode::new(day_id, PageKind::Day, calendar::long_date(day))
                                .with_date(day),
                        );
                    }
                }
            }
        }

        for (section_index, section) in config.custom_sections.iter().enumerate() {
            let total = section.page_count as usize;
            for page in 0..total {
                let mut node = PageNode::new(
                    PageId::Note {
                        section: section_index,
                        page,
                    },
                    PageKind::Note,
                    format!("{} - Page {}", section.title, page + 1),
                );
                node.note = Some(NoteMeta {
                    section_title: section.title.clone(),
                    template: section.template,
                    page_index: page,
                    total_pages: total,
                });
                graph.add_page(node);
            }
        }

        log::debug!(
            "built page graph: {} pages ({} months, {} sections)",
            graph.len(),
            grids.len(),
            config.custom_sections.len()
        );
        graph
    }

    /// Insert a node at the end. A node whose identifier is already present
    /// is ignored, so identifiers stay unique.
    fn add_page(&mut self, node: PageNode) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &PageId) -> Option<&PageNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Position of a page in print order.
    pub fn position(&self, id: &PageId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn nodes(&self) -> &[PageNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageNode> {
        self.nodes.iter()
    }

    /// Identifiers in insertion order.
    pub fn page_order(&self) -> Vec<PageId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count(&self, kind: PageKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppendixSection, WeekStart};
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_insertion_order_head() {
        let graph = PageGraph::build(&PlannerConfig::for_year(2025));
        let order: Vec<String> = graph.page_order().iter().map(|id| id.to_string()).collect();
        assert_eq!(
            &order[..6],
            &["cover", "index", "year-overview", "month-2025-01", "week-2024-12-29", "2024-12-29"]
        );
    }

    #[test]
    fn test_node_count_law() {
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            let mut config = PlannerConfig::for_year(2025);
            config.week_start = week_start;
            let grids = calendar::enumerate(2025, 1, 12, week_start);
            let weeks: HashSet<NaiveDate> =
                grids.iter().flat_map(|g| g.weeks.iter().map(|w| w[0])).collect();
            let days: HashSet<NaiveDate> = grids.iter().flat_map(|g| g.days()).collect();

            let graph = PageGraph::build(&config);
            assert_eq!(graph.len(), 3 + 12 + weeks.len() + days.len());
            assert_eq!(graph.count(PageKind::Week), weeks.len());
            assert_eq!(graph.count(PageKind::Day), days.len());
        }
    }

    #[test]
    fn test_boundary_week_created_once() {
        let mut config = PlannerConfig::for_year(2025);
        config.start_month = 12;
        config.duration_months = 2;
        let graph = PageGraph::build(&config);
        // Dec 28 2025 .. Jan 3 2026 belongs to both December and January grids.
        let week = PageId::Week(ymd(2025, 12, 28));
        let ids = graph.page_order();
        assert_eq!(ids.iter().filter(|id| **id == week).count(), 1);
        // It was inserted while walking December, before January's month node.
        assert!(graph.position(&week) < graph.position(&PageId::Month { year: 2026, month: 1 }));
    }

    #[test]
    fn test_year_overview_structural_links() {
        let graph = PageGraph::build(&PlannerConfig::for_year(2025));
        let year = graph.get(&PageId::YearOverview).unwrap();
        assert_eq!(year.title, "2025 Overview");
        assert_eq!(year.links.len(), 12);
        assert_eq!(year.links[0].label, "Jan");
        for (i, link) in year.links.iter().enumerate() {
            assert_eq!(link.target, PageId::Month { year: 2025, month: i as u32 + 1 });
        }
        // No other node carries construction-time links.
        assert!(graph.iter().filter(|n| !n.links.is_empty()).count() == 1);
    }

    #[test]
    fn test_appendix_pages() {
        let mut config = PlannerConfig::for_year(2025);
        config.custom_sections.push(AppendixSection {
            title: "Journal".into(),
            page_count: 3,
            template: NoteTemplate::Lined,
        });
        let graph = PageGraph::build(&config);
        let notes: Vec<&PageNode> = graph.iter().filter(|n| n.kind == PageKind::Note).collect();
        assert_eq!(notes.len(), 3);
        for (i, node) in notes.iter().enumerate() {
            assert_eq!(node.id.to_string(), format!("section-0-page-{}", i));
            let meta = node.note.as_ref().unwrap();
            assert_eq!(meta.total_pages, 3);
            assert_eq!(meta.page_index, i);
            assert_eq!(meta.section_title, "Journal");
        }
        assert_eq!(notes[1].title, "Journal - Page 2");
        // Appendix pages come last.
        assert_eq!(graph.nodes().last().unwrap().id, PageId::Note { section: 0, page: 2 });
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut config = PlannerConfig::for_year(2024);
        config.start_month = 9;
        config.duration_months = 8;
        config.week_start = WeekStart::Monday;
        assert_eq!(
            PageGraph::build(&config).page_order(),
            PageGraph::build(&config).page_order()
        );
    }

    #[test]
    fn test_titles() {
        let graph = PageGraph::build(&PlannerConfig::for_year(2025));
        assert_eq!(graph.get(&PageId::Month { year: 2025, month: 1 }).unwrap().title, "January 2025");
        assert_eq!(graph.get(&PageId::Week(ymd(2025, 1, 5))).unwrap().title, "Week of Jan 5");
        assert_eq!(
            graph.get(&PageId::Day(ymd(2025, 1, 1))).unwrap().title,
            "Wednesday, January 1, 2025"
        );
    }
}
