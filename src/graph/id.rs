//! Typed page identifiers.
//!
//! Every page has exactly one identifier and every identifier has exactly one
//! string form. [`PageId`]'s `Display` and `FromStr` impls are the only place
//! that string form is produced or parsed:
//!
//! | Page          | Identifier                       |
//! |---------------|----------------------------------|
//! | cover         | `cover`                          |
//! | index         | `index`                          |
//! | year overview | `year-overview`                  |
//! | month         | `month-YYYY-MM`                  |
//! | week          | `week-YYYY-MM-DD` (first day)    |
//! | day           | `YYYY-MM-DD`                     |
//! | appendix page | `section-<i>-page-<j>`           |

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageId {
    Cover,
    Index,
    YearOverview,
    Month { year: i32, month: u32 },
    /// Anchored at the week's first day under the configured week start.
    Week(NaiveDate),
    Day(NaiveDate),
    /// Zero-based section and page-within-section indices.
    Note { section: usize, page: usize },
}

impl PageId {
    pub fn month_of(date: NaiveDate) -> Self {
        PageId::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first page of an appendix section.
    pub fn section_start(section: usize) -> Self {
        PageId::Note { section, page: 0 }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Cover => write!(f, "cover"),
            PageId::Index => write!(f, "index"),
            PageId::YearOverview => write!(f, "year-overview"),
            PageId::Month { year, month } => write!(f, "month-{:04}-{:02}", year, month),
            PageId::Week(start) => write!(f, "week-{}", start.format("%Y-%m-%d")),
            PageId::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PageId::Note { section, page } => write!(f, "section-{}-page-{}", section, page),
        }
    }
}

/// The string wasn't produced by `PageId`'s `Display`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a page identifier")]
pub struct ParsePageIdError(pub String);

impl FromStr for PageId {
    type Err = ParsePageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePageIdError(s.to_string());
        match s {
            "cover" => return Ok(PageId::Cover),
            "index" => return Ok(PageId::Index),
            "year-overview" => return Ok(PageId::YearOverview),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("month-") {
            let (year, month) = rest.split_once('-').ok_or_else(err)?;
            if month.len() != 2 {
                return Err(err());
            }
            let year: i32 = year.parse().map_err(|_| err())?;
            let month: u32 = month.parse().map_err(|_| err())?;
            if !(1..=12).contains(&month) {
                return Err(err());
            }
            return Ok(PageId::Month { year, month });
        }

        if let Some(rest) = s.strip_prefix("week-") {
            return parse_date(rest).map(PageId::Week).ok_or_else(err);
        }

        if let Some(rest) = s.strip_prefix("section-") {
            let (section, page) = rest.split_once("-page-").ok_or_else(err)?;
            let section = section.parse().map_err(|_| err())?;
            let page = page.parse().map_err(|_| err())?;
            return Ok(PageId::Note { section, page });
        }

        parse_date(s).map(PageId::Day).ok_or_else(err)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl Serialize for PageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
