//! # Calendar Enumerator
//!
//! Pure date arithmetic: which months a span covers, and which days each
//! month's display grid shows. A grid always covers whole weeks, so it bleeds
//! into the neighbouring months at both ends. Those bleed days are ordinary
//! dates; whoever consumes the grid decides what to do with them.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::config::WeekStart;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The display grid of one month: whole weeks from the week containing the
/// 1st to the week containing the last day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// The first day of the month.
    pub anchor: NaiveDate,
    pub weeks: Vec<[NaiveDate; 7]>,
}

impl MonthGrid {
    /// Build the grid for the month containing `anchor`.
    pub fn new(anchor: NaiveDate, week_start: WeekStart) -> Self {
        let first = first_of_month(anchor);
        let last = last_of_month(first);
        let mut cursor = week_start_of(first, week_start);
        let end = week_start_of(last, week_start);

        let mut weeks = Vec::with_capacity(6);
        while cursor <= end {
            weeks.push(week_days(cursor));
            cursor = cursor + Days::new(7);
        }

        Self {
            anchor: first,
            weeks,
        }
    }

    /// Every day of the grid in display order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().copied())
    }

    /// Whether `date` belongs to this month rather than the bleed.
    pub fn in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.anchor.year() && date.month() == self.anchor.month()
    }
}

/// The month anchors of a span, wrapping past December into later years.
pub fn month_anchors(year: i32, start_month: u32, duration_months: u32) -> Vec<NaiveDate> {
    let Some(start) = NaiveDate::from_ymd_opt(year, start_month, 1) else {
        return Vec::new();
    };
    (0..duration_months)
        .filter_map(|offset| start.checked_add_months(Months::new(offset)))
        .collect()
}

/// Grids for every month of the span, in calendar order.
pub fn enumerate(
    year: i32,
    start_month: u32,
    duration_months: u32,
    week_start: WeekStart,
) -> Vec<MonthGrid> {
    month_anchors(year, start_month, duration_months)
        .into_iter()
        .map(|anchor| MonthGrid::new(anchor, week_start))
        .collect()
}

/// The first day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let back = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date - Days::new(back as u64)
}

/// Seven consecutive days starting at `start`.
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [start; 7];
    for (i, day) in days.iter_mut().enumerate() {
        *day = start + Days::new(i as u64);
    }
    days
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Weekday header labels in display order.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    }
}

pub fn weekday_names(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => [
            "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
        ],
        WeekStart::Monday => [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ],
    }
}

pub fn weekday_initials(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => ["S", "M", "T", "W", "T", "F", "S"],
        WeekStart::Monday => ["M", "T", "W", "T", "F", "S", "S"],
    }
}

/// `January 2025`
pub fn month_title(date: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// `Jan 5`
pub fn short_date(date: NaiveDate) -> String {
    format!("{} {}", MONTH_ABBREVIATIONS[date.month0() as usize], date.day())
}

/// `Wednesday, January 1, 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        weekday_names(WeekStart::Monday)[date.weekday().num_days_from_monday() as usize],
        MONTH_NAMES[date.month0() as usize],
        date.day(),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_anchors_wrap_into_next_year() {
        let anchors = month_anchors(2025, 11, 4);
        assert_eq!(
            anchors,
            vec![ymd(2025, 11, 1), ymd(2025, 12, 1), ymd(2026, 1, 1), ymd(2026, 2, 1)]
        );
    }

    #[test]
    fn test_week_start_of() {
        // 2025-01-01 is a Wednesday.
        assert_eq!(week_start_of(ymd(2025, 1, 1), WeekStart::Sunday), ymd(2024, 12, 29));
        assert_eq!(week_start_of(ymd(2025, 1, 1), WeekStart::Monday), ymd(2024, 12, 30));
        assert_eq!(week_start_of(ymd(2025, 1, 5), WeekStart::Sunday), ymd(2025, 1, 5));
    }

    #[test]
    fn test_grid_covers_whole_weeks() {
        let grid = MonthGrid::new(ymd(2025, 1, 1), WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0], ymd(2024, 12, 29));
        assert_eq!(grid.weeks[4][6], ymd(2025, 2, 1));
        assert!(!grid.in_month(ymd(2024, 12, 31)));
        assert!(grid.in_month(ymd(2025, 1, 31)));
    }

    #[test]
    fn test_six_week_month() {
        // March 2025 starts on a Saturday and has 31 days.
        let grid = MonthGrid::new(ymd(2025, 3, 1), WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.days().count(), 42);
    }

    #[test]
    fn test_four_week_february() {
        // February 2026 starts on a Sunday and has 28 days.
        let grid = MonthGrid::new(ymd(2026, 2, 1), WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 4);
        let monday = MonthGrid::new(ymd(2026, 2, 1), WeekStart::Monday);
        assert_eq!(monday.weeks.len(), 5);
    }

    #[test]
    fn test_last_of_month_leap_year() {
        assert_eq!(last_of_month(ymd(2024, 2, 10)), ymd(2024, 2, 29));
        assert_eq!(last_of_month(ymd(2025, 12, 1)), ymd(2025, 12, 31));
    }

    #[test]
    fn test_titles() {
        assert_eq!(month_title(ymd(2025, 1, 1)), "January 2025");
        assert_eq!(short_date(ymd(2025, 1, 5)), "Jan 5");
        assert_eq!(long_date(ymd(2025, 1, 1)), "Wednesday, January 1, 2025");
    }
}
