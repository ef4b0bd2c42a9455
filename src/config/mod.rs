//! # Planner Config
//!
//! The input for one generation run. The shape mirrors what the configuration
//! UI produces, so a config exported from the UI deserializes directly:
//!
//! ```json
//! {
//!   "year": 2025, "startMonth": 1, "durationMonths": 12,
//!   "weekStart": "sunday", "device": "tab-s", "orientation": "portrait",
//!   "handedness": "right",
//!   "theme": { "accentColor": "#3b82f6", "font": "Helvetica", "lineHeight": 1.2 },
//!   "customSections": [{ "title": "Journal", "pageCount": 3, "template": "lined" }]
//! }
//! ```
//!
//! A config is immutable once a run starts. [`PlannerConfig::validate`] is the
//! configuration boundary: everything downstream assumes it passed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2999;
pub const MAX_DURATION_MONTHS: u32 = 36;
pub const MAX_SECTION_PAGES: u32 = 500;
pub const MIN_LINE_HEIGHT: f64 = 1.0;
pub const MAX_LINE_HEIGHT: f64 = 2.0;

/// A complete planner description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    pub year: i32,

    /// First month of the span, 1-12.
    #[serde(default = "default_start_month")]
    pub start_month: u32,

    #[serde(default = "default_duration")]
    pub duration_months: u32,

    #[serde(default)]
    pub week_start: WeekStart,

    #[serde(default)]
    pub device: Device,

    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default)]
    pub handedness: Handedness,

    #[serde(default)]
    pub theme: Theme,

    /// Appendix sections, appended after the calendar pages in this order.
    #[serde(default)]
    pub custom_sections: Vec<AppendixSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverConfig>,
}

fn default_start_month() -> u32 {
    1
}

fn default_duration() -> u32 {
    12
}

/// Which weekday opens a calendar week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> chrono::Weekday {
        match self {
            WeekStart::Sunday => chrono::Weekday::Sun,
            WeekStart::Monday => chrono::Weekday::Mon,
        }
    }
}

/// Target device profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    /// Samsung Galaxy Tab S, 16:10.
    #[default]
    #[serde(rename = "tab-s")]
    TabS,
    #[serde(rename = "fold")]
    Fold,
    /// A4-ish paper.
    #[serde(rename = "standard")]
    Standard,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::TabS => write!(f, "tab-s"),
            Device::Fold => write!(f, "fold"),
            Device::Standard => write!(f, "standard"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// The hand holding the stylus. Tabs go on the other side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default = "default_accent")]
    pub accent_color: String,

    /// Standard font family: Helvetica, Times or Courier.
    #[serde(default = "default_font")]
    pub font: String,

    /// Note line-height multiplier over a 20pt base.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

fn default_accent() -> String {
    "#3b82f6".to_string()
}

fn default_font() -> String {
    "Helvetica".to_string()
}

fn default_line_height() -> f64 {
    1.2
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent_color: default_accent(),
            font: default_font(),
            line_height: default_line_height(),
        }
    }
}

/// A user-defined block of note pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendixSection {
    pub title: String,
    pub page_count: u32,
    #[serde(default)]
    pub template: NoteTemplate,
}

/// Fill pattern for note pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteTemplate {
    #[default]
    Lined,
    Dotted,
    Blank,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Data URI, raw base64, or a file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PlannerConfig {
    /// A config for `year` with every other field at its UI default.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            start_month: default_start_month(),
            duration_months: default_duration(),
            week_start: WeekStart::default(),
            device: Device::default(),
            orientation: Orientation::default(),
            handedness: Handedness::default(),
            theme: Theme::default(),
            custom_sections: Vec::new(),
            cover: None,
        }
    }

    /// Parse a config from JSON without validating it.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject anything the engine can't faithfully lay out.
    pub fn validate(&self) -> Result<(), FolioError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(FolioError::config(
                "year",
                format!("{} is outside {}..={}", self.year, MIN_YEAR, MAX_YEAR),
            ));
        }
        if !(1..=12).contains(&self.start_month) {
            return Err(FolioError::config(
                "startMonth",
                format!("{} is not a month (1-12)", self.start_month),
            ));
        }
        if !(1..=MAX_DURATION_MONTHS).contains(&self.duration_months) {
            return Err(FolioError::config(
                "durationMonths",
                format!(
                    "{} is outside 1..={}",
                    self.duration_months, MAX_DURATION_MONTHS
                ),
            ));
        }
        if !(MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT).contains(&self.theme.line_height) {
            return Err(FolioError::config(
                "theme.lineHeight",
                format!(
                    "{} is outside {:.1}..={:.1}",
                    self.theme.line_height, MIN_LINE_HEIGHT, MAX_LINE_HEIGHT
                ),
            ));
        }
        if crate::style::Color::parse_hex(&self.theme.accent_color).is_none() {
            return Err(FolioError::config(
                "theme.accentColor",
                format!("`{}` is not a #rgb or #rrggbb color", self.theme.accent_color),
            ));
        }
        for section in &self.custom_sections {
            if !(1..=MAX_SECTION_PAGES).contains(&section.page_count) {
                return Err(FolioError::config(
                    "customSections.pageCount",
                    format!(
                        "section `{}` has {} pages, expected 1..={}",
                        section.title, section.page_count, MAX_SECTION_PAGES
                    ),
                ));
            }
        }
        if !self.layout_enabled() {
            return Err(FolioError::UnsupportedLayout {
                device: self.device.to_string(),
                orientation: self.orientation.to_string(),
            });
        }
        Ok(())
    }

    /// Only the Tab S in portrait is enabled for production output.
    pub fn layout_enabled(&self) -> bool {
        matches!(
            (self.device, self.orientation),
            (Device::TabS, Orientation::Portrait)
        )
    }

    /// Title used on the cover and in the document info dictionary.
    pub fn document_title(&self) -> String {
        self.cover
            .as_ref()
            .and_then(|c| c.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{} Planner", self.year))
    }

    /// Default output file name, `planner-<year>-<device>-<orientation>.pdf`.
    pub fn default_file_name(&self) -> String {
        format!(
            "planner-{}-{}-{}.pdf",
            self.year, self.device, self.orientation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_ui_defaults() {
        let config = PlannerConfig::from_json(r#"{ "year": 2025 }"#).unwrap();
        assert_eq!(config, PlannerConfig::for_year(2025));
        assert_eq!(config.theme.accent_color, "#3b82f6");
        assert!((config.theme.line_height - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_json_round_names() {
        let json = r##"{
            "year": 2026, "startMonth": 7, "durationMonths": 6,
            "weekStart": "monday", "device": "tab-s", "orientation": "portrait",
            "handedness": "left",
            "theme": { "accentColor": "#fff", "font": "Times", "lineHeight": 1.5 },
            "customSections": [{ "title": "Journal", "pageCount": 3, "template": "dotted" }],
            "cover": { "title": "My Year" }
        }"##;
        let config = PlannerConfig::from_json(json).unwrap();
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.handedness, Handedness::Left);
        assert_eq!(config.theme.accent_color, "#fff");
        assert_eq!(config.custom_sections[0].template, NoteTemplate::Dotted);
        assert_eq!(config.document_title(), "My Year");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_device_fails_to_parse() {
        let err = PlannerConfig::from_json(r#"{ "year": 2025, "device": "kindle" }"#).unwrap_err();
        assert!(matches!(err, FolioError::ParseError { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_span() {
        let mut config = PlannerConfig::for_year(2025);
        config.start_month = 13;
        assert!(matches!(
            config.validate(),
            Err(FolioError::ConfigError { field: "startMonth", .. })
        ));

        let mut config = PlannerConfig::for_year(2025);
        config.duration_months = 0;
        assert!(config.validate().is_err());

        let config = PlannerConfig::for_year(1200);
        assert!(matches!(
            config.validate(),
            Err(FolioError::ConfigError { field: "year", .. })
        ));
    }

    #[test]
    fn test_rejects_disabled_layouts() {
        let mut config = PlannerConfig::for_year(2025);
        config.orientation = Orientation::Landscape;
        assert!(matches!(
            config.validate(),
            Err(FolioError::UnsupportedLayout { .. })
        ));

        let mut config = PlannerConfig::for_year(2025);
        config.device = Device::Fold;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("`fold`"));
    }

    #[test]
    fn test_rejects_bad_theme_and_sections() {
        let mut config = PlannerConfig::for_year(2025);
        config.theme.line_height = 3.0;
        assert!(config.validate().is_err());

        let mut config = PlannerConfig::for_year(2025);
        config.theme.accent_color = "blue".into();
        assert!(config.validate().is_err());

        let mut config = PlannerConfig::for_year(2025);
        config.custom_sections.push(AppendixSection {
            title: "Empty".into(),
            page_count: 0,
            template: NoteTemplate::Blank,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            PlannerConfig::for_year(2025).default_file_name(),
            "planner-2025-tab-s-portrait.pdf"
        );
    }
}
