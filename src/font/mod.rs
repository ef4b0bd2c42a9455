//! # Font Management
//!
//! The planner only uses the standard PDF fonts, which need no embedding.
//! What the engine does need is their advance widths: the navigation overlay
//! packs appendix labels by rendered width, and the cover centers its title.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The standard PDF fonts the planner can draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    TimesRoman,
    Courier,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::TimesRoman => "Times-Roman",
            Self::Courier => "Courier",
        }
    }

    pub const ALL: [StandardFont; 3] = [
        StandardFont::Helvetica,
        StandardFont::TimesRoman,
        StandardFont::Courier,
    ];
}

/// Text measurement for the theme's font family.
#[derive(Debug, Clone, Copy)]
pub struct FontContext {
    regular: StandardFont,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            regular: StandardFont::Helvetica,
        }
    }

    /// Resolve a theme font family name, falling back to Helvetica.
    pub fn for_family(family: &str) -> Self {
        let regular = match family.trim().to_ascii_lowercase().as_str() {
            "times" | "times-roman" | "times new roman" => StandardFont::TimesRoman,
            "courier" | "courier new" => StandardFont::Courier,
            _ => StandardFont::Helvetica,
        };
        Self { regular }
    }

    /// The body font.
    pub fn regular(&self) -> StandardFont {
        self.regular
    }

    /// Width of `text` in points.
    pub fn measure(&self, font: StandardFont, text: &str, font_size: f64) -> f64 {
        font.metrics().measure_string(text, font_size, 0.0)
    }

    /// Width of `text` in the body font.
    pub fn measure_regular(&self, text: &str, font_size: f64) -> f64 {
        self.measure(self.regular, text, font_size)
    }
}
