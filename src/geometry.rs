//! # Geometry Resolver
//!
//! Page size, margins and tab reservations as a pure function of
//! (device, orientation, handedness). Every renderer calls this and gets the
//! same answer, so nothing is cached.
//!
//! ```text
//!  ┌──────┬──────────────────────────────────────┐
//!  │      │ safe margin (50)                     │
//!  │ tabs │ icon strip  (30)        [⌂][▦][<][>] │
//!  │ (40) ├──────────────────────────────────────┤
//!  │ Jan  │ content                              │
//!  │ Feb  │                                      │
//!  │ ...  │                                      │
//!  │      ├──────────────────────────────────────┤
//!  │      │ safe margin (50)                     │
//!  └──────┴──────────────────────────────────────┘
//!   40 + 20                                    20   (right-handed)
//! ```
//!
//! The tab strip sits on the side away from the stylus hand. All numbers are
//! rounded half-away-from-zero to hundredths.

use crate::config::{Device, Handedness, Orientation, PlannerConfig};
use crate::draw::Rect;

/// Vertical margin reserved for the device toolbar.
pub const SAFE_MARGIN_Y: f64 = 50.0;
/// Horizontal margin reserved on both sides.
pub const SAFE_MARGIN_X: f64 = 20.0;
/// Width of the month tab strip.
pub const SIDE_TAB_WIDTH: f64 = 40.0;
/// Height of the contextual icon strip.
pub const TOP_TAB_HEIGHT: f64 = 30.0;

/// Resolved dimensions in points. Origin is the bottom-left page corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryProfile {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub content_width: f64,
    pub content_height: f64,
    /// Side tab width (month index).
    pub tab_width: f64,
    /// Top strip height (contextual icons).
    pub tab_height: f64,
    pub handedness: Handedness,
}

impl GeometryProfile {
    pub fn resolve(device: Device, orientation: Orientation, handedness: Handedness) -> Self {
        let (width, height) = base_size(device, orientation);

        let margin_left = match handedness {
            Handedness::Right => SIDE_TAB_WIDTH + SAFE_MARGIN_X,
            Handedness::Left => SAFE_MARGIN_X,
        };
        let margin_right = match handedness {
            Handedness::Left => SIDE_TAB_WIDTH + SAFE_MARGIN_X,
            Handedness::Right => SAFE_MARGIN_X,
        };
        let margin_top = TOP_TAB_HEIGHT + SAFE_MARGIN_Y;
        let margin_bottom = SAFE_MARGIN_Y;

        Self {
            width: round2(width),
            height: round2(height),
            margin_top: round2(margin_top),
            margin_bottom: round2(margin_bottom),
            margin_left: round2(margin_left),
            margin_right: round2(margin_right),
            content_width: round2(width - margin_left - margin_right),
            content_height: round2(height - margin_top - margin_bottom),
            tab_width: round2(SIDE_TAB_WIDTH),
            tab_height: round2(TOP_TAB_HEIGHT),
            handedness,
        }
    }

    pub fn for_config(config: &PlannerConfig) -> Self {
        Self::resolve(config.device, config.orientation, config.handedness)
    }

    /// The content area.
    pub fn content(&self) -> Rect {
        Rect::new(
            self.margin_left,
            self.margin_bottom,
            self.content_width,
            self.content_height,
        )
    }

    /// Top edge of the content area.
    pub fn content_top(&self) -> f64 {
        self.margin_bottom + self.content_height
    }

    /// Left edge of the month tab strip.
    pub fn tab_x(&self) -> f64 {
        match self.handedness {
            Handedness::Right => 0.0,
            Handedness::Left => self.width - self.tab_width,
        }
    }
}

/// Base page size per device and orientation.
fn base_size(device: Device, orientation: Orientation) -> (f64, f64) {
    let (short, long) = match device {
        Device::TabS => (600.0, 960.0),
        Device::Fold => (600.0, 750.0),
        Device::Standard => (595.0, 842.0),
    };
    match orientation {
        Orientation::Portrait => (short, long),
        Orientation::Landscape => (long, short),
    }
}

/// Round half away from zero at the hundredths place.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICES: [Device; 3] = [Device::TabS, Device::Fold, Device::Standard];
    const ORIENTATIONS: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];
    const HANDS: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    #[test]
    fn test_tab_s_portrait_right_handed() {
        let g = GeometryProfile::resolve(Device::TabS, Orientation::Portrait, Handedness::Right);
        assert_eq!((g.width, g.height), (600.0, 960.0));
        assert_eq!(g.margin_left, 60.0);
        assert_eq!(g.margin_right, SAFE_MARGIN_X);
        assert_eq!(g.margin_top, 80.0);
        assert_eq!(g.margin_bottom, 50.0);
        assert_eq!(g.content_width, 520.0);
        assert_eq!(g.content_height, 830.0);
        assert_eq!(g.tab_x(), 0.0);
        assert_eq!(g.content().x, 60.0);
    }

    #[test]
    fn test_handedness_mirrors_margins() {
        for device in DEVICES {
            for orientation in ORIENTATIONS {
                let left = GeometryProfile::resolve(device, orientation, Handedness::Left);
                let right = GeometryProfile::resolve(device, orientation, Handedness::Right);
                assert_eq!(left.margin_left, right.margin_right);
                assert_eq!(left.margin_right, right.margin_left);
                assert_eq!(left.content_width, right.content_width);
                assert_eq!(right.tab_x(), 0.0);
                assert_eq!(left.tab_x(), left.width - SIDE_TAB_WIDTH);
                assert_eq!(right.margin_right, SAFE_MARGIN_X);
                assert_eq!(left.margin_left, SAFE_MARGIN_X);
            }
        }
    }

    #[test]
    fn test_margins_and_content_fill_the_page() {
        for device in DEVICES {
            for orientation in ORIENTATIONS {
                for hand in HANDS {
                    let g = GeometryProfile::resolve(device, orientation, hand);
                    assert!((g.margin_left + g.content_width + g.margin_right - g.width).abs() <= 0.01);
                    assert!((g.margin_top + g.content_height + g.margin_bottom - g.height).abs() <= 0.01);
                }
            }
        }
    }

    #[test]
    fn test_landscape_swaps_base_size() {
        let g = GeometryProfile::resolve(Device::Fold, Orientation::Landscape, Handedness::Right);
        assert_eq!((g.width, g.height), (750.0, 600.0));
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.675_000_1), 2.68);
        assert_eq!(round2(-1.255_000_1), -1.26);
        assert_eq!(round2(595.28), 595.28);
    }
}
