//! Cover page: optional dimmed background image, centered title and subtitle.

use crate::draw::{DrawCommand, PageCanvas, Rect, Stroke};
use crate::style::Color;

use super::RenderContext;

pub const TITLE_SIZE: f64 = 48.0;
pub const SUBTITLE_SIZE: f64 = 24.0;
pub const IMAGE_OPACITY: f64 = 0.3;

pub fn render(ctx: &RenderContext<'_>, canvas: &mut PageCanvas<'_>) {
    let (width, height) = (ctx.geometry.width, ctx.geometry.height);

    if let Some(image) = ctx.cover_image {
        if let Some(rect) = cover_fit(image.width_px, image.height_px, width, height) {
            canvas.push(DrawCommand::Image {
                image: image.handle,
                rect,
                opacity: IMAGE_OPACITY,
            });
        }
    }

    let font = ctx.font();
    let title = ctx.config.document_title();
    let title_width = ctx.fonts.measure(font, &title, TITLE_SIZE);
    let title_y = height * 0.6;
    canvas.text((width - title_width) / 2.0, title_y, title, font, TITLE_SIZE, Color::BLACK);

    // Accent rule under the title.
    let rule_width = title_width.min(width - 80.0).max(0.0);
    let rule_x = (width - rule_width) / 2.0;
    canvas.line(
        (rule_x, title_y - 14.0),
        (rule_x + rule_width, title_y - 14.0),
        Stroke::solid(ctx.accent, 2.0),
    );

    let subtitle = ctx
        .config
        .cover
        .as_ref()
        .and_then(|c| c.subtitle.as_deref())
        .filter(|s| !s.trim().is_empty());
    if let Some(subtitle) = subtitle {
        let w = ctx.fonts.measure(font, subtitle, SUBTITLE_SIZE);
        canvas.text((width - w) / 2.0, title_y - 40.0, subtitle, font, SUBTITLE_SIZE, Color::MUTED);
    }
}

/// Scale an image to cover the whole page, centered, cropping the overflow.
pub fn cover_fit(width_px: u32, height_px: u32, page_width: f64, page_height: f64) -> Option<Rect> {
    if width_px == 0 || height_px == 0 {
        return None;
    }
    let (w, h) = (width_px as f64, height_px as f64);
    let scale = (page_width / w).max(page_height / h);
    let (sw, sh) = (w * scale, h * scale);
    Some(Rect::new((page_width - sw) / 2.0, (page_height - sh) / 2.0, sw, sh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoverConfig, PlannerConfig};
    use crate::graph::{PageGraph, PageId};
    use crate::testing::GraphResolver;
    use crate::writer::{EmbeddedImage, ImageHandle};

    fn texts(config: &PlannerConfig, image: Option<EmbeddedImage>) -> Vec<DrawCommand> {
        let graph = PageGraph::build(config);
        let resolver = GraphResolver(&graph);
        let ctx = RenderContext::new(config).with_cover_image(image);
        let mut canvas = PageCanvas::new(PageId::Cover, &resolver);
        render(&ctx, &mut canvas);
        canvas.finish().0
    }

    #[test]
    fn test_cover_fit_wide_image() {
        // 2:1 image on a 600x960 page: height drives the scale.
        let r = cover_fit(200, 100, 600.0, 960.0).unwrap();
        assert_eq!(r.height, 960.0);
        assert_eq!(r.width, 1920.0);
        assert_eq!(r.x, -660.0);
        assert_eq!(r.y, 0.0);
        assert!(cover_fit(0, 10, 600.0, 960.0).is_none());
    }

    #[test]
    fn test_default_title_centered() {
        let config = PlannerConfig::for_year(2025);
        let commands = texts(&config, None);
        let title = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { text, x, y, size, .. } if *size == TITLE_SIZE => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .unwrap();
        assert_eq!(title.0, "2025 Planner");
        assert!((title.2 - 576.0).abs() < 1e-9);
        assert!(title.1 > 0.0);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Image { .. })));
    }

    #[test]
    fn test_subtitle_and_image() {
        let mut config = PlannerConfig::for_year(2025);
        config.cover = Some(CoverConfig {
            title: Some("Field Notes".into()),
            subtitle: Some("Volume II".into()),
            image: None,
        });
        let image = EmbeddedImage {
            handle: ImageHandle(0),
            width_px: 600,
            height_px: 960,
        };
        let commands = texts(&config, Some(image));
        assert!(matches!(
            commands[0],
            DrawCommand::Image { opacity, .. } if opacity == IMAGE_OPACITY
        ));
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, size, .. } if text == "Volume II" && *size == SUBTITLE_SIZE)));
    }
}
