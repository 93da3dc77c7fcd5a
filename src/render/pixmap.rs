//! Raster overlay surface drawn with tiny-skia

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use super::overlay::{DOT_COLOR, MarkerLayout, OverlaySurface};

/// Transparent viewport-sized layer holding the corner markers
pub struct PixmapOverlay {
    pixmap: Pixmap,
    visible: bool,
}

impl PixmapOverlay {
    /// Returns `None` for a zero-sized viewport
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            visible: false,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Alpha of one overlay pixel, 0 outside the layer
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixmap.pixel(x, y).map_or(0, |p| p.alpha())
    }
}

impl OverlaySurface for PixmapOverlay {
    fn show(&mut self, layout: &MarkerLayout) {
        self.pixmap.fill(Color::TRANSPARENT);

        let [r, g, b, a] = DOT_COLOR;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        for marker in &layout.markers {
            let center = marker.center();
            if let Some(path) = PathBuilder::from_circle(center.x, center.y, marker.size / 2.0) {
                self.pixmap
                    .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        self.visible = true;
    }

    fn hide(&mut self) {
        if self.visible {
            self.pixmap.fill(Color::TRANSPARENT);
            self.visible = false;
        }
    }
}
