//! Text rasterization over rusttype.

use chime_graphics::Color;
use rusttype::{point, Font, Scale};

/// Pixel size every string is rasterized at. Glyph bitmaps are scaled by
/// the copy into their destination rectangle, so one resolution suffices.
pub const FONT_RESOLUTION: f32 = 50.0;

/// A loaded TTF font plus the fixed rasterization scale.
pub struct FontRasterizer {
    font: Font<'static>,
    scale: Scale,
}

impl FontRasterizer {
    /// Parses font data owned by the rasterizer.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let font = Font::try_from_vec(data)?;
        Some(Self {
            font,
            scale: Scale::uniform(FONT_RESOLUTION),
        })
    }

    /// Pixel dimensions `text` occupies when rasterized.
    pub fn measure(&self, text: &str) -> (i32, i32) {
        let v_metrics = self.font.v_metrics(self.scale);
        let height = (v_metrics.ascent - v_metrics.descent).ceil() as i32;
        let width = self
            .font
            .layout(text, self.scale, point(0.0, v_metrics.ascent))
            .filter_map(|g| {
                g.pixel_bounding_box()
                    .map(|bb| bb.max.x as f32)
                    .or_else(|| Some(g.position().x + g.unpositioned().h_metrics().advance_width))
            })
            .fold(0.0f32, f32::max)
            .ceil() as i32;
        (width.max(1), height.max(1))
    }

    /// Rasterizes `text` into a tightly sized RGBA buffer. The glyph
    /// coverage drives the alpha channel; `color` fills the other three.
    pub fn rasterize(&self, text: &str, color: Color) -> (i32, i32, Vec<u8>) {
        let (width, height) = self.measure(text);
        let mut data = vec![0u8; (width * height * 4) as usize];
        let v_metrics = self.font.v_metrics(self.scale);

        for glyph in self.font.layout(text, self.scale, point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || py < 0 || px >= width || py >= height {
                        return;
                    }
                    let idx = ((py * width + px) * 4) as usize;
                    data[idx] = color.r;
                    data[idx + 1] = color.g;
                    data[idx + 2] = color.b;
                    data[idx + 3] = (coverage * color.a as f32) as u8;
                });
            }
        }

        (width, height, data)
    }
}
