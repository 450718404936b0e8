//! CPU implementation of the render backend over RGBA buffers.

use std::collections::HashMap;

use chime_graphics::{Color, Rect};
use log::warn;

use crate::backend::{RenderBackend, RenderError, TextureId};
use crate::text::FontRasterizer;

/// One RGBA8 pixel buffer.
struct Surface {
    w: i32,
    h: i32,
    data: Vec<u8>,
}

impl Surface {
    fn new(w: i32, h: i32) -> Self {
        Self {
            w,
            h,
            data: vec![0u8; (w.max(0) * h.max(0) * 4) as usize],
        }
    }

    fn pixel_index(&self, x: i32, y: i32) -> usize {
        ((y * self.w + x) * 4) as usize
    }

    /// Source-over blend of one pixel.
    fn blend(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.w || y >= self.h {
            return;
        }
        let idx = self.pixel_index(x, y);
        if color.a == 255 {
            self.data[idx] = color.r;
            self.data[idx + 1] = color.g;
            self.data[idx + 2] = color.b;
            self.data[idx + 3] = 255;
            return;
        }
        if color.a == 0 {
            return;
        }
        let sa = color.a as u32;
        let inv = 255 - sa;
        for (offset, channel) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = self.data[idx + offset] as u32;
            self.data[idx + offset] = ((channel as u32 * sa + dst * inv) / 255) as u8;
        }
        let da = self.data[idx + 3] as u32;
        self.data[idx + 3] = (sa + da * inv / 255).min(255) as u8;
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersect(&Rect::new(0, 0, self.w, self.h)) else {
            return;
        };
        for y in clipped.y..clipped.y + clipped.h {
            for x in clipped.x..clipped.x + clipped.w {
                self.blend(x, y, color);
            }
        }
    }

    fn clear(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }
}

/// A renderer that draws on plain memory.
///
/// The root surface stands in for the window; the application blits
/// [`root_rgba`](Self::root_rgba) into its presentation frame, and tests
/// inspect it directly.
pub struct SoftwareBackend {
    root: Surface,
    textures: HashMap<u32, Surface>,
    next_texture: u32,
    target: Option<TextureId>,
    draw_color: Color,
    font: Option<FontRasterizer>,
}

impl SoftwareBackend {
    pub fn new(root_w: i32, root_h: i32) -> Self {
        Self {
            root: Surface::new(root_w.max(1), root_h.max(1)),
            textures: HashMap::new(),
            next_texture: 0,
            target: None,
            draw_color: Color::BLACK,
            font: None,
        }
    }

    /// Loads the UI font. Without one, text rendering reports
    /// [`RenderError::FontUnavailable`] and text nodes stay blank.
    pub fn load_font(&mut self, path: &str) -> Result<(), RenderError> {
        let data = std::fs::read(path).map_err(|err| RenderError::FontLoad {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        self.font = Some(
            FontRasterizer::from_bytes(data).ok_or_else(|| RenderError::FontLoad {
                path: path.to_string(),
                reason: "unparseable font data".to_string(),
            })?,
        );
        Ok(())
    }

    /// Replaces the root surface when the window size changes.
    pub fn resize_root(&mut self, w: i32, h: i32) {
        self.root = Surface::new(w.max(1), h.max(1));
    }

    pub fn root_size(&self) -> (i32, i32) {
        (self.root.w, self.root.h)
    }

    /// The root surface pixels, row-major RGBA8.
    pub fn root_rgba(&self) -> &[u8] {
        &self.root.data
    }

    /// Reads one pixel of the root surface; handy in tests.
    pub fn root_pixel(&self, x: i32, y: i32) -> Color {
        let idx = self.root.pixel_index(x, y);
        Color::rgba(
            self.root.data[idx],
            self.root.data[idx + 1],
            self.root.data[idx + 2],
            self.root.data[idx + 3],
        )
    }

    fn insert_surface(&mut self, surface: Surface) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id.0, surface);
        id
    }

    fn target_surface(&mut self) -> &mut Surface {
        match self.target {
            Some(id) => self
                .textures
                .get_mut(&id.0)
                .unwrap_or(&mut self.root),
            None => &mut self.root,
        }
    }
}

impl RenderBackend for SoftwareBackend {
    fn create_texture(&mut self, w: i32, h: i32) -> Result<TextureId, RenderError> {
        if w <= 0 || h <= 0 {
            return Err(RenderError::InvalidTextureSize { w, h });
        }
        Ok(self.insert_surface(Surface::new(w, h)))
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id.0).is_none() {
            warn!("destroying unknown texture {id:?}");
        }
        if self.target == Some(id) {
            self.target = None;
        }
    }

    fn load_texture_file(&mut self, path: &str) -> Result<TextureId, RenderError> {
        let decoded = image::open(path)
            .map_err(|source| RenderError::ImageLoad {
                path: path.to_string(),
                source,
            })?
            .to_rgba8();
        let (w, h) = (decoded.width() as i32, decoded.height() as i32);
        let surface = Surface {
            w,
            h,
            data: decoded.into_raw(),
        };
        Ok(self.insert_surface(surface))
    }

    fn texture_size(&self, id: TextureId) -> Result<(i32, i32), RenderError> {
        self.textures
            .get(&id.0)
            .map(|s| (s.w, s.h))
            .ok_or(RenderError::UnknownTexture(id))
    }

    fn set_render_target(&mut self, target: Option<TextureId>) -> Option<TextureId> {
        if let Some(id) = target {
            if !self.textures.contains_key(&id.0) {
                warn!("render target {id:?} does not exist, drawing to root");
                return std::mem::replace(&mut self.target, None);
            }
        }
        std::mem::replace(&mut self.target, target)
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        let color = self.draw_color;
        self.target_surface().clear(color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = self.draw_color;
        self.target_surface().fill(rect, color);
    }

    fn copy_texture(&mut self, id: TextureId, dst: Rect) -> Result<(), RenderError> {
        if dst.w <= 0 || dst.h <= 0 {
            return Ok(());
        }
        let src = self
            .textures
            .remove(&id.0)
            .ok_or(RenderError::UnknownTexture(id))?;

        // Nearest-neighbor scale of the source into the destination rect.
        let target = self.target_surface();
        for dy in 0..dst.h {
            let sy = (dy as i64 * src.h as i64 / dst.h as i64) as i32;
            for dx in 0..dst.w {
                let sx = (dx as i64 * src.w as i64 / dst.w as i64) as i32;
                let idx = src.pixel_index(sx, sy);
                let color = Color::rgba(
                    src.data[idx],
                    src.data[idx + 1],
                    src.data[idx + 2],
                    src.data[idx + 3],
                );
                target.blend(dst.x + dx, dst.y + dy, color);
            }
        }

        self.textures.insert(id.0, src);
        Ok(())
    }

    fn measure_text(&self, text: &str) -> Result<(i32, i32), RenderError> {
        let font = self.font.as_ref().ok_or(RenderError::FontUnavailable)?;
        Ok(font.measure(text))
    }

    fn render_text(&mut self, text: &str, color: Color) -> Result<TextureId, RenderError> {
        let font = self.font.as_ref().ok_or(RenderError::FontUnavailable)?;
        let (w, h, data) = font.rasterize(text, color);
        Ok(self.insert_surface(Surface { w, h, data }))
    }
}
