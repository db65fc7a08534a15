//! CPU framebuffer and the software `DrawSink` that rasterizes into it.
use crate::render::draw::{DrawSink, Rect, RectF, Rgba};
use crate::render::textures::{TextureId, TextureManager};

/// Texels with alpha below this are treated as transparent.
const ALPHA_CUTOFF: u8 = 8;

pub struct Framebuffer {
    pub color_buffer: Vec<Rgba>,
    pub width: u32,
    pub height: u32,
    pub background_color: Rgba,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Rgba::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline]
    pub fn set_background_color(&mut self, c: Rgba) {
        self.background_color = c;
    }

    /// Pixels as tightly packed RGBA8 bytes, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Rgba>();
        // SAFETY: Rgba is repr(C) over four u8 fields, so it has size 4,
        // alignment 1 and no padding.
        unsafe { std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len) }
    }

    /// Pixel span `[start, end)` covered by a float interval, clipped to `limit`.
    #[inline]
    fn span(start: f32, len: f32, limit: u32) -> (u32, u32) {
        let a = start.round().max(0.0) as u32;
        let b = (start + len).round().max(0.0) as u32;
        (a.min(limit), b.min(limit))
    }
}

/// Rasterizes draw operations into a framebuffer, sampling textures from a
/// `TextureManager`.
pub struct Canvas<'a> {
    pub fb: &'a mut Framebuffer,
    pub textures: &'a TextureManager,
}

impl<'a> Canvas<'a> {
    pub fn new(fb: &'a mut Framebuffer, textures: &'a TextureManager) -> Self {
        Self { fb, textures }
    }
}

impl DrawSink for Canvas<'_> {
    fn blit(&mut self, texture: TextureId, src: Rect, dst: RectF) {
        let Some(pm) = self.textures.pixmap(texture) else {
            return;
        };
        if dst.w <= 0.0 || dst.h <= 0.0 || src.w == 0 || src.h == 0 {
            return;
        }
        let (x0, x1) = Framebuffer::span(dst.x, dst.w, self.fb.width);
        let (y0, y1) = Framebuffer::span(dst.y, dst.h, self.fb.height);

        for x in x0..x1 {
            let u = ((x as f32 + 0.5 - dst.x) / dst.w * src.w as f32).clamp(0.0, src.w as f32 - 1.0);
            let tx = src.x + u as u32;
            for y in y0..y1 {
                let v = ((y as f32 + 0.5 - dst.y) / dst.h * src.h as f32).clamp(0.0, src.h as f32 - 1.0);
                let ty = src.y + v as u32;
                let color = pm.sample(tx, ty);
                if color.a < ALPHA_CUTOFF {
                    continue;
                }
                self.fb.set_pixel_color(x, y, color);
            }
        }
    }

    fn fill_rect(&mut self, dst: RectF, color: Rgba) {
        if color.a < ALPHA_CUTOFF {
            return;
        }
        let (x0, x1) = Framebuffer::span(dst.x, dst.w, self.fb.width);
        let (y0, y1) = Framebuffer::span(dst.y, dst.h, self.fb.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let c = if color.a == 255 {
                    color
                } else {
                    let under = self.fb.get_pixel(x, y);
                    let mut c = under.mix(color, color.a);
                    c.a = 255;
                    c
                };
                self.fb.set_pixel_color(x, y, c);
            }
        }
    }
}
