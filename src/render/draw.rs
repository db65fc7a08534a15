//! Draw-sink contract between the renderer and whatever puts pixels out.
use crate::render::textures::TextureId;

/// 8-bit RGBA, laid out like the host's pixel format.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn grey(v: u8) -> Self {
        Self::new(v, v, v, 255)
    }

    /// `t` = 0 keeps `self`, 255 gives `other`.
    #[inline]
    pub fn mix(self, other: Rgba, t: u8) -> Rgba {
        let ta = t as u16;
        let na = 255u16 - ta;
        let m = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Rgba::new(m(self.r, other.r), m(self.g, other.g), m(self.b, other.b), m(self.a, other.a))
    }
}

/// Integer source rectangle in texels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Destination rectangle in screen pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

pub trait DrawSink {
    /// Copies `src` of `texture` scaled into `dst`.
    fn blit(&mut self, texture: TextureId, src: Rect, dst: RectF);
    fn fill_rect(&mut self, dst: RectF, color: Rgba);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Blit {
        texture: TextureId,
        src: Rect,
        dst: RectF,
    },
    Fill {
        dst: RectF,
        color: Rgba,
    },
}

/// Records draw operations in submission order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blits_of(&self, texture: TextureId) -> impl Iterator<Item = (&Rect, &RectF)> + '_ {
        self.ops.iter().filter_map(move |op| match op {
            DrawOp::Blit { texture: t, src, dst } if *t == texture => Some((src, dst)),
            _ => None,
        })
    }
}

impl DrawSink for DrawList {
    fn blit(&mut self, texture: TextureId, src: Rect, dst: RectF) {
        self.ops.push(DrawOp::Blit { texture, src, dst });
    }

    fn fill_rect(&mut self, dst: RectF, color: Rgba) {
        self.ops.push(DrawOp::Fill { dst, color });
    }
}
