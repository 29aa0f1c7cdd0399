use crate::error::MemoryError;
use crate::memory::MemorySliceMut;
use crate::state::Viewport;

const BYTES_PER_PIXEL: usize = 4;

/// Quantizes a unit-range color to RGBA8, rounding to nearest.
pub fn encode_rgba8(rgba: [f32; 4]) -> [u8; 4] {
    fn f(v: f32) -> u8 {
        let v = v.clamp(0.0, 1.0);
        (v * 255.0 + 0.5).floor() as u8
    }
    [f(rgba[0]), f(rgba[1]), f(rgba[2]), f(rgba[3])]
}

pub fn decode_rgba8(rgba: [u8; 4]) -> [f32; 4] {
    rgba.map(|v| f32::from(v) / 255.0)
}

/// An RGBA8 color target with a parallel `f32` depth buffer, both row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    far: f32,
    color: Vec<u8>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// A black, transparent target with every depth at the far value 1.0.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_far(width, height, 1.0)
    }

    /// A target sized to cover `viewport`, with depth cleared to its `max_depth`.
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let width = (viewport.x + viewport.width).ceil().max(0.0) as u32;
        let height = (viewport.y + viewport.height).ceil().max(0.0) as u32;
        Self::with_far(width, height, viewport.max_depth)
    }

    fn with_far(width: u32, height: u32, far: f32) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            far,
            color: vec![0; pixels * BYTES_PER_PIXEL],
            depth: vec![far; pixels],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The value depth was initialized to.
    pub fn far(&self) -> f32 {
        self.far
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn clear_color(&mut self, rgba: [f32; 4]) {
        let encoded = encode_rgba8(rgba);
        for px in self.color.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&encoded);
        }
    }

    pub fn clear_depth(&mut self, depth: f32) {
        self.depth.fill(depth);
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let off = self.index(x, y)? * BYTES_PER_PIXEL;
        let px = &self.color[off..off + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// The stored color as unit-range floats.
    pub fn read_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.color_at(x, y).map(decode_rgba8)
    }

    /// Quantizes and stores `rgba`. Writes outside the target are dropped.
    pub fn write_pixel(&mut self, x: u32, y: u32, rgba: [f32; 4]) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let off = i * BYTES_PER_PIXEL;
        self.color[off..off + BYTES_PER_PIXEL].copy_from_slice(&encode_rgba8(rgba));
    }

    pub fn write_depth(&mut self, x: u32, y: u32, depth: f32) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = depth;
        }
    }

    /// Tightly packed RGBA8 rows.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.color
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Copies the color target into `dst` as tightly packed RGBA8 rows.
    pub fn copy_color_to(&self, dst: &mut MemorySliceMut<'_>) -> Result<(), MemoryError> {
        dst.write_bytes(0, &self.color)
    }
}
