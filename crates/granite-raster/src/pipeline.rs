use tracing::{debug, trace};

use crate::blend::Blender;
use crate::error::{PipelineError, UnsupportedState};
use crate::framebuffer::Framebuffer;
use crate::ops::CompareOp;
use crate::rasterizer::{rasterize_triangle, ClipRect, Vertex};
use crate::state::{
    ColorComponentFlags, CullMode, FrontFace, GraphicsPipelineDesc, PolygonMode, Rect2D, Viewport,
};

/// What the fragment stage sees for one covered pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: u32,
    pub y: u32,
    /// Depth that passed the depth test.
    pub depth: f32,
    /// Weights of the triangle's three vertices, in index order; use them to interpolate
    /// per-vertex attributes.
    pub barycentric: [f32; 3],
    /// Index of the triangle within the draw.
    pub primitive: u32,
}

/// Counters returned by [`Pipeline::draw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub triangles: u32,
    /// Zero-area triangles or triangles with a vertex that did not project to finite
    /// coordinates (e.g. `w == 0`).
    pub triangles_skipped: u32,
    pub fragments_passed: u64,
    pub fragments_depth_rejected: u64,
}

/// A validated, immutable fixed-function configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    viewport: Viewport,
    scissor: Option<Rect2D>,
    depth_compare: CompareOp,
    blender: Blender,
}

fn validate(desc: &GraphicsPipelineDesc) -> Vec<UnsupportedState> {
    let mut unsupported = Vec::new();

    let blend = &desc.color_blend;
    if blend.logic_op_enable {
        unsupported.push(UnsupportedState::LogicOp);
    }
    if blend.attachments.len() != 1 {
        unsupported.push(UnsupportedState::AttachmentCount(blend.attachments.len()));
    }
    for attachment in &blend.attachments {
        if attachment.color_write_mask != ColorComponentFlags::RGBA {
            unsupported.push(UnsupportedState::ColorWriteMask(attachment.color_write_mask));
        }
    }

    let raster = &desc.rasterization;
    if raster.rasterizer_discard_enable {
        unsupported.push(UnsupportedState::RasterizerDiscard);
    }
    if raster.depth_clamp_enable {
        unsupported.push(UnsupportedState::DepthClamp);
    }
    if raster.depth_bias_enable {
        unsupported.push(UnsupportedState::DepthBias);
    }
    if raster.polygon_mode != PolygonMode::Fill {
        unsupported.push(UnsupportedState::PolygonMode(raster.polygon_mode));
    }
    if raster.cull_mode != CullMode::None {
        unsupported.push(UnsupportedState::CullMode(raster.cull_mode));
    }
    if raster.front_face != FrontFace::CounterClockwise {
        unsupported.push(UnsupportedState::FrontFace(raster.front_face));
    }

    let ms = &desc.multisample;
    if ms.rasterization_samples != 1 {
        unsupported.push(UnsupportedState::SampleCount(ms.rasterization_samples));
    }
    if ms.sample_shading_enable {
        unsupported.push(UnsupportedState::SampleShading);
    }
    if ms.alpha_to_coverage_enable {
        unsupported.push(UnsupportedState::AlphaToCoverage);
    }
    if ms.alpha_to_one_enable {
        unsupported.push(UnsupportedState::AlphaToOne);
    }

    let ds = &desc.depth_stencil;
    if !ds.depth_test_enable {
        unsupported.push(UnsupportedState::DepthTestDisabled);
    }
    if !ds.depth_write_enable {
        unsupported.push(UnsupportedState::DepthWriteDisabled);
    }
    if ds.depth_bounds_test_enable {
        unsupported.push(UnsupportedState::DepthBoundsTest);
    }
    if ds.stencil_test_enable {
        unsupported.push(UnsupportedState::StencilTest);
    }

    let vp = &desc.viewport;
    if vp.viewports.len() != 1 {
        unsupported.push(UnsupportedState::ViewportCount(vp.viewports.len()));
    }
    for viewport in &vp.viewports {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(viewport.width) && valid(viewport.height)) {
            unsupported.push(UnsupportedState::ViewportExtent {
                width: viewport.width,
                height: viewport.height,
            });
        }
    }
    if vp.scissors.len() > 1 {
        unsupported.push(UnsupportedState::ScissorCount(vp.scissors.len()));
    }

    unsupported.extend(
        desc.dynamic_states
            .iter()
            .copied()
            .map(UnsupportedState::DynamicState),
    );

    unsupported
}

impl Pipeline {
    /// Validates `desc` and builds the pipeline. Fails with
    /// [`PipelineError::Configuration`] listing every unsupported setting.
    pub fn new(desc: &GraphicsPipelineDesc) -> Result<Self, PipelineError> {
        let unsupported = validate(desc);
        let (Some(viewport), Some(attachment), true) = (
            desc.viewport.viewports.first(),
            desc.color_blend.attachments.first(),
            unsupported.is_empty(),
        ) else {
            return Err(PipelineError::Configuration(unsupported));
        };

        Ok(Self {
            viewport: *viewport,
            scissor: desc.viewport.scissors.first().copied(),
            depth_compare: desc.depth_stencil.depth_compare_op,
            blender: Blender::new(attachment, desc.color_blend.blend_constants),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn depth_compare(&self) -> CompareOp {
        self.depth_compare
    }

    pub fn blender(&self) -> &Blender {
        &self.blender
    }

    /// Maps a clip-space position to framebuffer space: perspective divide, then the viewport
    /// transform with Y pointing down. `z` becomes the reciprocal of the NDC depth.
    pub fn to_screen(&self, clip: [f32; 4]) -> Vertex {
        let [x, y, z, w] = clip;
        let (x, y, z) = (x / w, y / w, z / w);
        let vp = &self.viewport;
        Vertex {
            x: vp.x + (x + 1.0) / 2.0 * vp.width,
            y: vp.y + (1.0 - y) / 2.0 * vp.height,
            z: 1.0 / z,
        }
    }

    /// Pixels a draw may touch: viewport, scissor and framebuffer extent intersected.
    fn clip_rect(&self, fb: &Framebuffer) -> ClipRect {
        let vp = &self.viewport;
        let mut rect = ClipRect {
            x0: vp.x.floor() as i32,
            y0: vp.y.floor() as i32,
            x1: (vp.x + vp.width).ceil() as i32,
            y1: (vp.y + vp.height).ceil() as i32,
        }
        .intersect(ClipRect::from_extent(fb.width(), fb.height()));

        if let Some(sc) = self.scissor {
            let width = i32::try_from(sc.width).unwrap_or(i32::MAX);
            let height = i32::try_from(sc.height).unwrap_or(i32::MAX);
            rect = rect.intersect(ClipRect {
                x0: sc.x,
                y0: sc.y,
                x1: sc.x.saturating_add(width),
                y1: sc.y.saturating_add(height),
            });
        }
        rect
    }

    /// Draws a triangle list.
    ///
    /// `vertex` maps an index to a clip-space position. For every covered pixel that passes the
    /// depth test, the depth is written, `fragment` is shaded and the result is blended over the
    /// stored color. Failing pixels are left untouched.
    pub fn draw(
        &self,
        fb: &mut Framebuffer,
        indices: &[u32],
        mut vertex: impl FnMut(u32) -> [f32; 4],
        mut fragment: impl FnMut(&Fragment) -> [f32; 4],
    ) -> Result<DrawStats, PipelineError> {
        if indices.len() % 3 != 0 {
            return Err(PipelineError::IndexCount(indices.len()));
        }

        let clip = self.clip_rect(fb);
        let mut stats = DrawStats::default();

        for (primitive, tri) in indices.chunks_exact(3).enumerate() {
            let primitive = primitive as u32;
            stats.triangles += 1;
            let screen = [
                self.to_screen(vertex(tri[0])),
                self.to_screen(vertex(tri[1])),
                self.to_screen(vertex(tri[2])),
            ];

            let rasterized = rasterize_triangle(clip, screen, |c| {
                let stored = fb.depth_at(c.x, c.y).unwrap_or(f32::NEG_INFINITY);
                if !self.depth_compare.test(c.depth, stored) {
                    stats.fragments_depth_rejected += 1;
                    return;
                }
                stats.fragments_passed += 1;
                fb.write_depth(c.x, c.y, c.depth);

                let src = fragment(&Fragment {
                    x: c.x,
                    y: c.y,
                    depth: c.depth,
                    barycentric: c.barycentric,
                    primitive,
                });
                let dst = fb.read_pixel(c.x, c.y).unwrap_or([0.0; 4]);
                fb.write_pixel(c.x, c.y, self.blender.blend(src, dst));
            });
            if !rasterized {
                trace!(primitive, ?screen, "skipped degenerate triangle");
                stats.triangles_skipped += 1;
            }
        }

        debug!(
            triangles = stats.triangles,
            skipped = stats.triangles_skipped,
            passed = stats.fragments_passed,
            depth_rejected = stats.fragments_depth_rejected,
            "draw"
        );
        Ok(stats)
    }
}
