use crate::ops::{BlendFactor, BlendOp};
use crate::state::ColorBlendAttachmentState;

/// Blend equation for the single color attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blender {
    enabled: bool,
    src_color: BlendFactor,
    dst_color: BlendFactor,
    color_op: BlendOp,
    src_alpha: BlendFactor,
    dst_alpha: BlendFactor,
    alpha_op: BlendOp,
    constants: [f32; 4],
}

impl Blender {
    pub fn new(attachment: &ColorBlendAttachmentState, constants: [f32; 4]) -> Self {
        Self {
            enabled: attachment.blend_enable,
            src_color: attachment.src_color_blend_factor,
            dst_color: attachment.dst_color_blend_factor,
            color_op: attachment.color_blend_op,
            src_alpha: attachment.src_alpha_blend_factor,
            dst_alpha: attachment.dst_alpha_blend_factor,
            alpha_op: attachment.alpha_blend_op,
            constants,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Blends `src` (the fragment's output) over `dst` (the stored color). Both are unit-range
    /// RGBA; the result is not clamped.
    pub fn blend(&self, src: [f32; 4], dst: [f32; 4]) -> [f32; 4] {
        if !self.enabled {
            return src;
        }

        let src_color = self.src_color.resolve(src, dst, self.constants);
        let dst_color = self.dst_color.resolve(src, dst, self.constants);
        let src_alpha = self.src_alpha.resolve(src, dst, self.constants)[3];
        let dst_alpha = self.dst_alpha.resolve(src, dst, self.constants)[3];

        core::array::from_fn(|i| match i {
            3 => self.alpha_op.apply(src[3], src_alpha, dst[3], dst_alpha),
            _ => self
                .color_op
                .apply(src[i], src_color[i], dst[i], dst_color[i]),
        })
    }
}
