#![no_main]

use arbitrary::Unstructured;
use granite_raster::{
    BlendFactor, BlendOp, ColorBlendAttachmentState, CompareOp, Framebuffer,
    GraphicsPipelineDesc, Pipeline,
};
use libfuzzer_sys::fuzz_target;

const MAX_EXTENT: u32 = 64;
const MAX_TRIANGLES: usize = 16;

fn draw(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
    let width = u.int_in_range(1..=MAX_EXTENT)?;
    let height = u.int_in_range(1..=MAX_EXTENT)?;
    let mut desc = GraphicsPipelineDesc::for_extent(width, height);

    if let Ok(op) = CompareOp::try_from(u.int_in_range(0..=7u32)?) {
        desc.depth_stencil.depth_compare_op = op;
    }
    let mut attachment = ColorBlendAttachmentState {
        blend_enable: u.arbitrary()?,
        ..ColorBlendAttachmentState::default()
    };
    if let Ok(op) = BlendOp::try_from(u.int_in_range(0..=4u32)?) {
        attachment.color_blend_op = op;
    }
    if let Ok(factor) = BlendFactor::try_from(u.int_in_range(0..=18u32)?) {
        attachment.src_color_blend_factor = factor;
    }
    if let Ok(factor) = BlendFactor::try_from(u.int_in_range(0..=18u32)?) {
        attachment.dst_alpha_blend_factor = factor;
    }
    desc.color_blend.attachments = vec![attachment];

    let Ok(pipeline) = Pipeline::new(&desc) else {
        return Ok(());
    };

    let triangles = u.int_in_range(1..=MAX_TRIANGLES)?;
    let mut positions = Vec::with_capacity(triangles * 3);
    for _ in 0..triangles * 3 {
        let v: [f32; 4] = u.arbitrary()?;
        positions.push(v);
    }
    let indices: Vec<u32> = (0..positions.len() as u32).collect();
    let color: [f32; 4] = u.arbitrary()?;

    let mut fb = Framebuffer::new(width, height);
    let _ = pipeline.draw(&mut fb, &indices, |i| positions[i as usize], |_| color);
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let _ = draw(&mut u);
});
