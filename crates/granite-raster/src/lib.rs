//! Fixed-function software rasterization.
//!
//! A [`Pipeline`] is built from a Vulkan-shaped [`GraphicsPipelineDesc`]; creation rejects every
//! setting the software path cannot honour up front, so drawing itself only fails on malformed
//! input. Drawing runs an edge-function rasterizer over each triangle, depth-tests each covered
//! pixel against the [`Framebuffer`], then shades and blends the survivors.
//!
//! Vertex and fragment stages are caller-supplied closures; there is no shader execution here.

#![forbid(unsafe_code)]

mod blend;
mod error;
mod framebuffer;
mod memory;
mod ops;
mod pipeline;
mod rasterizer;
mod state;

pub use crate::blend::Blender;
pub use crate::error::{MemoryError, OperatorKind, PipelineError, UnsupportedState};
pub use crate::framebuffer::{decode_rgba8, encode_rgba8, Framebuffer};
pub use crate::memory::{DeviceMemory, MemorySlice, MemorySliceMut};
pub use crate::ops::{BlendFactor, BlendOp, CompareOp};
pub use crate::pipeline::{DrawStats, Fragment, Pipeline};
pub use crate::rasterizer::{rasterize_triangle, ClipRect, Coverage, Vertex};
pub use crate::state::{
    ColorBlendAttachmentState, ColorBlendState, ColorComponentFlags, CullMode, DepthStencilState,
    DynamicState, FrontFace, GraphicsPipelineDesc, MultisampleState, PolygonMode, Rect2D,
    RasterizationState, Viewport, ViewportState,
};
