use core::fmt;

use thiserror::Error;

use crate::state::{ColorComponentFlags, CullMode, DynamicState, FrontFace, PolygonMode};

/// Which raw operator table a value failed to map into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    CompareOp,
    BlendOp,
    BlendFactor,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CompareOp => "compare op",
            Self::BlendOp => "blend op",
            Self::BlendFactor => "blend factor",
        })
    }
}

/// A single fixed-function setting the pipeline cannot honour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnsupportedState {
    #[error("logic ops are not supported")]
    LogicOp,
    #[error("exactly one color blend attachment is supported, got {0}")]
    AttachmentCount(usize),
    #[error("color write mask must be RGBA, got {0:?}")]
    ColorWriteMask(ColorComponentFlags),
    #[error("dual-source blend factor {0} is not supported")]
    DualSourceBlendFactor(u32),
    #[error("rasterizer discard is not supported")]
    RasterizerDiscard,
    #[error("depth clamp is not supported")]
    DepthClamp,
    #[error("depth bias is not supported")]
    DepthBias,
    #[error("polygon mode {0:?} is not supported")]
    PolygonMode(PolygonMode),
    #[error("cull mode {0:?} is not supported")]
    CullMode(CullMode),
    #[error("front face {0:?} is not supported")]
    FrontFace(FrontFace),
    #[error("{0} samples per pixel is not supported")]
    SampleCount(u32),
    #[error("sample shading is not supported")]
    SampleShading,
    #[error("alpha to coverage is not supported")]
    AlphaToCoverage,
    #[error("alpha to one is not supported")]
    AlphaToOne,
    #[error("depth test must be enabled")]
    DepthTestDisabled,
    #[error("depth writes must be enabled")]
    DepthWriteDisabled,
    #[error("depth bounds test is not supported")]
    DepthBoundsTest,
    #[error("stencil test is not supported")]
    StencilTest,
    #[error("exactly one viewport is supported, got {0}")]
    ViewportCount(usize),
    #[error("viewport has an empty or non-finite extent {width}x{height}")]
    ViewportExtent { width: f32, height: f32 },
    #[error("at most one scissor is supported, got {0}")]
    ScissorCount(usize),
    #[error("dynamic state {0:?} is not supported")]
    DynamicState(DynamicState),
}

fn join_states(states: &[UnsupportedState]) -> String {
    states
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The creation descriptor requests fixed-function state the pipeline cannot honour. Lists
    /// every offending field, not just the first.
    #[error("unsupported pipeline configuration: {}", join_states(.0))]
    Configuration(Vec<UnsupportedState>),

    /// A raw API value does not name any known operator.
    #[error("invalid {kind} value {value}")]
    InvalidOperator { kind: OperatorKind, value: u32 },

    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("range {offset}+{len} is out of bounds for {size} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },
}
