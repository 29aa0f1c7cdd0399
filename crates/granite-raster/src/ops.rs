//! Depth-compare and blend operators.
//!
//! Discriminants follow the Vulkan enumerations, so raw API values convert with `TryFrom<u32>`.

use crate::error::{OperatorKind, PipelineError, UnsupportedState};

/// `VkCompareOp`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareOp {
    Never = 0,
    #[default]
    Less = 1,
    Equal = 2,
    LessOrEqual = 3,
    Greater = 4,
    NotEqual = 5,
    GreaterOrEqual = 6,
    Always = 7,
}

impl CompareOp {
    /// Evaluates `reference <op> stored`, e.g. `Less` passes when the incoming value is smaller.
    pub fn test(self, reference: f32, stored: f32) -> bool {
        match self {
            Self::Never => false,
            Self::Less => reference < stored,
            Self::Equal => reference == stored,
            Self::LessOrEqual => reference <= stored,
            Self::Greater => reference > stored,
            Self::NotEqual => reference != stored,
            Self::GreaterOrEqual => reference >= stored,
            Self::Always => true,
        }
    }
}

impl TryFrom<u32> for CompareOp {
    type Error = PipelineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Never,
            1 => Self::Less,
            2 => Self::Equal,
            3 => Self::LessOrEqual,
            4 => Self::Greater,
            5 => Self::NotEqual,
            6 => Self::GreaterOrEqual,
            7 => Self::Always,
            _ => {
                return Err(PipelineError::InvalidOperator {
                    kind: OperatorKind::CompareOp,
                    value,
                })
            }
        })
    }
}

/// `VkBlendOp` (core operators only).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOp {
    #[default]
    Add = 0,
    Subtract = 1,
    ReverseSubtract = 2,
    Min = 3,
    Max = 4,
}

impl BlendOp {
    /// Combines one channel of `src` and `dst`, each first weighted by its factor.
    pub fn apply(self, src: f32, src_factor: f32, dst: f32, dst_factor: f32) -> f32 {
        let (lhs, rhs) = (src * src_factor, dst * dst_factor);
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::ReverseSubtract => rhs - lhs,
            Self::Min => lhs.min(rhs),
            Self::Max => lhs.max(rhs),
        }
    }
}

impl TryFrom<u32> for BlendOp {
    type Error = PipelineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Add,
            1 => Self::Subtract,
            2 => Self::ReverseSubtract,
            3 => Self::Min,
            4 => Self::Max,
            _ => {
                return Err(PipelineError::InvalidOperator {
                    kind: OperatorKind::BlendOp,
                    value,
                })
            }
        })
    }
}

/// `VkBlendFactor`, without the dual-source `SRC1_*` factors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero = 0,
    One = 1,
    SrcColor = 2,
    OneMinusSrcColor = 3,
    DstColor = 4,
    OneMinusDstColor = 5,
    SrcAlpha = 6,
    OneMinusSrcAlpha = 7,
    DstAlpha = 8,
    OneMinusDstAlpha = 9,
    ConstantColor = 10,
    OneMinusConstantColor = 11,
    ConstantAlpha = 12,
    OneMinusConstantAlpha = 13,
    SrcAlphaSaturate = 14,
}

/// Raw values of the dual-source factors, `SRC1_COLOR` through `ONE_MINUS_SRC1_ALPHA`.
const DUAL_SOURCE_FACTORS: core::ops::RangeInclusive<u32> = 15..=18;

impl BlendFactor {
    /// Resolves the factor to per-channel weights. Color channels use `[0..3]`, the alpha channel
    /// uses `[3]`.
    pub fn resolve(self, src: [f32; 4], dst: [f32; 4], constants: [f32; 4]) -> [f32; 4] {
        let one_minus = |c: [f32; 4]| c.map(|v| 1.0 - v);
        match self {
            Self::Zero => [0.0; 4],
            Self::One => [1.0; 4],
            Self::SrcColor => src,
            Self::OneMinusSrcColor => one_minus(src),
            Self::DstColor => dst,
            Self::OneMinusDstColor => one_minus(dst),
            Self::SrcAlpha => [src[3]; 4],
            Self::OneMinusSrcAlpha => [1.0 - src[3]; 4],
            Self::DstAlpha => [dst[3]; 4],
            Self::OneMinusDstAlpha => [1.0 - dst[3]; 4],
            Self::ConstantColor => constants,
            Self::OneMinusConstantColor => one_minus(constants),
            Self::ConstantAlpha => [constants[3]; 4],
            Self::OneMinusConstantAlpha => [1.0 - constants[3]; 4],
            Self::SrcAlphaSaturate => {
                let f = src[3].min(1.0 - dst[3]);
                [f, f, f, 1.0]
            }
        }
    }
}

impl TryFrom<u32> for BlendFactor {
    type Error = PipelineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Zero,
            1 => Self::One,
            2 => Self::SrcColor,
            3 => Self::OneMinusSrcColor,
            4 => Self::DstColor,
            5 => Self::OneMinusDstColor,
            6 => Self::SrcAlpha,
            7 => Self::OneMinusSrcAlpha,
            8 => Self::DstAlpha,
            9 => Self::OneMinusDstAlpha,
            10 => Self::ConstantColor,
            11 => Self::OneMinusConstantColor,
            12 => Self::ConstantAlpha,
            13 => Self::OneMinusConstantAlpha,
            14 => Self::SrcAlphaSaturate,
            v if DUAL_SOURCE_FACTORS.contains(&v) => {
                return Err(PipelineError::Configuration(vec![
                    UnsupportedState::DualSourceBlendFactor(v),
                ]))
            }
            _ => {
                return Err(PipelineError::InvalidOperator {
                    kind: OperatorKind::BlendFactor,
                    value,
                })
            }
        })
    }
}
