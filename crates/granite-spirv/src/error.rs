use thiserror::Error;

use crate::decoration::Decoration;
use crate::opcode::Opcode;

/// Errors produced while decoding a SPIR-V module.
///
/// Every variant is fatal for the module being decoded; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpirvError {
    /// The module header is malformed or the input cannot be a SPIR-V module at all.
    #[error("malformed SPIR-V module: {0}")]
    Format(String),

    /// A well-formed instruction the decoder has no handler for.
    #[error("unimplemented opcode {opcode} at word {word_offset}")]
    UnimplementedOpcode { opcode: Opcode, word_offset: usize },

    /// A decoration whose operand layout the decoder does not parse yet.
    #[error("unimplemented decoration {decoration} at word {word_offset}")]
    UnimplementedDecoration {
        decoration: Decoration,
        word_offset: usize,
    },

    #[error("instruction at word {word_offset} has a word count of 0")]
    InvalidWordCount { word_offset: usize },

    #[error(
        "{opcode} at word {word_offset} is truncated: needed {needed} more words, {available} available"
    )]
    Truncated {
        opcode: Opcode,
        word_offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("id %{id} is outside the valid range 1..{bound}")]
    IdOutOfRange { id: u32, bound: u32 },

    #[error("id %{id} is already defined as {existing}; {opcode} cannot redefine it as {requested}")]
    Redefinition {
        id: u32,
        opcode: Opcode,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("{opcode} at word {word_offset}: {message}")]
    InvalidOperand {
        opcode: Opcode,
        word_offset: usize,
        message: String,
    },

    #[error("{opcode} at word {word_offset}: unsupported {message}")]
    Unsupported {
        opcode: Opcode,
        word_offset: usize,
        message: String,
    },
}

impl SpirvError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}
