//! Decoder for SPIR-V shader modules.
//!
//! The decoder walks a module's word stream once and populates an id-indexed [`Program`]: types,
//! constants, extension imports, entry points, debug names and decorations. Decoding is strict:
//! an instruction without a handler fails the whole module instead of being skipped.
//!
//! Input is treated as untrusted. Every id is bounds-checked against the header's id bound and
//! every operand read is checked against the instruction's declared word count.

#![forbid(unsafe_code)]

mod decode;
mod decoration;
mod error;
mod header;
pub(crate) mod limits;
mod opcode;
mod ops;
mod program;
mod reader;
mod table;
mod types;

/// Helpers for building synthetic SPIR-V modules in tests.
///
/// Only available when compiling this crate's own tests, or when the `test-utils` feature is
/// enabled. Not part of the stable decoding API.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests_module;

pub use crate::decode::{decode_bytes, decode_words};
pub use crate::decoration::{Decoration, DecorationValue, Decorations};
pub use crate::error::SpirvError;
pub use crate::header::{Header, SPIRV_MAGIC};
pub use crate::opcode::Opcode;
pub use crate::program::{
    Constant, ConstantValue, EntryPoint, ExecutionModeDecl, Id, Member, Program, SourceInfo,
    TypeInfo, Variable, VariableKind,
};
pub use crate::reader::Operands;
pub use crate::table::{lookup, Handler};
pub use crate::types::{
    AddressingModel, Capability, ExecutionMode, ExecutionModel, MemoryModel, SourceLanguage,
    StorageClass,
};
