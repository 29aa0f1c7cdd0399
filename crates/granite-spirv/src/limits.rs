//! Centralized limits for SPIR-V decoding.
//!
//! Modules arrive from client code and are treated as untrusted input. These limits bound the
//! allocations made before a single instruction has been validated.

/// Maximum accepted module size in bytes.
pub(crate) const MAX_BYTECODE_BYTES: usize = 4 * 1024 * 1024; // 4 MiB

/// Maximum accepted module size in words.
pub(crate) const MAX_BYTECODE_WORDS: usize = MAX_BYTECODE_BYTES / 4;

/// Maximum accepted id bound.
///
/// The id table is allocated up front from the header, so an absurd bound in a tiny module would
/// turn into a multi-gigabyte allocation.
pub(crate) const MAX_ID_BOUND: u32 = 256 * 1024;

/// Number of words in the module header.
pub(crate) const HEADER_WORDS: usize = 5;
