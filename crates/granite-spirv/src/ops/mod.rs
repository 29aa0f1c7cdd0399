//! Instruction handlers, grouped by the section of the module they decode.
//!
//! Every handler receives the program being built and a cursor over the instruction's operand
//! words. A handler either records module-level metadata or populates a single id slot.

pub(crate) mod annotation;
pub(crate) mod constant;
pub(crate) mod meta;
pub(crate) mod types;

use crate::error::SpirvError;
use crate::program::{Id, Program};
use crate::reader::Operands;

/// Reads an id operand that refers to another instruction and checks it is in range.
///
/// Forward references are legal (e.g. pointers to structs declared later), so only the range is
/// checked, not the referenced kind.
pub(crate) fn referenced_id(
    program: &Program,
    ops: &mut Operands<'_>,
) -> Result<Id, SpirvError> {
    let id = ops.id()?;
    program.variable(id)?;
    Ok(id)
}

/// Reads every remaining operand as a referenced id.
pub(crate) fn referenced_ids(
    program: &Program,
    ops: &mut Operands<'_>,
) -> Result<Vec<Id>, SpirvError> {
    let ids = ops.rest().to_vec();
    for &id in &ids {
        program.variable(id)?;
    }
    Ok(ids)
}
