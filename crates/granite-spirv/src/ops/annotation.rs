use crate::decoration::{apply_decoration, Decoration};
use crate::error::SpirvError;
use crate::program::Program;
use crate::reader::Operands;

pub(crate) fn decorate(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let decoration = Decoration::from_raw(ops.word()?);
    let variable = program.variable_mut(id)?;
    apply_decoration(&mut variable.decorations, decoration, ops)
}

pub(crate) fn member_decorate(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let member = ops.word()?;
    let decoration = Decoration::from_raw(ops.word()?);
    let member = program.variable_mut(id)?.members.entry(member).or_default();
    apply_decoration(&mut member.decorations, decoration, ops)
}
