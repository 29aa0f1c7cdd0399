//! Type declarations (`OpType*`).

use crate::error::SpirvError;
use crate::opcode::Opcode;
use crate::program::{ConstantValue, Id, Program, TypeInfo, VariableKind};
use crate::reader::Operands;
use crate::types::StorageClass;

use super::{referenced_id, referenced_ids};

fn define_type(
    program: &mut Program,
    ops: &Operands<'_>,
    id: Id,
    ty: TypeInfo,
) -> Result<(), SpirvError> {
    program.define(id, ops.opcode(), VariableKind::Type(ty))
}

pub(crate) fn type_void(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    define_type(program, ops, id, TypeInfo::Void)
}

pub(crate) fn type_bool(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    define_type(program, ops, id, TypeInfo::Bool)
}

pub(crate) fn type_int(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let width = ops.word()?;
    let ty = match ops.word()? {
        0 => TypeInfo::UInt { width },
        _ => TypeInfo::SInt { width },
    };
    define_type(program, ops, id, ty)
}

pub(crate) fn type_float(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let width = ops.word()?;
    define_type(program, ops, id, TypeInfo::Float { width })
}

pub(crate) fn type_vector(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let component = referenced_id(program, ops)?;
    let count = ops.word()?;
    if count < 2 {
        return Err(ops.invalid(format!("vector component count {count} is below 2")));
    }
    define_type(program, ops, id, TypeInfo::Vector { component, count })
}

pub(crate) fn type_matrix(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let column = referenced_id(program, ops)?;
    let count = ops.word()?;
    if count < 2 {
        return Err(ops.invalid(format!("matrix column count {count} is below 2")));
    }
    define_type(program, ops, id, TypeInfo::Matrix { column, count })
}

pub(crate) fn type_array(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let element = referenced_id(program, ops)?;
    let length_id = referenced_id(program, ops)?;

    // The length is an id, not a literal: it must name an integer constant declared earlier.
    let length = match &program.variable(length_id)?.kind {
        VariableKind::Constant(constant) => match constant.value {
            ConstantValue::UInt(length) => Some(length),
            ConstantValue::SInt(length) => u32::try_from(length).ok(),
            ConstantValue::Float(_) => None,
        },
        _ => None,
    };
    let Some(length) = length else {
        return Err(ops.invalid(format!(
            "array length %{length_id} is not a non-negative integer constant"
        )));
    };
    define_type(program, ops, id, TypeInfo::Array { element, length })
}

pub(crate) fn type_struct(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let members = referenced_ids(program, ops)?;
    define_type(program, ops, id, TypeInfo::Struct { members })
}

pub(crate) fn type_pointer(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let storage = StorageClass::from_raw(ops.word()?);
    let pointee = referenced_id(program, ops)?;
    define_type(program, ops, id, TypeInfo::Pointer { storage, pointee })
}

pub(crate) fn type_function(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let return_type = referenced_id(program, ops)?;
    let parameters = referenced_ids(program, ops)?;
    define_type(
        program,
        ops,
        id,
        TypeInfo::Function {
            return_type,
            parameters,
        },
    )
}
