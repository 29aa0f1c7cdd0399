use tracing::trace;

use crate::error::SpirvError;
use crate::program::{Constant, ConstantValue, Program, TypeInfo, VariableKind};
use crate::reader::Operands;

pub(crate) fn constant(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let ty = ops.id()?;
    let id = ops.id()?;

    let scalar = match &program.variable(ty)?.kind {
        VariableKind::Type(scalar) if scalar.scalar_width().is_some() => scalar.clone(),
        other => {
            return Err(ops.invalid(format!(
                "constant result type %{ty} is a {}, not a numeric scalar type",
                other.kind_name()
            )));
        }
    };
    if scalar.scalar_width() != Some(32) {
        return Err(ops.unsupported(format!("{scalar} constant; only 32-bit widths are decoded")));
    }

    let bits = ops.word()?;
    let value = match scalar {
        TypeInfo::UInt { .. } => ConstantValue::UInt(bits),
        TypeInfo::SInt { .. } => ConstantValue::SInt(bits as i32),
        _ => ConstantValue::Float(f32::from_bits(bits)),
    };

    trace!(id, ty, %value, "constant");
    program.define(id, ops.opcode(), VariableKind::Constant(Constant { ty, value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{Header, SPIRV_MAGIC};
    use crate::opcode::Opcode;
    use crate::ops::types::{type_bool, type_float, type_int};

    fn program() -> Program {
        let mut program =
            Program::new(Header::parse(&[SPIRV_MAGIC, 0x0001_0000, 0, 16, 0]).unwrap());
        type_int(&mut program, &mut Operands::new(Opcode::TypeInt, 0, &[1, 32, 0])).unwrap();
        type_int(&mut program, &mut Operands::new(Opcode::TypeInt, 0, &[2, 32, 1])).unwrap();
        type_float(&mut program, &mut Operands::new(Opcode::TypeFloat, 0, &[3, 32])).unwrap();
        type_float(&mut program, &mut Operands::new(Opcode::TypeFloat, 0, &[4, 64])).unwrap();
        type_bool(&mut program, &mut Operands::new(Opcode::TypeBool, 0, &[5])).unwrap();
        program
    }

    fn value_of(program: &Program, id: u32) -> ConstantValue {
        match &program.variable(id).unwrap().kind {
            VariableKind::Constant(c) => c.value,
            other => panic!("expected constant, got {other:?}"),
        }
    }

    #[test]
    fn payload_follows_the_scalar_kind_of_the_type() {
        let mut program = program();
        constant(&mut program, &mut Operands::new(Opcode::Constant, 0, &[1, 10, 7])).unwrap();
        constant(
            &mut program,
            &mut Operands::new(Opcode::Constant, 0, &[2, 11, (-3i32) as u32]),
        )
        .unwrap();
        constant(
            &mut program,
            &mut Operands::new(Opcode::Constant, 0, &[3, 12, 1.5f32.to_bits()]),
        )
        .unwrap();

        assert_eq!(value_of(&program, 10), ConstantValue::UInt(7));
        assert_eq!(value_of(&program, 11), ConstantValue::SInt(-3));
        assert_eq!(value_of(&program, 12), ConstantValue::Float(1.5));
    }

    #[test]
    fn wide_constants_are_unsupported() {
        let mut program = program();
        let err = constant(&mut program, &mut Operands::new(Opcode::Constant, 0, &[4, 10, 0, 0]))
            .unwrap_err();
        assert!(matches!(err, SpirvError::Unsupported { .. }));
    }

    #[test]
    fn non_numeric_result_type_is_invalid() {
        let mut program = program();
        let err = constant(&mut program, &mut Operands::new(Opcode::Constant, 0, &[5, 10, 1]))
            .unwrap_err();
        assert!(matches!(err, SpirvError::InvalidOperand { .. }));

        let err = constant(&mut program, &mut Operands::new(Opcode::Constant, 0, &[9, 10, 1]))
            .unwrap_err();
        assert!(matches!(err, SpirvError::InvalidOperand { .. }));
    }
}
