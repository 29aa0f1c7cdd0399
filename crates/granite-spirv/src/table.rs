use crate::error::SpirvError;
use crate::opcode::Opcode;
use crate::ops::{annotation, constant, meta, types};
use crate::program::Program;
use crate::reader::Operands;

/// An instruction handler: consumes the operands of one instruction and updates the program.
pub type Handler = fn(&mut Program, &mut Operands<'_>) -> Result<(), SpirvError>;

/// Returns the handler for `opcode`, or `None` if the decoder does not implement it.
pub fn lookup(opcode: Opcode) -> Option<Handler> {
    let handler: Handler = match opcode {
        Opcode::Nop => meta::nop,
        Opcode::Source => meta::source,
        Opcode::SourceExtension => meta::source_extension,
        Opcode::Name => meta::name,
        Opcode::MemberName => meta::member_name,
        Opcode::Extension => meta::extension,
        Opcode::ExtInstImport => meta::ext_inst_import,
        Opcode::MemoryModel => meta::memory_model,
        Opcode::EntryPoint => meta::entry_point,
        Opcode::ExecutionMode => meta::execution_mode,
        Opcode::Capability => meta::capability,
        Opcode::TypeVoid => types::type_void,
        Opcode::TypeBool => types::type_bool,
        Opcode::TypeInt => types::type_int,
        Opcode::TypeFloat => types::type_float,
        Opcode::TypeVector => types::type_vector,
        Opcode::TypeMatrix => types::type_matrix,
        Opcode::TypeArray => types::type_array,
        Opcode::TypeStruct => types::type_struct,
        Opcode::TypePointer => types::type_pointer,
        Opcode::TypeFunction => types::type_function,
        Opcode::Constant => constant::constant,
        Opcode::Decorate => annotation::decorate,
        Opcode::MemberDecorate => annotation::member_decorate,
        _ => return None,
    };
    Some(handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_handled_opcode_is_named() {
        for raw in 0..=u16::MAX {
            let opcode = Opcode::from_raw(raw);
            if lookup(opcode).is_some() {
                assert!(opcode.name().is_some(), "{opcode} has a handler but no name");
            }
        }
    }

    #[test]
    fn function_bodies_are_not_handled() {
        for opcode in [Opcode::Function, Opcode::Variable, Opcode::Label, Opcode::Unknown(9999)] {
            assert!(lookup(opcode).is_none(), "{opcode}");
        }
    }
}
