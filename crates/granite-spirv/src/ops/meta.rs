//! Debug, extension and mode-setting instructions.

use tracing::{debug, warn};

use crate::error::SpirvError;
use crate::opcode::Opcode;
use crate::program::{EntryPoint, ExecutionModeDecl, Program, SourceInfo, VariableKind};
use crate::reader::Operands;
use crate::types::{
    AddressingModel, Capability, ExecutionMode, ExecutionModel, MemoryModel, SourceLanguage,
};

/// Extensions whose instructions decode without special handling.
const KNOWN_EXTENSIONS: &[&str] = &[
    "SPV_KHR_shader_draw_parameters",
    "SPV_KHR_storage_buffer_storage_class",
    "SPV_KHR_16bit_storage",
    "SPV_KHR_variable_pointers",
    "SPV_KHR_non_semantic_info",
    "SPV_GOOGLE_decorate_string",
    "SPV_GOOGLE_hlsl_functionality1",
    "SPV_GOOGLE_user_type",
];

pub(crate) fn nop(_program: &mut Program, _ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    Ok(())
}

pub(crate) fn source(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let language = SourceLanguage::from_raw(ops.word()?);
    let version = ops.word()?;
    let file = if ops.is_empty() { None } else { Some(ops.id()?) };
    // Any trailing source text is not retained.
    ops.rest();

    debug!(%language, version, "source");
    program.source = Some(SourceInfo {
        language,
        version,
        file,
    });
    Ok(())
}

pub(crate) fn source_extension(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let name = ops.string()?;
    debug!(%name, "source extension");
    program.source_extensions.push(name);
    Ok(())
}

pub(crate) fn name(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let name = ops.string()?;
    program.variable_mut(id)?.name = Some(name);
    Ok(())
}

pub(crate) fn member_name(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let member = ops.word()?;
    let name = ops.string()?;
    program
        .variable_mut(id)?
        .members
        .entry(member)
        .or_default()
        .name = Some(name);
    Ok(())
}

pub(crate) fn extension(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let name = ops.string()?;
    if KNOWN_EXTENSIONS.contains(&name.as_str()) {
        debug!(%name, "extension");
    } else {
        warn!(%name, "unknown extension");
    }
    program.extensions.push(name);
    Ok(())
}

pub(crate) fn ext_inst_import(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let name = ops.string()?;
    debug!(id, %name, "extended instruction set import");
    program.define(id, Opcode::ExtInstImport, VariableKind::Extension { name })
}

pub(crate) fn memory_model(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let addressing = AddressingModel::from_raw(ops.word()?);
    let memory = MemoryModel::from_raw(ops.word()?);
    if program.memory_model.is_some() {
        return Err(ops.invalid("the memory model is set at most once per module"));
    }

    debug!(%addressing, %memory, "memory model");
    program.addressing_model = Some(addressing);
    program.memory_model = Some(memory);
    Ok(())
}

pub(crate) fn entry_point(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let execution_model = ExecutionModel::from_raw(ops.word()?);
    let id = ops.id()?;
    let name = ops.string()?;
    let interface = super::referenced_ids(program, ops)?;

    debug!(id, %execution_model, %name, interface_len = interface.len(), "entry point");
    program.define(
        id,
        Opcode::EntryPoint,
        VariableKind::EntryPoint(EntryPoint {
            execution_model,
            name,
            interface,
            execution_modes: Vec::new(),
        }),
    )
}

pub(crate) fn execution_mode(
    program: &mut Program,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let id = ops.id()?;
    let mode = ExecutionMode::from_raw(ops.word()?);
    let operands = ops.rest().to_vec();

    match &mut program.variable_mut(id)?.kind {
        VariableKind::EntryPoint(entry) => {
            debug!(id, %mode, "execution mode");
            entry.execution_modes.push(ExecutionModeDecl { mode, operands });
            Ok(())
        }
        other => Err(ops.invalid(format!(
            "execution mode target %{id} is a {}, not an entry point",
            other.kind_name()
        ))),
    }
}

pub(crate) fn capability(program: &mut Program, ops: &mut Operands<'_>) -> Result<(), SpirvError> {
    let capability = Capability::from_raw(ops.word()?);
    if capability.is_known() {
        debug!(%capability, "capability");
    } else {
        warn!(raw = capability.raw(), "unrecognized capability");
    }
    program.capabilities.push(capability);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{Header, SPIRV_MAGIC};
    use crate::test_utils::pack_string;

    fn program() -> Program {
        Program::new(Header::parse(&[SPIRV_MAGIC, 0x0001_0000, 0, 8, 0]).unwrap())
    }

    fn run(
        handler: fn(&mut Program, &mut Operands<'_>) -> Result<(), SpirvError>,
        program: &mut Program,
        opcode: Opcode,
        words: &[u32],
    ) -> Result<(), SpirvError> {
        handler(program, &mut Operands::new(opcode, 5, words))
    }

    #[test]
    fn member_name_creates_the_member_record() {
        let mut program = program();
        let mut words = vec![3, 1];
        words.extend(pack_string("normal"));
        run(member_name, &mut program, Opcode::MemberName, &words).unwrap();

        let member = &program.variable(3).unwrap().members[&1];
        assert_eq!(member.name.as_deref(), Some("normal"));
        assert!(!program.variable(3).unwrap().is_defined());
    }

    #[test]
    fn entry_point_reads_interface_after_the_padded_name() {
        let mut program = program();
        let mut words = vec![4, 1];
        words.extend(pack_string("main"));
        words.extend([2, 3]);
        run(entry_point, &mut program, Opcode::EntryPoint, &words).unwrap();

        let (id, entry) = program.entry_point("main").unwrap();
        assert_eq!(id, 1);
        assert_eq!(entry.execution_model, ExecutionModel::Fragment);
        assert_eq!(entry.interface, vec![2, 3]);
    }

    #[test]
    fn execution_mode_requires_an_entry_point() {
        let mut program = program();
        let err = run(execution_mode, &mut program, Opcode::ExecutionMode, &[1, 7]).unwrap_err();
        assert!(matches!(err, SpirvError::InvalidOperand { .. }));

        let mut words = vec![4, 1];
        words.extend(pack_string("main"));
        run(entry_point, &mut program, Opcode::EntryPoint, &words).unwrap();
        run(execution_mode, &mut program, Opcode::ExecutionMode, &[1, 7]).unwrap();
        let (_, entry) = program.entry_point("main").unwrap();
        assert_eq!(entry.execution_modes[0].mode, ExecutionMode::OriginUpperLeft);
    }

    #[test]
    fn memory_model_is_set_once() {
        let mut program = program();
        run(memory_model, &mut program, Opcode::MemoryModel, &[0, 1]).unwrap();
        assert_eq!(program.addressing_model, Some(AddressingModel::Logical));
        assert_eq!(program.memory_model, Some(MemoryModel::Glsl450));

        let err = run(memory_model, &mut program, Opcode::MemoryModel, &[0, 3]).unwrap_err();
        assert!(matches!(err, SpirvError::InvalidOperand { .. }));
        assert_eq!(program.memory_model, Some(MemoryModel::Glsl450));
    }

    #[test]
    fn unknown_extensions_are_still_recorded() {
        let mut program = program();
        run(
            extension,
            &mut program,
            Opcode::Extension,
            &pack_string("SPV_VENDOR_made_up"),
        )
        .unwrap();
        assert_eq!(program.extensions, vec!["SPV_VENDOR_made_up".to_string()]);
    }

    #[test]
    fn source_file_operand_is_optional() {
        let mut program = program();
        run(source, &mut program, Opcode::Source, &[2, 450]).unwrap();
        assert_eq!(
            program.source,
            Some(SourceInfo {
                language: SourceLanguage::Glsl,
                version: 450,
                file: None,
            })
        );
        run(source, &mut program, Opcode::Source, &[5, 600, 6]).unwrap();
        assert_eq!(program.source.unwrap().file, Some(6));
    }
}
