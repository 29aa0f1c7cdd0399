//! Whole-module decoding tests driven through `decode_words`/`decode_bytes`.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::test_utils::ModuleBuilder;
use crate::{
    decode_bytes, decode_words, AddressingModel, Capability, ConstantValue, Decoration,
    DecorationValue, ExecutionModel, MemoryModel, Opcode, SpirvError, TypeInfo, VariableKind,
};

/// The module glslang emits for a trivial fragment shader, minus the function body.
fn fragment_module() -> ModuleBuilder {
    let mut b = ModuleBuilder::new(12);
    b.generator(8, 10)
        .capability(Capability::Shader)
        .ext_inst_import(1, "GLSL.std.450")
        .memory_model(AddressingModel::Logical, MemoryModel::Glsl450)
        .entry_point(ExecutionModel::Fragment, 4, "main", &[9])
        .instruction(Opcode::ExecutionMode, &[4, 7])
        .instruction(Opcode::Source, &[2, 450])
        .name(4, "main")
        .name(9, "out_color")
        .decorate(9, Decoration::Location, &[0])
        .type_void(2)
        .type_function(3, 2, &[])
        .type_float(6, 32)
        .type_vector(7, 6, 4)
        .instruction(Opcode::TypePointer, &[8, 3, 7])
        .type_int(10, 32, false)
        .constant_u32(10, 11, 3)
        .constant_f32(6, 5, 0.25);
    b
}

#[test]
fn decodes_a_fragment_shader_preamble() {
    let program = decode_words(&fragment_module().build()).unwrap();

    assert_eq!(program.header.generator_tool(), 8);
    assert_eq!(program.capabilities, vec![Capability::Shader]);
    assert_eq!(program.addressing_model, Some(AddressingModel::Logical));
    assert_eq!(program.memory_model, Some(MemoryModel::Glsl450));

    let (id, entry) = program.entry_point("main").unwrap();
    assert_eq!(id, 4);
    assert_eq!(entry.execution_model, ExecutionModel::Fragment);
    assert_eq!(entry.interface, vec![9]);
    assert_eq!(program.variable(4).unwrap().name.as_deref(), Some("main"));

    assert_eq!(
        program.variable(1).unwrap().kind,
        VariableKind::Extension {
            name: "GLSL.std.450".into()
        }
    );
    assert_eq!(
        program.type_of(7),
        Some(&TypeInfo::Vector {
            component: 6,
            count: 4
        })
    );
    assert_eq!(
        program.variable(9).unwrap().decorations[&Decoration::Location],
        DecorationValue::Word(0)
    );
    match &program.variable(5).unwrap().kind {
        VariableKind::Constant(c) => assert_eq!(c.value, ConstantValue::Float(0.25)),
        other => panic!("expected a constant, got {other:?}"),
    }
    assert_eq!(program.type_of(11), Some(&TypeInfo::UInt { width: 32 }));
}

#[test]
fn decoding_bytes_matches_decoding_words() {
    let builder = fragment_module();
    let from_words = decode_words(&builder.build()).unwrap();
    let from_bytes = decode_bytes(&builder.build_bytes()).unwrap();
    assert_eq!(from_words.variables(), from_bytes.variables());
    assert_eq!(from_words.dump(), from_bytes.dump());
}

#[test]
fn repeated_decoration_keeps_the_last_value() {
    let mut b = ModuleBuilder::new(4);
    b.decorate(2, Decoration::Binding, &[1])
        .decorate(2, Decoration::Binding, &[7])
        .decorate(2, Decoration::Block, &[]);
    let program = decode_words(&b.build()).unwrap();

    let decorations = &program.variable(2).unwrap().decorations;
    assert_eq!(decorations.len(), 2);
    assert_eq!(decorations[&Decoration::Binding], DecorationValue::Word(7));
    assert_eq!(decorations[&Decoration::Block], DecorationValue::Present);
}

#[test]
fn member_names_and_decorations_attach_to_structs() {
    let mut b = ModuleBuilder::new(6);
    b.type_float(1, 32)
        .type_vector(2, 1, 4)
        .type_struct(3, &[2, 1])
        .member_name(3, 0, "position")
        .member_name(3, 1, "size")
        .member_decorate(3, 0, Decoration::Offset, &[0])
        .member_decorate(3, 1, Decoration::Offset, &[16])
        .decorate(3, Decoration::Block, &[]);
    let program = decode_words(&b.build()).unwrap();

    let block = program.variable(3).unwrap();
    assert_eq!(block.interface(), &[2, 1]);
    assert_eq!(block.members.len(), 2);
    assert_eq!(block.members[&0].name.as_deref(), Some("position"));
    assert_eq!(
        block.members[&1].decorations[&Decoration::Offset],
        DecorationValue::Word(16)
    );
}

#[test]
fn string_operands_do_not_disturb_following_instructions() {
    for name in ["", "a", "abc", "abcd", "abcdefg"] {
        let mut b = ModuleBuilder::new(4);
        b.name(1, name).type_bool(1).extension(name).type_void(2);
        let program = decode_words(&b.build()).unwrap();
        assert_eq!(program.variable(1).unwrap().name.as_deref(), Some(name));
        assert_eq!(program.type_of(1), Some(&TypeInfo::Bool));
        assert_eq!(program.type_of(2), Some(&TypeInfo::Void));
    }
}

#[test]
fn linkage_attributes_are_unimplemented() {
    let mut b = ModuleBuilder::new(4);
    b.type_bool(1)
        .decorate(1, Decoration::LinkageAttributes, &[0, 0]);
    let err = decode_words(&b.build()).unwrap_err();
    assert_eq!(
        err,
        SpirvError::UnimplementedDecoration {
            decoration: Decoration::LinkageAttributes,
            word_offset: 7,
        }
    );
}

#[test]
fn extra_operand_words_fail_the_module() {
    let mut b = ModuleBuilder::new(4);
    b.instruction(Opcode::TypeVoid, &[1, 7]);
    assert_eq!(
        decode_words(&b.build()).unwrap_err(),
        SpirvError::InvalidOperand {
            opcode: Opcode::TypeVoid,
            word_offset: 5,
            message: "1 unexpected trailing operand word(s)".to_string(),
        }
    );

    let mut b = ModuleBuilder::new(4);
    b.type_bool(1).decorate(1, Decoration::Location, &[0, 9]);
    assert!(matches!(
        decode_words(&b.build()),
        Err(SpirvError::InvalidOperand {
            opcode: Opcode::Decorate,
            ..
        })
    ));

    // Variadic tails stay unrestricted.
    let mut b = ModuleBuilder::new(4);
    b.type_float(1, 32).type_struct(2, &[1, 1, 1]);
    assert!(decode_words(&b.build()).is_ok());
}

#[test]
fn redefinition_fails_the_module() {
    let mut b = ModuleBuilder::new(4);
    b.type_bool(1).type_float(1, 32);
    assert!(matches!(
        decode_words(&b.build()),
        Err(SpirvError::Redefinition { id: 1, .. })
    ));
}

#[test]
fn ids_at_the_bound_are_rejected() {
    let mut b = ModuleBuilder::new(4);
    b.name(4, "oob");
    assert_eq!(
        decode_words(&b.build()).unwrap_err(),
        SpirvError::IdOutOfRange { id: 4, bound: 4 }
    );
}

#[test]
fn bad_magic_is_a_format_error() {
    let mut words = ModuleBuilder::new(4).build();
    words[0] = 0x0203_0723;
    assert!(matches!(decode_words(&words), Err(SpirvError::Format(_))));
}

proptest! {
    #[test]
    fn variables_match_the_id_bound(id_bound in 1u32..2048) {
        let program = decode_words(&ModuleBuilder::new(id_bound).build()).unwrap();
        prop_assert_eq!(program.variables().len(), id_bound as usize);
        prop_assert!(!program.variables()[0].is_defined());
    }

    #[test]
    fn arbitrary_bodies_never_panic(body in proptest::collection::vec(any::<u32>(), 0..64)) {
        let mut words = ModuleBuilder::new(32).build();
        words.extend(body);
        let _ = decode_words(&words);
    }
}
