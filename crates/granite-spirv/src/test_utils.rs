use crate::decoration::Decoration;
use crate::header::SPIRV_MAGIC;
use crate::opcode::{Opcode, WORD_COUNT_SHIFT};
use crate::program::Id;
use crate::types::{AddressingModel, Capability, ExecutionModel, MemoryModel};

/// Packs `s` as a SPIR-V literal string: UTF-8 bytes, a nul terminator, and zero padding up to a
/// word boundary.
pub fn pack_string(s: &str) -> Vec<u32> {
    let mut bytes = s.as_bytes().to_vec();
    bytes.push(0);
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Builds a synthetic SPIR-V module word by word.
///
/// Instructions are emitted in call order with no validation, so tests can produce deliberately
/// malformed modules as easily as well-formed ones.
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    version: u32,
    generator: u32,
    id_bound: u32,
    body: Vec<u32>,
}

impl ModuleBuilder {
    pub fn new(id_bound: u32) -> Self {
        Self {
            version: 0x0001_0000,
            generator: 0,
            id_bound,
            body: Vec::new(),
        }
    }

    pub fn version(&mut self, major: u8, minor: u8) -> &mut Self {
        self.version = (u32::from(major) << 16) | (u32::from(minor) << 8);
        self
    }

    pub fn generator(&mut self, tool: u16, version: u16) -> &mut Self {
        self.generator = (u32::from(tool) << 16) | u32::from(version);
        self
    }

    /// Emits one instruction; the word count is derived from `operands`.
    pub fn instruction(&mut self, opcode: Opcode, operands: &[u32]) -> &mut Self {
        let word_count = operands.len() + 1;
        assert!(word_count <= 0xFFFF, "instruction too long for a SPIR-V word count");
        self.body
            .push(((word_count as u32) << WORD_COUNT_SHIFT) | u32::from(opcode.raw()));
        self.body.extend_from_slice(operands);
        self
    }

    /// Emits an instruction whose operands are `before`, a packed string, then `after`.
    pub fn instruction_with_string(
        &mut self,
        opcode: Opcode,
        before: &[u32],
        s: &str,
        after: &[u32],
    ) -> &mut Self {
        let mut operands = before.to_vec();
        operands.extend(pack_string(s));
        operands.extend_from_slice(after);
        self.instruction(opcode, &operands)
    }

    pub fn capability(&mut self, capability: Capability) -> &mut Self {
        self.instruction(Opcode::Capability, &[capability.raw()])
    }

    pub fn extension(&mut self, name: &str) -> &mut Self {
        self.instruction_with_string(Opcode::Extension, &[], name, &[])
    }

    pub fn ext_inst_import(&mut self, id: Id, name: &str) -> &mut Self {
        self.instruction_with_string(Opcode::ExtInstImport, &[id], name, &[])
    }

    pub fn memory_model(&mut self, addressing: AddressingModel, memory: MemoryModel) -> &mut Self {
        self.instruction(Opcode::MemoryModel, &[addressing.raw(), memory.raw()])
    }

    pub fn entry_point(
        &mut self,
        model: ExecutionModel,
        id: Id,
        name: &str,
        interface: &[Id],
    ) -> &mut Self {
        self.instruction_with_string(Opcode::EntryPoint, &[model.raw(), id], name, interface)
    }

    pub fn name(&mut self, id: Id, name: &str) -> &mut Self {
        self.instruction_with_string(Opcode::Name, &[id], name, &[])
    }

    pub fn member_name(&mut self, id: Id, member: u32, name: &str) -> &mut Self {
        self.instruction_with_string(Opcode::MemberName, &[id, member], name, &[])
    }

    pub fn decorate(&mut self, id: Id, decoration: Decoration, operands: &[u32]) -> &mut Self {
        let mut words = vec![id, decoration.raw()];
        words.extend_from_slice(operands);
        self.instruction(Opcode::Decorate, &words)
    }

    pub fn member_decorate(
        &mut self,
        id: Id,
        member: u32,
        decoration: Decoration,
        operands: &[u32],
    ) -> &mut Self {
        let mut words = vec![id, member, decoration.raw()];
        words.extend_from_slice(operands);
        self.instruction(Opcode::MemberDecorate, &words)
    }

    pub fn type_void(&mut self, id: Id) -> &mut Self {
        self.instruction(Opcode::TypeVoid, &[id])
    }

    pub fn type_bool(&mut self, id: Id) -> &mut Self {
        self.instruction(Opcode::TypeBool, &[id])
    }

    pub fn type_int(&mut self, id: Id, width: u32, signed: bool) -> &mut Self {
        self.instruction(Opcode::TypeInt, &[id, width, u32::from(signed)])
    }

    pub fn type_float(&mut self, id: Id, width: u32) -> &mut Self {
        self.instruction(Opcode::TypeFloat, &[id, width])
    }

    pub fn type_vector(&mut self, id: Id, component: Id, count: u32) -> &mut Self {
        self.instruction(Opcode::TypeVector, &[id, component, count])
    }

    pub fn type_array(&mut self, id: Id, element: Id, length: Id) -> &mut Self {
        self.instruction(Opcode::TypeArray, &[id, element, length])
    }

    pub fn type_struct(&mut self, id: Id, members: &[Id]) -> &mut Self {
        let mut words = vec![id];
        words.extend_from_slice(members);
        self.instruction(Opcode::TypeStruct, &words)
    }

    pub fn type_function(&mut self, id: Id, return_type: Id, parameters: &[Id]) -> &mut Self {
        let mut words = vec![id, return_type];
        words.extend_from_slice(parameters);
        self.instruction(Opcode::TypeFunction, &words)
    }

    pub fn constant_u32(&mut self, ty: Id, id: Id, value: u32) -> &mut Self {
        self.instruction(Opcode::Constant, &[ty, id, value])
    }

    pub fn constant_f32(&mut self, ty: Id, id: Id, value: f32) -> &mut Self {
        self.instruction(Opcode::Constant, &[ty, id, value.to_bits()])
    }

    /// Returns the module as words: header followed by every emitted instruction.
    pub fn build(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(5 + self.body.len());
        words.extend_from_slice(&[SPIRV_MAGIC, self.version, self.generator, self.id_bound, 0]);
        words.extend_from_slice(&self.body);
        words
    }

    pub fn build_bytes(&self) -> Vec<u8> {
        self.build().iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn build_bytes_be(&self) -> Vec<u8> {
        self.build().iter().flat_map(|w| w.to_be_bytes()).collect()
    }
}
