use core::fmt;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::decoration::Decorations;
use crate::error::SpirvError;
use crate::header::Header;
use crate::opcode::Opcode;
use crate::types::{
    AddressingModel, Capability, ExecutionMode, ExecutionModel, MemoryModel, SourceLanguage,
    StorageClass,
};

/// A SPIR-V result id. Valid ids satisfy `0 < id < id_bound`.
pub type Id = u32;

/// A decoded SPIR-V module: module-level metadata plus one [`Variable`] slot per id.
#[derive(Debug, Clone)]
pub struct Program {
    pub header: Header,
    /// Declared capabilities, in declaration order.
    pub capabilities: Vec<Capability>,
    /// `None` until `OpMemoryModel` has been decoded.
    pub addressing_model: Option<AddressingModel>,
    pub memory_model: Option<MemoryModel>,
    /// Names declared by `OpExtension`.
    pub extensions: Vec<String>,
    pub source: Option<SourceInfo>,
    /// Names declared by `OpSourceExtension`.
    pub source_extensions: Vec<String>,
    variables: Vec<Variable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub language: SourceLanguage,
    pub version: u32,
    /// Id of the `OpString` naming the source file, if any.
    pub file: Option<Id>,
}

/// One id slot of the program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variable {
    /// Debug name from `OpName`.
    pub name: Option<String>,
    pub decorations: Decorations,
    pub kind: VariableKind,
    /// Per-member names and decorations, keyed by member index. Only meaningful for aggregates.
    pub members: BTreeMap<u32, Member>,
}

impl Variable {
    /// Ids this variable refers to in order: an entry point's interface, a function type's
    /// parameter types or a struct's member types.
    pub fn interface(&self) -> &[Id] {
        match &self.kind {
            VariableKind::EntryPoint(entry) => &entry.interface,
            VariableKind::Type(TypeInfo::Function { parameters, .. }) => parameters,
            VariableKind::Type(TypeInfo::Struct { members }) => members,
            _ => &[],
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self.kind, VariableKind::None)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum VariableKind {
    /// No defining instruction has been decoded for this id yet.
    #[default]
    None,
    Type(TypeInfo),
    Constant(Constant),
    /// An extended instruction set imported by `OpExtInstImport`.
    Extension { name: String },
    EntryPoint(EntryPoint),
}

impl VariableKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Type(_) => "type",
            Self::Constant(_) => "constant",
            Self::Extension { .. } => "extension",
            Self::EntryPoint(_) => "entry point",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInfo {
    Void,
    Bool,
    SInt { width: u32 },
    UInt { width: u32 },
    Float { width: u32 },
    Vector { component: Id, count: u32 },
    Matrix { column: Id, count: u32 },
    Array { element: Id, length: u32 },
    Struct { members: Vec<Id> },
    Pointer { storage: StorageClass, pointee: Id },
    Function { return_type: Id, parameters: Vec<Id> },
}

impl TypeInfo {
    /// Bit width of scalar numeric types.
    pub fn scalar_width(&self) -> Option<u32> {
        match self {
            Self::SInt { width } | Self::UInt { width } | Self::Float { width } => Some(*width),
            _ => None,
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Bool => f.write_str("bool"),
            Self::SInt { width } => write!(f, "i{width}"),
            Self::UInt { width } => write!(f, "u{width}"),
            Self::Float { width } => write!(f, "f{width}"),
            Self::Vector { component, count } => write!(f, "vec{count}<%{component}>"),
            Self::Matrix { column, count } => write!(f, "mat{count}<%{column}>"),
            Self::Array { element, length } => write!(f, "[%{element}; {length}]"),
            Self::Struct { members } => {
                f.write_str("struct {")?;
                write_ids(f, members)?;
                f.write_str("}")
            }
            Self::Pointer { storage, pointee } => write!(f, "ptr<{storage}, %{pointee}>"),
            Self::Function {
                return_type,
                parameters,
            } => {
                f.write_str("fn(")?;
                write_ids(f, parameters)?;
                write!(f, ") -> %{return_type}")
            }
        }
    }
}

fn write_ids(f: &mut impl fmt::Write, ids: &[Id]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "%{id}")?;
    }
    Ok(())
}

/// A scalar constant. `ty` names its `OpTypeInt`/`OpTypeFloat`, whose scalar kind selects the
/// active [`ConstantValue`] variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    pub ty: Id,
    pub value: ConstantValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    UInt(u32),
    SInt(i32),
    Float(f32),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}u"),
            Self::SInt(v) => write!(f, "{v}i"),
            Self::Float(v) => write!(f, "{v:?}f"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub execution_model: ExecutionModel,
    pub name: String,
    /// Global variables the entry point statically uses.
    pub interface: Vec<Id>,
    pub execution_modes: Vec<ExecutionModeDecl>,
}

/// An `OpExecutionMode` attached to an entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionModeDecl {
    pub mode: ExecutionMode,
    /// Literal operands, e.g. the three sizes of `LocalSize`.
    pub operands: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    pub name: Option<String>,
    pub decorations: Decorations,
}

impl Program {
    /// Creates an empty program with one slot per id below the header's bound.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            capabilities: Vec::new(),
            addressing_model: None,
            memory_model: None,
            extensions: Vec::new(),
            source: None,
            source_extensions: Vec::new(),
            variables: vec![Variable::default(); header.id_bound as usize],
        }
    }

    pub fn id_bound(&self) -> u32 {
        self.header.id_bound
    }

    /// All slots, indexed by id. Slot 0 is reserved and never defined.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn check_id(&self, id: Id) -> Result<usize, SpirvError> {
        if id == 0 || id >= self.header.id_bound {
            return Err(SpirvError::IdOutOfRange {
                id,
                bound: self.header.id_bound,
            });
        }
        Ok(id as usize)
    }

    pub fn variable(&self, id: Id) -> Result<&Variable, SpirvError> {
        let index = self.check_id(id)?;
        Ok(&self.variables[index])
    }

    pub fn variable_mut(&mut self, id: Id) -> Result<&mut Variable, SpirvError> {
        let index = self.check_id(id)?;
        Ok(&mut self.variables[index])
    }

    /// Assigns the kind of `id`. An id is defined at most once; names and decorations may have
    /// been recorded earlier and are kept.
    pub(crate) fn define(
        &mut self,
        id: Id,
        opcode: Opcode,
        kind: VariableKind,
    ) -> Result<(), SpirvError> {
        let variable = self.variable_mut(id)?;
        if variable.is_defined() {
            return Err(SpirvError::Redefinition {
                id,
                opcode,
                existing: variable.kind.kind_name(),
                requested: kind.kind_name(),
            });
        }
        variable.kind = kind;
        Ok(())
    }

    /// Iterates `(id, entry point)` pairs in id order.
    pub fn entry_points(&self) -> impl Iterator<Item = (Id, &EntryPoint)> + '_ {
        self.variables
            .iter()
            .enumerate()
            .filter_map(|(id, var)| match &var.kind {
                VariableKind::EntryPoint(entry) => Some((id as Id, entry)),
                _ => None,
            })
    }

    pub fn entry_point(&self, name: &str) -> Option<(Id, &EntryPoint)> {
        self.entry_points().find(|(_, entry)| entry.name == name)
    }

    /// Resolves the type of `id`: a type id resolves to itself, a constant to its result type.
    pub fn type_of(&self, id: Id) -> Option<&TypeInfo> {
        match &self.variable(id).ok()?.kind {
            VariableKind::Type(ty) => Some(ty),
            VariableKind::Constant(constant) => match &self.variable(constant.ty).ok()?.kind {
                VariableKind::Type(ty) => Some(ty),
                _ => None,
            },
            _ => None,
        }
    }

    /// Renders module metadata and every defined, named or decorated id.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dump(&mut out);
        out
    }

    fn write_dump(&self, out: &mut String) -> fmt::Result {
        let header = &self.header;
        writeln!(
            out,
            "SPIR-V {}.{}, generator {}/{}, id bound {}",
            header.version_major(),
            header.version_minor(),
            header.generator_tool(),
            header.generator_version(),
            header.id_bound
        )?;
        if let Some(source) = &self.source {
            writeln!(out, "source: {} {}", source.language, source.version)?;
        }
        for ext in &self.source_extensions {
            writeln!(out, "source extension: {ext}")?;
        }
        for ext in &self.extensions {
            writeln!(out, "extension: {ext}")?;
        }
        for cap in &self.capabilities {
            writeln!(out, "capability: {cap}")?;
        }
        if let (Some(addressing), Some(memory)) = (self.addressing_model, self.memory_model) {
            writeln!(out, "memory model: {addressing}, {memory}")?;
        }

        for (id, var) in self.variables.iter().enumerate() {
            if !var.is_defined() && var.name.is_none() && var.decorations.is_empty() {
                continue;
            }
            write!(out, "%{id}")?;
            if let Some(name) = &var.name {
                write!(out, " \"{name}\"")?;
            }
            match &var.kind {
                VariableKind::None => writeln!(out, " = <undefined>")?,
                VariableKind::Type(ty) => writeln!(out, " = type {ty}")?,
                VariableKind::Constant(c) => writeln!(out, " = constant %{} {}", c.ty, c.value)?,
                VariableKind::Extension { name } => writeln!(out, " = import \"{name}\"")?,
                VariableKind::EntryPoint(entry) => {
                    write!(
                        out,
                        " = entry point {} \"{}\" [",
                        entry.execution_model, entry.name
                    )?;
                    write_ids(out, &entry.interface)?;
                    writeln!(out, "]")?;
                    for mode in &entry.execution_modes {
                        writeln!(out, "    mode {} {:?}", mode.mode, mode.operands)?;
                    }
                }
            }
            write_decorations(out, "    ", &var.decorations)?;
            for (index, member) in &var.members {
                write!(out, "    member {index}")?;
                if let Some(name) = &member.name {
                    write!(out, " \"{name}\"")?;
                }
                writeln!(out)?;
                write_decorations(out, "        ", &member.decorations)?;
            }
        }
        Ok(())
    }
}

fn write_decorations(out: &mut String, indent: &str, decorations: &Decorations) -> fmt::Result {
    for (decoration, value) in decorations {
        match value.word() {
            Some(word) => writeln!(out, "{indent}{decoration} = {word}")?,
            None => writeln!(out, "{indent}{decoration}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::{Decoration, DecorationValue};
    use crate::header::SPIRV_MAGIC;

    fn program(id_bound: u32) -> Program {
        Program::new(Header::parse(&[SPIRV_MAGIC, 0x0001_0000, 0, id_bound, 0]).unwrap())
    }

    #[test]
    fn slots_are_sized_from_the_id_bound() {
        let program = program(9);
        assert_eq!(program.variables().len(), 9);
        assert!(program.variables().iter().all(|v| !v.is_defined()));
    }

    #[test]
    fn id_zero_and_bound_are_rejected() {
        let mut program = program(4);
        assert_eq!(
            program.variable(0).unwrap_err(),
            SpirvError::IdOutOfRange { id: 0, bound: 4 }
        );
        assert!(program.variable_mut(4).is_err());
        assert!(program.variable(3).is_ok());
    }

    #[test]
    fn redefinition_keeps_the_first_kind() {
        let mut program = program(4);
        program
            .define(1, Opcode::TypeBool, VariableKind::Type(TypeInfo::Bool))
            .unwrap();
        let err = program
            .define(
                1,
                Opcode::ExtInstImport,
                VariableKind::Extension {
                    name: "GLSL.std.450".into(),
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            SpirvError::Redefinition {
                id: 1,
                opcode: Opcode::ExtInstImport,
                existing: "type",
                requested: "extension",
            }
        );
        assert_eq!(program.type_of(1), Some(&TypeInfo::Bool));
    }

    #[test]
    fn type_of_resolves_constants_through_their_type() {
        let mut program = program(4);
        program
            .define(1, Opcode::TypeFloat, VariableKind::Type(TypeInfo::Float { width: 32 }))
            .unwrap();
        program
            .define(
                2,
                Opcode::Constant,
                VariableKind::Constant(Constant {
                    ty: 1,
                    value: ConstantValue::Float(0.5),
                }),
            )
            .unwrap();
        assert_eq!(program.type_of(2), Some(&TypeInfo::Float { width: 32 }));
        assert_eq!(program.type_of(3), None);
    }

    #[test]
    fn dump_lists_names_and_decorations() {
        let mut program = program(3);
        program
            .define(1, Opcode::TypeInt, VariableKind::Type(TypeInfo::UInt { width: 32 }))
            .unwrap();
        let var = program.variable_mut(1).unwrap();
        var.name = Some("uint".into());
        var.decorations
            .insert(Decoration::Location, DecorationValue::Word(2));

        let dump = program.dump();
        assert!(dump.contains("%1 \"uint\" = type u32"), "{dump}");
        assert!(dump.contains("Location = 2"), "{dump}");
        assert!(!dump.contains("%2"), "{dump}");
    }
}
