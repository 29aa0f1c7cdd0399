use std::collections::BTreeMap;

use crate::error::SpirvError;
use crate::reader::Operands;

pub use crate::types::Decoration;

/// The recorded operand of a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationValue {
    /// The decoration carries no operands (e.g. `Block`, `Flat`).
    Present,
    /// The decoration's single literal or id operand (e.g. `Location`, `Binding`).
    Word(u32),
}

impl DecorationValue {
    pub fn word(&self) -> Option<u32> {
        match self {
            Self::Present => None,
            Self::Word(word) => Some(*word),
        }
    }
}

/// Decorations applied to one id or struct member. Re-applying a kind overwrites the previous
/// record.
pub type Decorations = BTreeMap<Decoration, DecorationValue>;

/// Operand layout of a decoration kind.
enum DecorationOperands {
    None,
    OneWord,
    /// Layouts carrying strings; not parsed yet.
    Unimplemented,
}

fn operand_layout(decoration: Decoration) -> DecorationOperands {
    use Decoration::*;
    match decoration {
        SpecId | ArrayStride | MatrixStride | BuiltIn | UniformId | Stream | Location
        | Component | Index | Binding | DescriptorSet | Offset | XfbBuffer | XfbStride
        | FuncParamAttr | FpRoundingMode | FpFastMathMode | InputAttachmentIndex | Alignment
        | MaxByteOffset | AlignmentId | MaxByteOffsetId | SecondaryViewportRelativeNv
        | CounterBuffer => DecorationOperands::OneWord,
        // Linkage takes a name string plus a linkage type; the semantic decorations take a string.
        LinkageAttributes | UserSemantic | UserTypeGoogle => DecorationOperands::Unimplemented,
        _ => DecorationOperands::None,
    }
}

/// Parses the operands following a decoration kind and records them in `into`.
pub(crate) fn apply_decoration(
    into: &mut Decorations,
    decoration: Decoration,
    ops: &mut Operands<'_>,
) -> Result<(), SpirvError> {
    let value = match operand_layout(decoration) {
        DecorationOperands::None => DecorationValue::Present,
        DecorationOperands::OneWord => DecorationValue::Word(ops.word()?),
        DecorationOperands::Unimplemented => {
            return Err(SpirvError::UnimplementedDecoration {
                decoration,
                word_offset: ops.word_offset(),
            });
        }
    };
    into.insert(decoration, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::Opcode;

    #[test]
    fn one_word_decoration_records_its_operand() {
        let mut decorations = Decorations::new();
        let words = [3u32];
        let mut ops = Operands::new(Opcode::Decorate, 0, &words);
        apply_decoration(&mut decorations, Decoration::Location, &mut ops).unwrap();
        assert_eq!(decorations[&Decoration::Location], DecorationValue::Word(3));
        assert_eq!(decorations[&Decoration::Location].word(), Some(3));
    }

    #[test]
    fn flag_decoration_is_presence_only() {
        let mut decorations = Decorations::new();
        let mut ops = Operands::new(Opcode::Decorate, 0, &[]);
        apply_decoration(&mut decorations, Decoration::Block, &mut ops).unwrap();
        assert_eq!(decorations[&Decoration::Block], DecorationValue::Present);
    }

    #[test]
    fn string_decorations_are_unimplemented() {
        let mut decorations = Decorations::new();
        let mut ops = Operands::new(Opcode::Decorate, 12, &[0]);
        let err = apply_decoration(&mut decorations, Decoration::UserSemantic, &mut ops)
            .unwrap_err();
        assert_eq!(
            err,
            SpirvError::UnimplementedDecoration {
                decoration: Decoration::UserSemantic,
                word_offset: 12,
            }
        );
        assert!(decorations.is_empty());
    }

    #[test]
    fn missing_word_operand_is_truncation() {
        let mut decorations = Decorations::new();
        let mut ops = Operands::new(Opcode::Decorate, 0, &[]);
        let err = apply_decoration(&mut decorations, Decoration::Binding, &mut ops).unwrap_err();
        assert!(matches!(err, SpirvError::Truncated { .. }));
    }
}
