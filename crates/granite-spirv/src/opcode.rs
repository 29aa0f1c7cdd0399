use core::fmt;

/// Mask selecting the opcode from an instruction's first word.
pub(crate) const OPCODE_MASK: u32 = 0x0000_FFFF;
/// Shift selecting the word count from an instruction's first word.
pub(crate) const WORD_COUNT_SHIFT: u32 = 16;

macro_rules! opcodes {
    ($($variant:ident = $value:literal,)*) => {
        /// SPIR-V instruction opcodes.
        ///
        /// Only a subset has handlers in the instruction table; the remaining named opcodes exist so
        /// that errors can report what the module actually asked for.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $($variant,)*
            Unknown(u16),
        }

        impl Opcode {
            pub fn from_raw(op: u16) -> Self {
                match op {
                    $($value => Self::$variant,)*
                    other => Self::Unknown(other),
                }
            }

            /// Returns the raw 16-bit opcode value.
            #[deny(unreachable_patterns)]
            pub fn raw(&self) -> u16 {
                match self {
                    $(Self::$variant => $value,)*
                    Self::Unknown(op) => *op,
                }
            }

            /// Returns the instruction's mnemonic without the `Op` prefix.
            pub fn name(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some(stringify!($variant)),)*
                    Self::Unknown(_) => None,
                }
            }
        }
    };
}

opcodes! {
    Nop = 0,
    Undef = 1,
    SourceContinued = 2,
    Source = 3,
    SourceExtension = 4,
    Name = 5,
    MemberName = 6,
    String = 7,
    Line = 8,
    Extension = 10,
    ExtInstImport = 11,
    ExtInst = 12,
    MemoryModel = 14,
    EntryPoint = 15,
    ExecutionMode = 16,
    Capability = 17,
    TypeVoid = 19,
    TypeBool = 20,
    TypeInt = 21,
    TypeFloat = 22,
    TypeVector = 23,
    TypeMatrix = 24,
    TypeImage = 25,
    TypeSampler = 26,
    TypeSampledImage = 27,
    TypeArray = 28,
    TypeRuntimeArray = 29,
    TypeStruct = 30,
    TypePointer = 32,
    TypeFunction = 33,
    ConstantTrue = 41,
    ConstantFalse = 42,
    Constant = 43,
    ConstantComposite = 44,
    Function = 54,
    FunctionParameter = 55,
    FunctionEnd = 56,
    FunctionCall = 57,
    Variable = 59,
    Load = 61,
    Store = 62,
    AccessChain = 65,
    Decorate = 71,
    MemberDecorate = 72,
    CompositeConstruct = 80,
    CompositeExtract = 81,
    Label = 248,
    Branch = 249,
    Return = 253,
    ReturnValue = 254,
    NoLine = 317,
    ModuleProcessed = 330,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Op{name} ({})", self.raw()),
            None => write!(f, "opcode {}", self.raw()),
        }
    }
}

/// Splits an instruction's first word into `(opcode, word_count)`.
pub(crate) fn split_instruction_word(word: u32) -> (Opcode, usize) {
    let opcode = Opcode::from_raw((word & OPCODE_MASK) as u16);
    let word_count = (word >> WORD_COUNT_SHIFT) as usize;
    (opcode, word_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_roundtrip_for_named_opcodes() {
        for raw in 0..=400u16 {
            let op = Opcode::from_raw(raw);
            assert_eq!(op.raw(), raw);
        }
    }

    #[test]
    fn splits_word_count_and_opcode() {
        let (op, len) = split_instruction_word((4 << 16) | 71);
        assert_eq!(op, Opcode::Decorate);
        assert_eq!(len, 4);
    }

    #[test]
    fn display_includes_mnemonic_when_known() {
        assert_eq!(Opcode::Function.to_string(), "OpFunction (54)");
        assert_eq!(Opcode::from_raw(9999).to_string(), "opcode 9999");
    }
}
