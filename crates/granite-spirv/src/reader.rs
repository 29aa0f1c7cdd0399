use crate::error::SpirvError;
use crate::opcode::Opcode;
use crate::program::Id;

/// Cursor over one instruction's operand words (everything after the opcode word).
///
/// Every read is checked against the instruction's declared word count, so a handler can never
/// consume words belonging to the next instruction.
#[derive(Debug, Clone)]
pub struct Operands<'a> {
    opcode: Opcode,
    word_offset: usize,
    words: &'a [u32],
    pos: usize,
}

impl<'a> Operands<'a> {
    /// `word_offset` is the position of the instruction's opcode word in the module, used only for
    /// error reporting.
    pub fn new(opcode: Opcode, word_offset: usize, words: &'a [u32]) -> Self {
        Self {
            opcode,
            word_offset,
            words,
            pos: 0,
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn word_offset(&self) -> usize {
        self.word_offset
    }

    /// Number of operand words consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn word(&mut self) -> Result<u32, SpirvError> {
        let word = self
            .words
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.truncated(1))?;
        self.pos += 1;
        Ok(word)
    }

    pub fn id(&mut self) -> Result<Id, SpirvError> {
        self.word()
    }

    /// Consumes every remaining word.
    pub fn rest(&mut self) -> &'a [u32] {
        let rest = self.words.get(self.pos..).unwrap_or(&[]);
        self.pos = self.words.len();
        rest
    }

    /// Reads a nul-terminated UTF-8 literal string.
    ///
    /// Strings are packed little-end first into words and padded with zero bytes to a word
    /// boundary. A string of `L` bytes always occupies `(L + 1).div_ceil(4)` words, since the
    /// terminator is mandatory even when `L` is a multiple of 4.
    pub fn string(&mut self) -> Result<String, SpirvError> {
        let mut bytes = Vec::new();
        let mut consumed = 0usize;
        let mut terminated = false;

        'words: for word in self.words.get(self.pos..).unwrap_or(&[]) {
            consumed += 1;
            for byte in word.to_le_bytes() {
                if byte == 0 {
                    terminated = true;
                    break 'words;
                }
                bytes.push(byte);
            }
        }

        if !terminated {
            return Err(self.invalid("literal string is not nul-terminated"));
        }

        debug_assert_eq!(consumed, (bytes.len() + 1).div_ceil(4));
        self.pos += consumed;

        String::from_utf8(bytes).map_err(|_| self.invalid("literal string is not valid UTF-8"))
    }

    /// Fails if the handler left operand words unread.
    pub fn finish(&self) -> Result<(), SpirvError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(self.invalid(format!("{extra} unexpected trailing operand word(s)"))),
        }
    }

    pub(crate) fn truncated(&self, needed: usize) -> SpirvError {
        SpirvError::Truncated {
            opcode: self.opcode,
            word_offset: self.word_offset,
            needed,
            available: self.remaining(),
        }
    }

    pub(crate) fn invalid(&self, message: impl Into<String>) -> SpirvError {
        SpirvError::InvalidOperand {
            opcode: self.opcode,
            word_offset: self.word_offset,
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(&self, message: impl Into<String>) -> SpirvError {
        SpirvError::Unsupported {
            opcode: self.opcode,
            word_offset: self.word_offset,
            message: message.into(),
        }
    }
}
