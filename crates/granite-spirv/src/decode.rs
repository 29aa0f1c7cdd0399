use tracing::{error, trace};

use crate::error::SpirvError;
use crate::header::{Header, SPIRV_MAGIC};
use crate::limits::{HEADER_WORDS, MAX_BYTECODE_BYTES, MAX_BYTECODE_WORDS};
use crate::opcode::split_instruction_word;
use crate::program::Program;
use crate::reader::Operands;
use crate::table;

/// Decodes a module from its serialized bytes.
///
/// The byte order is taken from the magic number: a module whose first word reads as the
/// byte-swapped magic is decoded as big-endian, anything else as little-endian.
pub fn decode_bytes(bytes: &[u8]) -> Result<Program, SpirvError> {
    if bytes.len() > MAX_BYTECODE_BYTES {
        return Err(SpirvError::format(format!(
            "module is {} bytes, maximum is {MAX_BYTECODE_BYTES}",
            bytes.len()
        )));
    }
    if bytes.len() % 4 != 0 {
        return Err(SpirvError::format(format!(
            "module length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    let big_endian = bytes
        .get(..4)
        .and_then(|b| <[u8; 4]>::try_from(b).ok())
        .is_some_and(|magic| u32::from_be_bytes(magic) == SPIRV_MAGIC);

    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| {
            let chunk = [chunk[0], chunk[1], chunk[2], chunk[3]];
            if big_endian {
                u32::from_be_bytes(chunk)
            } else {
                u32::from_le_bytes(chunk)
            }
        })
        .collect();

    decode_words(&words)
}

/// Decodes a module from native-order words.
pub fn decode_words(words: &[u32]) -> Result<Program, SpirvError> {
    if words.len() > MAX_BYTECODE_WORDS {
        return Err(SpirvError::format(format!(
            "module is {} words, maximum is {MAX_BYTECODE_WORDS}",
            words.len()
        )));
    }

    let header = Header::parse(words)?;
    let mut program = Program::new(header);

    let mut offset = HEADER_WORDS;
    while offset < words.len() {
        let (opcode, word_count) = split_instruction_word(words[offset]);
        if word_count == 0 {
            return Err(SpirvError::InvalidWordCount {
                word_offset: offset,
            });
        }
        let available = words.len() - offset;
        if word_count > available {
            return Err(SpirvError::Truncated {
                opcode,
                word_offset: offset,
                needed: word_count - 1,
                available: available - 1,
            });
        }

        let Some(handler) = table::lookup(opcode) else {
            error!(
                %opcode,
                word_offset = offset,
                "unimplemented opcode; decoded state:\n{}",
                program.dump()
            );
            return Err(SpirvError::UnimplementedOpcode {
                opcode,
                word_offset: offset,
            });
        };

        trace!(%opcode, word_offset = offset, word_count, "decode");
        let mut operands = Operands::new(opcode, offset, &words[offset + 1..offset + word_count]);
        handler(&mut program, &mut operands)?;
        operands.finish()?;

        offset += word_count;
    }

    Ok(program)
}
