use crate::error::SpirvError;
use crate::limits::{HEADER_WORDS, MAX_ID_BOUND};

/// The SPIR-V magic number, as the first word of every module.
pub const SPIRV_MAGIC: u32 = 0x0723_0203;

/// The fixed five-word header at the start of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Always [`SPIRV_MAGIC`] once parsed (after any byte-order correction).
    pub magic: u32,
    /// Packed version word: `0x00MMmm00`.
    pub version: u32,
    /// Packed generator word: tool id in the high 16 bits, tool version in the low 16 bits.
    pub generator: u32,
    /// All ids in the module satisfy `0 < id < id_bound`.
    pub id_bound: u32,
    pub reserved: u32,
}

impl Header {
    /// Parses and validates the header from the first five words of `words`.
    pub fn parse(words: &[u32]) -> Result<Self, SpirvError> {
        let Some(raw) = words.get(..HEADER_WORDS) else {
            return Err(SpirvError::format(format!(
                "need at least {HEADER_WORDS} header words, got {}",
                words.len()
            )));
        };

        let header = Header {
            magic: raw[0],
            version: raw[1],
            generator: raw[2],
            id_bound: raw[3],
            reserved: raw[4],
        };

        if header.magic != SPIRV_MAGIC {
            return Err(SpirvError::format(format!(
                "bad magic {:#010x}, expected {SPIRV_MAGIC:#010x}",
                header.magic
            )));
        }
        if header.id_bound == 0 {
            return Err(SpirvError::format("id bound is 0"));
        }
        if header.id_bound > MAX_ID_BOUND {
            return Err(SpirvError::format(format!(
                "id bound {} exceeds maximum {MAX_ID_BOUND}",
                header.id_bound
            )));
        }

        Ok(header)
    }

    pub fn version_major(&self) -> u8 {
        (self.version >> 16) as u8
    }

    pub fn version_minor(&self) -> u8 {
        (self.version >> 8) as u8
    }

    /// Registered generator tool id (e.g. 8 for glslang's Khronos reference front end).
    pub fn generator_tool(&self) -> u16 {
        (self.generator >> 16) as u16
    }

    pub fn generator_version(&self) -> u16 {
        (self.generator & 0xFFFF) as u16
    }
}
