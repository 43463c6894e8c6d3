use std::io;

use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// Failures while getting a ROM into memory; nothing has executed yet.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read ROM")]
    Io(#[from] io::Error),

    #[error("ROM is too large ({size} bytes), at most {max} bytes fit", max = MAX_ROM_SIZE)]
    TooLarge { size: usize },
}

/// Fatal faults raised by a single instruction.
///
/// Each carries the offending opcode and the address it was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("return ({opcode:#06X}) at {pc:#05X} with an empty call stack")]
    StackUnderflow { opcode: u16, pc: u16 },

    #[error("opcode {opcode:#06X} at {pc:#05X} addresses flag register {register:X}; only 0-7 exist")]
    FlagRegisterOutOfRange { opcode: u16, pc: u16, register: usize },
}

impl DecodeError {
    pub fn opcode(&self) -> u16 {
        match *self {
            DecodeError::UnknownOpcode { opcode, .. }
            | DecodeError::StackUnderflow { opcode, .. }
            | DecodeError::FlagRegisterOutOfRange { opcode, .. } => opcode,
        }
    }

    pub fn pc(&self) -> u16 {
        match *self {
            DecodeError::UnknownOpcode { pc, .. }
            | DecodeError::StackUnderflow { pc, .. }
            | DecodeError::FlagRegisterOutOfRange { pc, .. } => pc,
        }
    }
}

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn test_decode_error_reports_opcode_and_pc() {
        let err = DecodeError::UnknownOpcode {
            opcode: 0x5121,
            pc: 0x204,
        };
        assert_eq!(err.opcode(), 0x5121);
        assert_eq!(err.pc(), 0x204);
        assert_eq!(err.to_string(), "unknown opcode 0x5121 at 0x204");
    }

    #[test]
    fn test_too_large_message() {
        let err = LoadError::TooLarge { size: 4000 };
        assert_eq!(
            err.to_string(),
            "ROM is too large (4000 bytes), at most 3584 bytes fit"
        );
    }
}
