//! # 6502 Instruction Decoder
//!
//! Turns raw NMOS 6502 machine code into listing lines of the form
//! `OPCODE=6D[adc a] OPERAND=20 10`.
//!
//! ## Quick Start
//!
//! ```rust
//! use dis6502::decode;
//!
//! let program = [0x18, 0xA9, 0x05, 0x6D, 0x10, 0x20, 0x8D, 0x00, 0x10];
//!
//! let clc = decode(&program, 0).unwrap();
//! assert_eq!(clc.instruction.to_string(), "OPCODE=18[clc i] OPERAND=.. ..");
//!
//! let lda = decode(&program, clc.next_position).unwrap();
//! assert_eq!(lda.instruction.to_string(), "OPCODE=A9[lda #] OPERAND=.. 05");
//! assert_eq!(lda.next_position, 3);
//! ```
//!
//! ## Architecture
//!
//! - **Pure decoding**: [`decode`] looks at one position of a borrowed buffer
//!   and keeps no state between calls
//! - **Table-Driven Design**: every mnemonic and addressing mode lives in the
//!   static tables of [`opcodes`]
//! - **Explicit failure**: undefined opcodes and truncated operands come back
//!   as [`DecodeError`], never as a plausible-looking line
//!
//! ## Modules
//!
//! - `addressing` - Addressing mode enumeration, labels and operand sizes
//! - `opcodes` - Opcode tables and classification
//! - `disassembler` - Decoder, formatter and listing driver
//! - `wasm` - JavaScript bindings (`wasm` feature)

pub mod addressing;
pub mod disassembler;
pub mod opcodes;
pub mod wasm;

use thiserror::Error;

// Re-export public API
pub use addressing::AddressingMode;
pub use disassembler::decoder::{decode, Decoded};
pub use disassembler::formatter::{format_instruction, hex_dump};
pub use disassembler::{
    disassemble, DisassemblyOptions, Instruction, Listing, ListingLine, Operand, UndefinedPolicy,
};
pub use opcodes::{lookup, OpcodeMetadata};

/// Errors that can occur while decoding an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The byte does not encode any 6502 instruction.
    #[error("undefined opcode 0x{opcode:02X} at offset {position}")]
    UndefinedOpcode { opcode: u8, position: usize },

    /// The buffer ends inside the instruction's operand.
    #[error(
        "truncated instruction 0x{opcode:02X} at offset {position}: needs {needed} bytes, {available} available"
    )]
    Truncated {
        opcode: u8,
        position: usize,
        needed: usize,
        available: usize,
    },

    /// Decoding was requested past the end of the buffer.
    #[error("offset {position} is outside the {len}-byte buffer")]
    OutOfBounds { position: usize, len: usize },
}

impl DecodeError {
    /// Buffer offset the error refers to.
    pub fn position(&self) -> usize {
        match *self {
            DecodeError::UndefinedOpcode { position, .. }
            | DecodeError::Truncated { position, .. }
            | DecodeError::OutOfBounds { position, .. } => position,
        }
    }

    /// Where a listing may continue after this error, if anywhere.
    ///
    /// An undefined opcode occupies one byte. Nothing follows a truncated
    /// instruction.
    pub fn resume_position(&self) -> Option<usize> {
        match *self {
            DecodeError::UndefinedOpcode { position, .. } => Some(position + 1),
            DecodeError::Truncated { .. } | DecodeError::OutOfBounds { .. } => None,
        }
    }
}
