//! Instruction decoder for the 6502 disassembler

use crate::disassembler::{Instruction, Operand};
use crate::opcodes;
use crate::DecodeError;

/// A decoded instruction together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub instruction: Instruction,

    /// Buffer index of the opcode byte.
    pub position: usize,

    /// Buffer index of the following instruction.
    pub next_position: usize,
}

/// Decode the instruction starting at `position` in `bytes`.
///
/// Looks at the opcode byte and at most two operand bytes after it. Nothing
/// outside `bytes` is ever read, and no state is kept between calls.
///
/// # Errors
///
/// - [`DecodeError::OutOfBounds`] if `position` is not inside `bytes`
/// - [`DecodeError::UndefinedOpcode`] if the byte encodes no instruction
/// - [`DecodeError::Truncated`] if the operand runs past the end of `bytes`
///
/// # Examples
///
/// ```
/// use dis6502::decode;
///
/// let bytes = [0x6D, 0x10, 0x20];
/// let decoded = decode(&bytes, 0).unwrap();
/// assert_eq!(decoded.instruction.to_string(), "OPCODE=6D[adc a] OPERAND=20 10");
/// assert_eq!(decoded.next_position, 3);
/// ```
pub fn decode(bytes: &[u8], position: usize) -> Result<Decoded, DecodeError> {
    let opcode = *bytes.get(position).ok_or(DecodeError::OutOfBounds {
        position,
        len: bytes.len(),
    })?;

    let metadata =
        opcodes::lookup(opcode).ok_or(DecodeError::UndefinedOpcode { opcode, position })?;

    let size = metadata.size_bytes() as usize;
    let operand_bytes = bytes
        .get(position + 1..position + size)
        .ok_or(DecodeError::Truncated {
            opcode,
            position,
            needed: size,
            available: bytes.len() - position,
        })?;

    Ok(Decoded {
        instruction: Instruction {
            opcode,
            mnemonic: metadata.mnemonic,
            addressing_mode: metadata.addressing_mode,
            operand: Operand::from_le_slice(operand_bytes),
        },
        position,
        next_position: position + size,
    })
}
