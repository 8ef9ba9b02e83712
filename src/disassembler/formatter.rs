//! Formatting functions for disassembled instructions
//!
//! A listing line has the shape
//!
//! ```text
//! OPCODE=<hex>[<mnemonic> <mode>] OPERAND=<high> <low>
//! ```
//!
//! Operand bytes are shown high byte first, so a 16-bit operand appears in
//! the reverse of its little-endian storage order. A byte position the
//! instruction doesn't use is shown as `..`.

use crate::disassembler::Instruction;

/// Placeholder for an operand byte the instruction does not have.
pub const ABSENT_BYTE: &str = "..";

/// Mnemonic shown on placeholder lines for undefined opcodes.
pub const UNDEFINED_MNEMONIC: &str = "???";

fn operand_byte(byte: Option<u8>) -> String {
    match byte {
        Some(b) => format!("{:02X}", b),
        None => ABSENT_BYTE.to_string(),
    }
}

/// Format a single instruction as a listing line
///
/// # Examples
///
/// ```
/// use dis6502::{format_instruction, AddressingMode, Instruction, Operand};
///
/// let instr = Instruction {
///     opcode: 0xA9,
///     mnemonic: "lda",
///     addressing_mode: AddressingMode::Immediate,
///     operand: Operand::Byte(0x05),
/// };
/// assert_eq!(format_instruction(&instr), "OPCODE=A9[lda #] OPERAND=.. 05");
/// ```
pub fn format_instruction(instr: &Instruction) -> String {
    format!(
        "OPCODE={:02X}[{} {}] OPERAND={} {}",
        instr.opcode,
        instr.mnemonic,
        instr.addressing_mode.label(),
        operand_byte(instr.operand.high()),
        operand_byte(instr.operand.low()),
    )
}

/// Format the placeholder line emitted for an undefined opcode.
pub fn format_undefined(opcode: u8) -> String {
    format!(
        "OPCODE={:02X}[{}] OPERAND={} {}",
        opcode, UNDEFINED_MNEMONIC, ABSENT_BYTE, ABSENT_BYTE
    )
}

/// Space-separated uppercase hex of `bytes`.
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;
    use crate::disassembler::Operand;

    #[test]
    fn test_format_immediate() {
        let instr = Instruction {
            opcode: 0xA9,
            mnemonic: "lda",
            addressing_mode: AddressingMode::Immediate,
            operand: Operand::Byte(0xFF),
        };

        assert_eq!(format_instruction(&instr), "OPCODE=A9[lda #] OPERAND=.. FF");
    }

    #[test]
    fn test_format_absolute() {
        let instr = Instruction {
            opcode: 0xAD,
            mnemonic: "lda",
            addressing_mode: AddressingMode::Absolute,
            operand: Operand::Word(0x2010),
        };

        assert_eq!(format_instruction(&instr), "OPCODE=AD[lda a] OPERAND=20 10");
    }

    #[test]
    fn test_format_accumulator() {
        let instr = Instruction {
            opcode: 0x0A,
            mnemonic: "asl",
            addressing_mode: AddressingMode::Accumulator,
            operand: Operand::None,
        };

        assert_eq!(format_instruction(&instr), "OPCODE=0A[asl A] OPERAND=.. ..");
    }

    #[test]
    fn test_format_undefined() {
        assert_eq!(format_undefined(0x12), "OPCODE=12[???] OPERAND=.. ..");
    }

    #[test]
    fn test_hex_dump() {
        assert_eq!(hex_dump(&[0x18, 0xA9, 0x05]), "18 A9 05");
        assert_eq!(hex_dump(&[]), "");
    }
}
