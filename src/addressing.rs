//! # Addressing Modes
//!
//! This module defines the 13 addressing modes the decoder can report, along
//! with the short display label used in listings and the number of operand
//! bytes that follow the opcode.

use std::fmt;

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how many operand bytes follow an opcode and
/// how the listing labels the instruction.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Operates directly on the accumulator register. Label `A`.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction. Label `#`.
    Immediate,

    /// Full 16-bit address. Label `a`.
    Absolute,

    /// 8-bit address in zero page (0x00-0xFF). Label `zp`.
    ZeroPage,

    /// No operand, operation implied by instruction. Label `i`.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Signed 8-bit offset for branch instructions. Label `r`.
    Relative,

    /// Indirect jump through 16-bit pointer. Label `(a)`.
    ///
    /// Only used by JMP instruction.
    Indirect,

    /// 16-bit address indexed by X register. Label `a,x`.
    AbsoluteX,

    /// 16-bit address indexed by Y register. Label `a,y`.
    AbsoluteY,

    /// Zero page address indexed by X register. Label `zp,x`.
    ZeroPageX,

    /// Zero page address indexed by Y register. Label `zp,y`.
    ///
    /// Only reachable through the STX/LDX field reuse.
    ZeroPageY,

    /// Indexed indirect: (ZP + X) then dereference. Label `(zp,x)`.
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y. Label `(zp),y`.
    IndirectY,
}

impl AddressingMode {
    /// Every addressing mode, in display-table order.
    pub const ALL: [AddressingMode; 13] = [
        AddressingMode::Accumulator,
        AddressingMode::Immediate,
        AddressingMode::Absolute,
        AddressingMode::ZeroPage,
        AddressingMode::Implicit,
        AddressingMode::Relative,
        AddressingMode::Indirect,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::IndirectX,
        AddressingMode::IndirectY,
    ];

    /// Short label shown inside the brackets of a listing line.
    ///
    /// ```
    /// use dis6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::IndirectY.label(), "(zp),y");
    /// assert_eq!(AddressingMode::Implicit.label(), "i");
    /// ```
    pub const fn label(self) -> &'static str {
        match self {
            AddressingMode::Accumulator => "A",
            AddressingMode::Immediate => "#",
            AddressingMode::Absolute => "a",
            AddressingMode::ZeroPage => "zp",
            AddressingMode::Implicit => "i",
            AddressingMode::Relative => "r",
            AddressingMode::Indirect => "(a)",
            AddressingMode::AbsoluteX => "a,x",
            AddressingMode::AbsoluteY => "a,y",
            AddressingMode::ZeroPageX => "zp,x",
            AddressingMode::ZeroPageY => "zp,y",
            AddressingMode::IndirectX => "(zp,x)",
            AddressingMode::IndirectY => "(zp),y",
        }
    }

    /// Number of operand bytes following the opcode byte.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Accumulator | AddressingMode::Implicit => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_unique() {
        for (i, a) in AddressingMode::ALL.iter().enumerate() {
            for b in &AddressingMode::ALL[i + 1..] {
                assert_ne!(a.label(), b.label(), "{:?} and {:?} share a label", a, b);
            }
        }
    }

    #[test]
    fn test_operand_sizes() {
        assert_eq!(AddressingMode::Accumulator.operand_bytes(), 0);
        assert_eq!(AddressingMode::Relative.operand_bytes(), 1);
        assert_eq!(AddressingMode::IndirectX.operand_bytes(), 1);
        assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
        assert_eq!(AddressingMode::AbsoluteY.operand_bytes(), 2);
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(AddressingMode::ZeroPageY.to_string(), "zp,y");
    }
}
