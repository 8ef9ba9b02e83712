//! # Opcode Tables
//!
//! Static tables describing every instruction the decoder recognises, and the
//! classification that maps an opcode byte onto them.
//!
//! The 6502 encoding overlays several schemes on one byte. They are tried in
//! a fixed order and the first match wins:
//!
//! 1. **Conditional branches** - 8 exact opcodes, relative operand
//! 2. **Interrupt/subroutine** - BRK, RTI, RTS, then JSR with an absolute operand
//! 3. **Single-byte** - 22 exact opcodes with no operand
//! 4. **Grouped** - the byte splits into `aaabbbcc` fields: `aaa` selects the
//!    operation, `bbb` the addressing mode and `cc` the group table
//!
//! The exact-match tables must come first because several of their opcodes
//! would otherwise fall into a group slot with the wrong meaning.

use crate::addressing::AddressingMode;

/// An instruction identified by an exact opcode match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOpcode {
    /// Lower-case mnemonic.
    pub mnemonic: &'static str,

    /// The opcode byte.
    pub opcode: u8,
}

const fn fixed(mnemonic: &'static str, opcode: u8) -> FixedOpcode {
    FixedOpcode { mnemonic, opcode }
}

/// Conditional branches, encoded as `xxy10000`.
///
/// `xx` selects the flag (negative, overflow, carry, zero) and `y` the value
/// it is compared against.
pub static CONDITIONAL_BRANCHES: [FixedOpcode; 8] = [
    fixed("bpl", 0x10),
    fixed("bmi", 0x30),
    fixed("bvc", 0x50),
    fixed("bvs", 0x70),
    fixed("bcc", 0x90),
    fixed("bcs", 0xB0),
    fixed("bne", 0xD0),
    fixed("beq", 0xF0),
];

/// Interrupt and return instructions. All implied, no operand.
pub static INTERRUPTS: [FixedOpcode; 3] = [
    fixed("brk", 0x00),
    fixed("rti", 0x40),
    fixed("rts", 0x60),
];

/// Jump to subroutine. The only interrupt/subroutine opcode with an operand.
pub static JSR: FixedOpcode = fixed("jsr", 0x20);

/// Single-byte instructions: transfers, stack, flags and index inc/dec.
pub static SINGLE_BYTE: [FixedOpcode; 22] = [
    fixed("php", 0x08),
    fixed("plp", 0x28),
    fixed("pha", 0x48),
    fixed("pla", 0x68),
    fixed("dey", 0x88),
    fixed("tay", 0xA8),
    fixed("iny", 0xC8),
    fixed("inx", 0xE8),
    fixed("clc", 0x18),
    fixed("sec", 0x38),
    fixed("cli", 0x58),
    fixed("sei", 0x78),
    fixed("tya", 0x98),
    fixed("clv", 0xB8),
    fixed("cld", 0xD8),
    fixed("sed", 0xF8),
    fixed("txa", 0x8A),
    fixed("txs", 0x9A),
    fixed("tax", 0xAA),
    fixed("tsx", 0xBA),
    fixed("dex", 0xCA),
    fixed("nop", 0xEA),
];

/// The two-bit `cc` field of a grouped opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCode {
    /// `00`: compare/bit/jump, LDY/STY/CPY/CPX.
    Group3,
    /// `01`: accumulator arithmetic, logic, load and store.
    Group1,
    /// `10`: shifts, rotates, memory inc/dec, LDX/STX.
    Group2,
    /// `11`: unused on the NMOS 6502.
    Reserved,
}

impl GroupCode {
    /// Extracts the group code from the low two bits of an opcode.
    pub const fn from_opcode(opcode: u8) -> GroupCode {
        match opcode & 0b11 {
            0b00 => GroupCode::Group3,
            0b01 => GroupCode::Group1,
            0b10 => GroupCode::Group2,
            _ => GroupCode::Reserved,
        }
    }

    /// The opcode/addressing-mode tables for this group, if it has any.
    pub fn table(self) -> Option<&'static GroupTable> {
        match self {
            GroupCode::Group1 => Some(&GROUP1),
            GroupCode::Group2 => Some(&GROUP2),
            GroupCode::Group3 => Some(&GROUP3),
            GroupCode::Reserved => None,
        }
    }
}

/// An opcode byte split into its `aaabbbcc` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    /// `aaa`: operation within the group.
    pub operation: u8,

    /// `bbb`: raw addressing-mode slot.
    pub mode: u8,

    /// `cc`: which group table applies.
    pub group: GroupCode,
}

impl Fields {
    /// Splits an opcode byte into its fields.
    ///
    /// ```
    /// use dis6502::opcodes::{Fields, GroupCode};
    ///
    /// let fields = Fields::split(0xB6); // 101 101 10
    /// assert_eq!(fields.operation, 0b101);
    /// assert_eq!(fields.mode, 0b101);
    /// assert_eq!(fields.group, GroupCode::Group2);
    /// ```
    pub const fn split(opcode: u8) -> Fields {
        Fields {
            operation: opcode >> 5,
            mode: (opcode >> 2) & 0b111,
            group: GroupCode::from_opcode(opcode),
        }
    }
}

/// Mnemonic and addressing-mode tables for one opcode group.
///
/// `None` marks a slot with no defined instruction.
#[derive(Debug)]
pub struct GroupTable {
    /// Indexed by the `aaa` field.
    pub operations: [Option<&'static str>; 8],

    /// Indexed by the `bbb` field.
    pub modes: [Option<AddressingMode>; 8],
}

/// Group 1 (`cc = 01`). Every slot is populated.
pub static GROUP1: GroupTable = GroupTable {
    operations: [
        Some("ora"),
        Some("and"),
        Some("eor"),
        Some("adc"),
        Some("sta"),
        Some("lda"),
        Some("cmp"),
        Some("sbc"),
    ],
    modes: [
        Some(AddressingMode::IndirectX),
        Some(AddressingMode::ZeroPage),
        Some(AddressingMode::Immediate),
        Some(AddressingMode::Absolute),
        Some(AddressingMode::IndirectY),
        Some(AddressingMode::ZeroPageX),
        Some(AddressingMode::AbsoluteY),
        Some(AddressingMode::AbsoluteX),
    ],
};

/// Group 2 (`cc = 10`).
pub static GROUP2: GroupTable = GroupTable {
    operations: [
        Some("asl"),
        Some("rol"),
        Some("lsr"),
        Some("ror"),
        Some("stx"),
        Some("ldx"),
        Some("dec"),
        Some("inc"),
    ],
    modes: [
        Some(AddressingMode::Immediate),
        Some(AddressingMode::ZeroPage),
        Some(AddressingMode::Accumulator),
        Some(AddressingMode::Absolute),
        None,
        Some(AddressingMode::ZeroPageX),
        None,
        Some(AddressingMode::AbsoluteX),
    ],
};

/// Group 3 (`cc = 00`). Operation `000` has no grouped instruction.
pub static GROUP3: GroupTable = GroupTable {
    operations: [
        None,
        Some("bit"),
        Some("jmp"),
        Some("jmp"),
        Some("sty"),
        Some("ldy"),
        Some("cpy"),
        Some("cpx"),
    ],
    modes: [
        Some(AddressingMode::Immediate),
        Some(AddressingMode::ZeroPage),
        None,
        Some(AddressingMode::Absolute),
        None,
        Some(AddressingMode::ZeroPageX),
        None,
        Some(AddressingMode::AbsoluteX),
    ],
};

/// A post-lookup replacement of the displayed addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeOverride {
    /// Group table the rule applies to.
    pub group: GroupCode,

    /// `aaa` field the rule applies to.
    pub operation: u8,

    /// `bbb` field the rule applies to; `None` matches every slot.
    pub mode: Option<u8>,

    /// Mode reported instead of the table entry.
    pub replacement: AddressingMode,
}

/// Operations that reuse an addressing-mode slot for a different meaning.
///
/// STX and LDX index through Y where the table says X. The operand size is
/// the same on both sides of each remap. JMP `011` is the indirect form and
/// always takes a 16-bit pointer, whatever the `bbb` field says.
pub static MODE_OVERRIDES: [ModeOverride; 4] = [
    // stx zp,x -> stx zp,y
    ModeOverride {
        group: GroupCode::Group2,
        operation: 0b100,
        mode: Some(0b101),
        replacement: AddressingMode::ZeroPageY,
    },
    // ldx zp,x -> ldx zp,y
    ModeOverride {
        group: GroupCode::Group2,
        operation: 0b101,
        mode: Some(0b101),
        replacement: AddressingMode::ZeroPageY,
    },
    // ldx a,x -> ldx a,y
    ModeOverride {
        group: GroupCode::Group2,
        operation: 0b101,
        mode: Some(0b111),
        replacement: AddressingMode::AbsoluteY,
    },
    // jmp (a)
    ModeOverride {
        group: GroupCode::Group3,
        operation: 0b011,
        mode: None,
        replacement: AddressingMode::Indirect,
    },
];

impl ModeOverride {
    fn matches(&self, fields: Fields) -> bool {
        self.group == fields.group
            && self.operation == fields.operation
            && self.mode.map_or(true, |mode| mode == fields.mode)
    }
}

/// Finds the override rule, if any, for a set of opcode fields.
pub fn mode_override(fields: Fields) -> Option<AddressingMode> {
    MODE_OVERRIDES
        .iter()
        .find(|rule| rule.matches(fields))
        .map(|rule| rule.replacement)
}

/// Which encoding scheme an opcode byte belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Branch(&'static FixedOpcode),
    Interrupt(&'static FixedOpcode),
    JumpSubroutine,
    SingleByte(&'static FixedOpcode),
    Grouped(Fields),
}

fn find_fixed(table: &'static [FixedOpcode], opcode: u8) -> Option<&'static FixedOpcode> {
    table.iter().find(|entry| entry.opcode == opcode)
}

/// Classifies an opcode byte, trying each scheme in precedence order.
pub fn classify(opcode: u8) -> Encoding {
    if let Some(entry) = find_fixed(&CONDITIONAL_BRANCHES, opcode) {
        Encoding::Branch(entry)
    } else if let Some(entry) = find_fixed(&INTERRUPTS, opcode) {
        Encoding::Interrupt(entry)
    } else if opcode == JSR.opcode {
        Encoding::JumpSubroutine
    } else if let Some(entry) = find_fixed(&SINGLE_BYTE, opcode) {
        Encoding::SingleByte(entry)
    } else {
        Encoding::Grouped(Fields::split(opcode))
    }
}

/// Resolved metadata for a defined opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Lower-case mnemonic (e.g. "lda").
    pub mnemonic: &'static str,

    /// Addressing mode after any override has been applied.
    pub addressing_mode: AddressingMode,
}

impl OpcodeMetadata {
    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u8 {
        1 + self.addressing_mode.operand_bytes()
    }
}

impl Encoding {
    /// Resolves the mnemonic and addressing mode.
    ///
    /// Returns `None` when the byte has no defined instruction: the reserved
    /// group code, an empty operation slot or an empty addressing-mode slot.
    pub fn resolve(self) -> Option<OpcodeMetadata> {
        let (mnemonic, addressing_mode) = match self {
            Encoding::Branch(entry) => (entry.mnemonic, AddressingMode::Relative),
            Encoding::Interrupt(entry) => (entry.mnemonic, AddressingMode::Implicit),
            Encoding::JumpSubroutine => (JSR.mnemonic, AddressingMode::Absolute),
            Encoding::SingleByte(entry) => (entry.mnemonic, AddressingMode::Implicit),
            Encoding::Grouped(fields) => {
                let table = fields.group.table()?;
                let mnemonic = table.operations[fields.operation as usize]?;
                let mode = match mode_override(fields) {
                    Some(mode) => mode,
                    None => table.modes[fields.mode as usize]?,
                };
                (mnemonic, mode)
            }
        };

        Some(OpcodeMetadata {
            mnemonic,
            addressing_mode,
        })
    }
}

/// Looks up the instruction encoded by an opcode byte.
///
/// ```
/// use dis6502::{opcodes, AddressingMode};
///
/// let lda = opcodes::lookup(0xA9).unwrap();
/// assert_eq!(lda.mnemonic, "lda");
/// assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda.size_bytes(), 2);
///
/// // Group code 11 is never defined.
/// assert!(opcodes::lookup(0xFF).is_none());
/// ```
pub fn lookup(opcode: u8) -> Option<OpcodeMetadata> {
    classify(opcode).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tables_do_not_overlap() {
        let mut seen = [false; 256];
        let all = CONDITIONAL_BRANCHES
            .iter()
            .chain(INTERRUPTS.iter())
            .chain(std::iter::once(&JSR))
            .chain(SINGLE_BYTE.iter());
        for entry in all {
            assert!(!seen[entry.opcode as usize], "0x{:02X} listed twice", entry.opcode);
            seen[entry.opcode as usize] = true;
        }
    }

    #[test]
    fn test_branch_layout() {
        for entry in &CONDITIONAL_BRANCHES {
            assert_eq!(entry.opcode & 0b0001_1111, 0b0001_0000, "{}", entry.mnemonic);
        }
    }

    #[test]
    fn test_classify_precedence() {
        // 0x10 is BPL, not group 3 operation 000 / mode 100.
        assert!(matches!(classify(0x10), Encoding::Branch(e) if e.mnemonic == "bpl"));
        assert!(matches!(classify(0x20), Encoding::JumpSubroutine));
        assert!(matches!(classify(0x60), Encoding::Interrupt(e) if e.mnemonic == "rts"));
        // 0xEA would be "inc A" in group 2.
        assert!(matches!(classify(0xEA), Encoding::SingleByte(e) if e.mnemonic == "nop"));
        assert!(matches!(classify(0x6D), Encoding::Grouped(_)));
    }

    #[test]
    fn test_reserved_group() {
        assert_eq!(Fields::split(0x03).group, GroupCode::Reserved);
        assert!(GroupCode::Reserved.table().is_none());
        assert!(lookup(0x03).is_none());
    }

    #[test]
    fn test_override_rules() {
        assert_eq!(mode_override(Fields::split(0x96)), Some(AddressingMode::ZeroPageY));
        assert_eq!(mode_override(Fields::split(0xB6)), Some(AddressingMode::ZeroPageY));
        assert_eq!(mode_override(Fields::split(0xBE)), Some(AddressingMode::AbsoluteY));
        assert_eq!(mode_override(Fields::split(0x6C)), Some(AddressingMode::Indirect));
        // stx a,x keeps its table entry
        assert_eq!(mode_override(Fields::split(0x9E)), None);
        assert_eq!(mode_override(Fields::split(0xD6)), None);
    }

    #[test]
    fn test_group3_empty_operation() {
        assert!(lookup(0x04).is_none());
        assert!(lookup(0x0C).is_none());
    }

    #[test]
    fn test_group2_empty_modes() {
        assert!(lookup(0x12).is_none());
        assert!(lookup(0xDA).is_none());
        // TXS sits in an empty group 2 slot but is caught by the single-byte table.
        assert_eq!(lookup(0x9A).map(|m| m.mnemonic), Some("txs"));
    }
}
