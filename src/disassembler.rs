//! 6502 Disassembler Module
//!
//! Converts binary machine code into listing lines, one instruction at a time.
//!
//! [`decoder::decode`] handles a single instruction and never fails silently.
//! [`Listing`] walks a whole buffer, and [`disassemble`] collects the walk
//! into lines according to [`DisassemblyOptions`].

pub mod decoder;
pub mod formatter;

use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};

use crate::addressing::AddressingMode;
use crate::DecodeError;
use decoder::{decode, Decoded};

/// Operand of a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Byte(u8),
    /// 16-bit operand, stored low byte first.
    Word(u16),
}

impl Operand {
    /// Builds an operand from up to two bytes in storage order.
    pub fn from_le_slice(bytes: &[u8]) -> Operand {
        match *bytes {
            [] => Operand::None,
            [b] => Operand::Byte(b),
            [lo, hi, ..] => Operand::Word(u16::from_le_bytes([lo, hi])),
        }
    }

    /// Number of operand bytes.
    pub fn len(self) -> usize {
        match self {
            Operand::None => 0,
            Operand::Byte(_) => 1,
            Operand::Word(_) => 2,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Operand::None
    }

    /// High-order display byte. Only 16-bit operands have one.
    pub fn high(self) -> Option<u8> {
        match self {
            Operand::Word(w) => Some((w >> 8) as u8),
            _ => None,
        }
    }

    /// Low-order display byte.
    pub fn low(self) -> Option<u8> {
        match self {
            Operand::None => None,
            Operand::Byte(b) => Some(b),
            Operand::Word(w) => Some(w as u8),
        }
    }

    /// Operand bytes in storage order.
    pub fn to_le_bytes(self) -> Vec<u8> {
        match self {
            Operand::None => Vec::new(),
            Operand::Byte(b) => vec![b],
            Operand::Word(w) => w.to_le_bytes().to_vec(),
        }
    }
}

/// A single decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Lower-case instruction mnemonic (e.g., "lda", "sta", "jmp")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand (0-2 bytes depending on addressing mode)
    pub operand: Operand,
}

impl Instruction {
    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub fn size_bytes(&self) -> usize {
        1 + self.operand.len()
    }

    /// Raw instruction bytes in storage order.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.opcode];
        bytes.extend(self.operand.to_le_bytes());
        bytes
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&formatter::format_instruction(self))
    }
}

/// What a listing does when it meets an undefined opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedPolicy {
    /// Stop and report the opcode as an error.
    #[default]
    Halt,

    /// Emit a placeholder line and continue with the next byte.
    Placeholder,
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Address of the first buffer byte (affects address display)
    pub start_address: u16,

    /// Whether to print a hex dump ahead of the listing.
    ///
    /// `disassemble` ignores this; front ends that print a header read it
    /// and produce the dump with [`formatter::hex_dump`].
    pub hex_dump: bool,

    /// Whether to prefix each line with its address
    pub show_offsets: bool,

    /// Handling of undefined opcodes
    pub on_undefined: UndefinedPolicy,

    /// Only disassemble this many leading bytes
    pub max_bytes: Option<usize>,
}

impl DisassemblyOptions {
    /// The part of `bytes` selected by `max_bytes`.
    pub fn window<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        match self.max_bytes {
            Some(limit) if limit < bytes.len() => &bytes[..limit],
            _ => bytes,
        }
    }

    /// Display address of a buffer offset. Wraps at 16 bits.
    pub fn address_of(&self, offset: usize) -> u16 {
        self.start_address.wrapping_add(offset as u16)
    }
}

/// Iterator decoding consecutive instructions from a buffer.
///
/// An undefined opcode is yielded as an error and the walk resumes at the
/// next byte. Truncation ends the walk after the error is yielded.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    bytes: &'a [u8],
    position: usize,
    finished: bool,
}

impl<'a> Listing<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::starting_at(bytes, 0)
    }

    pub fn starting_at(bytes: &'a [u8], position: usize) -> Self {
        Listing {
            bytes,
            position,
            finished: false,
        }
    }

    /// Position of the next byte to decode.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for Listing<'_> {
    type Item = Result<Decoded, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.position >= self.bytes.len() {
            return None;
        }

        let result = decode(self.bytes, self.position);
        match &result {
            Ok(decoded) => self.position = decoded.next_position,
            Err(err) => match err.resume_position() {
                Some(position) => self.position = position,
                None => self.finished = true,
            },
        }
        Some(result)
    }
}

impl FusedIterator for Listing<'_> {}

/// One line of a rendered listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    /// Buffer offset of the first byte
    pub offset: usize,

    /// Display address (`start_address + offset`)
    pub address: u16,

    /// Raw bytes covered by this line
    pub bytes: Vec<u8>,

    /// Formatted instruction text
    pub text: String,
}

impl ListingLine {
    /// Turns one step of a [`Listing`] into a line, applying the undefined
    /// opcode policy from `options`.
    pub fn from_result(
        result: Result<Decoded, DecodeError>,
        options: &DisassemblyOptions,
    ) -> Result<ListingLine, DecodeError> {
        match result {
            Ok(decoded) => Ok(ListingLine {
                offset: decoded.position,
                address: options.address_of(decoded.position),
                bytes: decoded.instruction.bytes(),
                text: decoded.instruction.to_string(),
            }),
            Err(DecodeError::UndefinedOpcode { opcode, position })
                if options.on_undefined == UndefinedPolicy::Placeholder =>
            {
                debug!(
                    "Undefined opcode 0x{:02X} at offset {}, emitting placeholder",
                    opcode, position
                );
                Ok(ListingLine {
                    offset: position,
                    address: options.address_of(position),
                    bytes: vec![opcode],
                    text: formatter::format_undefined(opcode),
                })
            }
            Err(err) => {
                debug!("Listing stopped: {}", err);
                Err(err)
            }
        }
    }

    /// The line as printed, with an address prefix if requested.
    pub fn render(&self, options: &DisassemblyOptions) -> String {
        if options.show_offsets {
            format!("{:04X}: {}", self.address, self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Disassemble a byte slice into listing lines
///
/// # Arguments
///
/// * `bytes` - The machine code to disassemble
/// * `options` - Disassembly options controlling output format
///
/// # Returns
///
/// One line per instruction, or the first error the listing can't continue
/// past: truncation always, undefined opcodes under [`UndefinedPolicy::Halt`].
pub fn disassemble(
    bytes: &[u8],
    options: DisassemblyOptions,
) -> Result<Vec<ListingLine>, DecodeError> {
    let bytes = options.window(bytes);
    Listing::new(bytes)
        .map(|result| {
            let line = ListingLine::from_result(result, &options)?;
            trace!("{:04X}: {}", line.address, line.text);
            Ok(line)
        })
        .collect()
}
