//! Fuzz target for single-instruction decoding.
//!
//! Decodes at an arbitrary position and checks the size and rendering
//! invariants of whatever comes back.

#![no_main]

use arbitrary::Arbitrary;
use dis6502::{decode, DecodeError};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    position: u16,
}

fuzz_target!(|input: FuzzInput| {
    let position = input.position as usize;

    match decode(&input.bytes, position) {
        Ok(decoded) => {
            let instr = &decoded.instruction;
            assert_eq!(decoded.next_position, position + instr.size_bytes());
            assert!(decoded.next_position <= input.bytes.len());
            assert_eq!(instr.bytes(), &input.bytes[position..decoded.next_position]);

            let text = instr.to_string();
            assert!(text.starts_with(&format!("OPCODE={:02X}[", instr.opcode)));

            // Decoding is pure
            assert_eq!(decode(&input.bytes, position), Ok(decoded));
        }
        Err(DecodeError::UndefinedOpcode { opcode, .. }) => {
            assert_eq!(opcode, input.bytes[position]);
        }
        Err(DecodeError::Truncated { needed, available, .. }) => {
            assert!(available < needed);
        }
        Err(DecodeError::OutOfBounds { len, .. }) => {
            assert!(position >= len);
        }
    }
});
