//! Property-based tests for the decoder and listing driver.
//!
//! These tests verify that:
//! - decode never reads outside the buffer and reports every failure
//! - next_position always equals position + 1 + operand length
//! - the listing tiles the input exactly under the placeholder policy
//! - decode is pure

use dis6502::{decode, disassemble, lookup, DecodeError, DisassemblyOptions, UndefinedPolicy};
use proptest::prelude::*;

proptest! {
    /// Property: a successful decode advances by exactly the instruction size
    #[test]
    fn prop_next_position_matches_size(
        bytes in prop::collection::vec(any::<u8>(), 1..16),
        index in any::<prop::sample::Index>(),
    ) {
        let position = index.index(bytes.len());
        match decode(&bytes, position) {
            Ok(decoded) => {
                let metadata = lookup(bytes[position]).unwrap();
                prop_assert_eq!(decoded.instruction.mnemonic, metadata.mnemonic);
                prop_assert_eq!(
                    decoded.next_position - position,
                    1 + metadata.addressing_mode.operand_bytes() as usize
                );
                prop_assert!(decoded.next_position <= bytes.len());
                prop_assert_eq!(
                    decoded.instruction.bytes(),
                    bytes[position..decoded.next_position].to_vec()
                );
            }
            Err(DecodeError::UndefinedOpcode { opcode, position: at }) => {
                prop_assert_eq!(opcode, bytes[position]);
                prop_assert_eq!(at, position);
                prop_assert!(lookup(opcode).is_none());
            }
            Err(DecodeError::Truncated { needed, available, .. }) => {
                prop_assert_eq!(available, bytes.len() - position);
                prop_assert!(available < needed);
            }
            Err(err @ DecodeError::OutOfBounds { .. }) => {
                prop_assert!(false, "position {} is in bounds: {}", position, err);
            }
        }
    }

    /// Property: any opcode with enough trailing bytes either decodes or is undefined
    #[test]
    fn prop_padded_opcode_never_truncates(opcode in any::<u8>(), lo in any::<u8>(), hi in any::<u8>()) {
        let bytes = [opcode, lo, hi];
        let result = decode(&bytes, 0);
        prop_assert!(
            !matches!(result, Err(DecodeError::Truncated { .. })),
            "unexpected truncation: {:?}",
            result
        );
        prop_assert_eq!(result.is_ok(), lookup(opcode).is_some());
    }

    /// Property: operand bytes are displayed high byte first
    #[test]
    fn prop_word_operand_display_order(lo in any::<u8>(), hi in any::<u8>()) {
        let decoded = decode(&[0xAD, lo, hi], 0).unwrap();
        prop_assert_eq!(
            decoded.instruction.to_string(),
            format!("OPCODE=AD[lda a] OPERAND={:02X} {:02X}", hi, lo)
        );
    }

    /// Property: decoding twice gives the same answer
    #[test]
    fn prop_decode_is_pure(bytes in prop::collection::vec(any::<u8>(), 1..8)) {
        prop_assert_eq!(decode(&bytes, 0), decode(&bytes, 0));
    }

    /// Property: with placeholders, listing lines cover the input without gaps
    #[test]
    fn prop_listing_tiles_input(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let options = DisassemblyOptions {
            on_undefined: UndefinedPolicy::Placeholder,
            ..Default::default()
        };

        match disassemble(&bytes, options) {
            Ok(lines) => {
                let mut offset = 0;
                for line in &lines {
                    prop_assert_eq!(line.offset, offset);
                    prop_assert_eq!(&bytes[offset..offset + line.bytes.len()], &line.bytes[..]);
                    offset += line.bytes.len();
                }
                prop_assert_eq!(offset, bytes.len());
            }
            Err(DecodeError::Truncated { position, available, .. }) => {
                prop_assert_eq!(position + available, bytes.len());
            }
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
        }
    }
}
