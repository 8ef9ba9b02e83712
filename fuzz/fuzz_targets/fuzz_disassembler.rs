//! Fuzz target for the listing driver.
//!
//! This target feeds arbitrary byte sequences through `disassemble`
//! and checks that the lines tile the input exactly.

#![no_main]

use arbitrary::Arbitrary;
use dis6502::{disassemble, DecodeError, DisassemblyOptions, UndefinedPolicy};
use libfuzzer_sys::fuzz_target;

/// Disassembly options for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzOptions {
    start_address: u16,
    show_offsets: bool,
    max_bytes: Option<u16>,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    options: FuzzOptions,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.options.start_address,
        hex_dump: false,
        show_offsets: input.options.show_offsets,
        on_undefined: UndefinedPolicy::Placeholder,
        max_bytes: input.options.max_bytes.map(usize::from),
    };
    let window = options.window(&input.bytes);

    match disassemble(&input.bytes, options) {
        Ok(lines) => {
            let mut expected_offset = 0;
            for line in &lines {
                assert_eq!(line.offset, expected_offset);
                assert_eq!(line.address, options.address_of(line.offset));
                assert!((1..=3).contains(&line.bytes.len()));
                assert_eq!(&window[line.offset..line.offset + line.bytes.len()], &line.bytes[..]);
                expected_offset += line.bytes.len();
            }
            assert_eq!(expected_offset, window.len());
        }
        Err(DecodeError::Truncated {
            position,
            needed,
            available,
            ..
        }) => {
            // Only the final instruction can run off the end
            assert_eq!(position + available, window.len());
            assert!(available < needed);
        }
        Err(err) => panic!("unexpected error with placeholder policy: {}", err),
    }
});
