use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use dis6502::{hex_dump, DisassemblyOptions, Listing, ListingLine, UndefinedPolicy};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OnUndefined {
    /// Stop at the first undefined opcode.
    Halt,
    /// Print a placeholder line and carry on.
    Placeholder,
}

impl From<OnUndefined> for UndefinedPolicy {
    fn from(value: OnUndefined) -> Self {
        match value {
            OnUndefined::Halt => UndefinedPolicy::Halt,
            OnUndefined::Placeholder => UndefinedPolicy::Placeholder,
        }
    }
}

#[derive(Parser)]
#[command(about = "dis6502 - 6502 machine code listing", long_about = None)]
struct Args {
    /// Binary filename to disassemble.
    filename: PathBuf,

    /// Load address of the first byte ($C000, 0xC000 or decimal).
    #[arg(short, long, value_parser = parse_address, default_value = "0")]
    start_address: u16,

    /// Print a hex dump of the input before the listing.
    #[arg(long)]
    hex_dump: bool,

    /// Prefix each line with its address.
    #[arg(long)]
    show_offsets: bool,

    /// What to do on an undefined opcode.
    #[arg(long, value_enum, default_value_t = OnUndefined::Halt)]
    on_undefined: OnUndefined,

    /// Only disassemble this many leading bytes.
    #[arg(long)]
    max_bytes: Option<usize>,
}

impl Args {
    fn options(&self) -> DisassemblyOptions {
        DisassemblyOptions {
            start_address: self.start_address,
            hex_dump: self.hex_dump,
            show_offsets: self.show_offsets,
            on_undefined: self.on_undefined.into(),
            max_bytes: self.max_bytes,
        }
    }
}

fn parse_address(s: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix('$')) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

/// Reads the input file and writes the hex dump and listing to `out`.
///
/// Lines decoded before a failure are written before the error is returned.
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let options = args.options();

    let data = fs::read(&args.filename)
        .with_context(|| format!("Failed to read {}", args.filename.display()))?;
    let bytes = options.window(&data);
    info!(
        "Disassembling {} of {} bytes from {}",
        bytes.len(),
        data.len(),
        args.filename.display()
    );

    if options.hex_dump {
        writeln!(out, "{}", hex_dump(bytes))?;
        writeln!(out)?;
    }

    for result in Listing::new(bytes) {
        let line = ListingLine::from_result(result, &options).context("Disassembly stopped")?;
        writeln!(out, "{}", line.render(&options))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)
}
