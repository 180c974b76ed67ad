//! Annotates a pure machine-code file: every line opening with an 8-bit
//! binary string gets its running hex address and hex byte value
//! prepended; other lines pass through untouched and do not count.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use arch::bits::{bits_to_byte, leading_byte_bits};
use clap::Parser;

#[derive(Debug, clap::Parser)]
#[clap(version, about)]
struct Args {
    /// Input machine code file
    #[clap(short, long)]
    input: String,

    /// Output annotated file
    #[clap(short, long)]
    output: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> io::Result<()> {
    let reader = BufReader::new(File::open(&args.input)?);
    let mut out = BufWriter::new(File::create(&args.output)?);

    let mut line_num: u16 = 0;
    for line in reader.lines() {
        let line = line?;
        match leading_byte_bits(&line).and_then(bits_to_byte) {
            Some(byte) => {
                writeln!(out, "{:04X} {:02X} {}", line_num, byte, line)?;
                line_num = line_num.wrapping_add(1);
            }
            None => writeln!(out, "{}", line)?,
        }
    }
    Ok(())
}
