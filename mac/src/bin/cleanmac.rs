//! Strips a .mac listing back to pure machine code: a line whose first
//! non-whitespace characters are binary digits passes through truncated
//! at the first non-binary character; every other line is dropped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use arch::bits::binary_prefix;
use clap::Parser;

#[derive(Debug, clap::Parser)]
#[clap(version, about)]
struct Args {
    /// Input .mac file (stdin if omitted)
    #[clap(short, long)]
    input: Option<String>,

    /// Output file (stdout if omitted)
    #[clap(short, long)]
    output: Option<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> io::Result<()> {
    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut out = BufWriter::new(writer);

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let bits = binary_prefix(line.trim_start());
        if !bits.is_empty() {
            writeln!(out, "{}", bits)?;
        }
    }
    Ok(())
}
