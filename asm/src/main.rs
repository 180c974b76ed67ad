use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};

use clap::Parser;

use ssbcasm::assembler::{Assembler, Config};
use ssbcasm::emit;
use ssbcasm::error::Error;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input assembly file
    #[clap(short, long)]
    input: String,

    /// Output machine code file
    #[clap(short, long)]
    output: String,

    /// Carry orphaned comments on a synthesized noop
    #[clap(long = "add-noops")]
    add_noops: bool,

    /// Prefix each binary line with its hex address
    #[clap(long = "hex-line-number")]
    hex_line_number: bool,

    /// Print a colorized listing after assembly
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();
    let lines = match read_lines(&args.input) {
        Ok(lines) => lines,
        Err(err) => {
            err.print_diag(&args.input, &[]);
            std::process::exit(1);
        }
    };
    if let Err(err) = run(&args, &lines) {
        err.print_diag(&args.input, &lines);
        std::process::exit(1);
    }
}

fn read_lines(path: &str) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
    BufReader::new(file)
        .lines()
        .map(|line| line.map_err(Error::FileRead))
        .collect()
}

fn run(args: &Args, lines: &[String]) -> Result<(), Error> {
    let cfg = Config {
        add_noops: args.add_noops,
        hex_line_numbers: args.hex_line_number,
    };

    // pass 1: scan and commit; pass 2: resolve labels
    let mut asm = Assembler::new(cfg);
    for raw in lines {
        asm.line(raw)?;
    }
    let prog = asm.finish()?;

    // nothing is written unless both passes succeed
    let file =
        File::create(&args.output).map_err(|e| Error::FileCreate(args.output.clone(), e))?;
    let mut out = BufWriter::new(file);
    emit::write_all(&mut out, &prog, &cfg)
        .map_err(|e| Error::FileWrite(args.output.clone(), e))?;

    if args.dump {
        emit::dump(&prog);
    }
    let bytes = prog.entries.iter().filter(|e| e.is_code()).count();
    println!(
        "{} -> {} ({} bytes, {} labels)",
        args.input,
        args.output,
        bytes,
        prog.symbols.len()
    );
    Ok(())
}
