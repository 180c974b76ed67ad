use std::io::{self, Write};

use arch::bits::to_four_hex;
use color_print::cformat;

use crate::assembler::{Config, Program};
use crate::entry::{Bits, MacLine};

/// One output line in the .mac layout:
/// `[0xNNNN ]<bits>[ <text>][ #label][ ; comment]`
pub fn render(entry: &MacLine, cfg: &Config) -> String {
    let mut out = String::new();
    match &entry.bits {
        Bits::Code(bits) => {
            if cfg.hex_line_numbers {
                if let Some(n) = entry.mac_line {
                    out.push_str(&to_four_hex(n as u16));
                    out.push(' ');
                }
            }
            out.push_str(bits);
        }
        Bits::Pending(_) => out.push_str("XXXXXXXX"),
        Bits::None => {}
    }
    if !entry.text.is_empty() {
        out.push(' ');
        out.push_str(&entry.text);
    }
    if let Some(label) = &entry.label {
        out.push_str(" #");
        out.push_str(label);
    }
    if let Some(comment) = &entry.comment {
        out.push_str(" ; ");
        out.push_str(comment);
    }
    out
}

pub fn write_all<W: Write>(w: &mut W, prog: &Program, cfg: &Config) -> io::Result<()> {
    for entry in &prog.entries {
        writeln!(w, "{}", render(entry, cfg))?;
    }
    Ok(())
}

/// Colorized side-by-side listing for --dump.
pub fn dump(prog: &Program) {
    println!("------+----------+----------------------------------------");
    for entry in &prog.entries {
        let pos = match entry.mac_line {
            Some(n) => cformat!("<green>{:04X}</>", n),
            None => " ".repeat(4),
        };
        let bits = match &entry.bits {
            Bits::Code(b) => b.clone(),
            Bits::Pending(_) => cformat!("<red,bold>XXXXXXXX</>"),
            Bits::None => " ".repeat(8),
        };
        let text = cformat!("<red>{:<10}</>", entry.text);
        let label = match &entry.label {
            Some(l) => cformat!(" <green>#{}</>", l),
            None => String::new(),
        };
        let comment = match &entry.comment {
            Some(c) => cformat!(" <cyan>; {}</>", c),
            None => String::new(),
        };
        println!(" {} | {} | {}{}{}", pos, bits, text, label, comment);
    }
    println!("------+----------+----------------------------------------");
}
