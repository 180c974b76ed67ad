// ----------------------------------------------------------------------------
// Two-pass assembly.
//
// Pass 1 scans the source line by line, queueing machine-code entries and
// collecting labels; pass 2 fills in the byte values of all address
// references. Forward references make single-pass streaming impossible, so
// the whole entry list is buffered before anything is resolved.

use std::collections::VecDeque;
use std::mem;

use arch::bits::{byte_to_bits, high_byte, low_byte};
use arch::op::{Op, Width};

use crate::addr::{Address, AddressPart};
use crate::cursor::Cursor;
use crate::entry::{Bits, MacLine};
use crate::error::Error;
use crate::symbols::Symbols;

/// Run options, fixed for the whole assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Synthesize a noop to carry an otherwise-orphaned comment.
    pub add_noops: bool,
    /// Prefix binary output lines with their 0xNNNN address.
    pub hex_line_numbers: bool,
}

/// Operand expectation left behind by the last opcode, carrying the
/// mnemonic that set it for error messages.
#[derive(Debug, Clone)]
enum Expect {
    None,
    One(String),
    Two(String),
}

pub struct Assembler {
    cfg: Config,
    /// Current 1-based source line.
    src_line: usize,
    expect: Expect,
    /// Entries scanned from the current source line, not yet committed.
    queue: Vec<MacLine>,
    comments: VecDeque<String>,
    /// Label awaiting the next committed machine line: (name, defining line).
    label: Option<(String, usize)>,
    /// Opening line of an active `/* */` comment.
    block_open: Option<usize>,
    /// Committed entry arena.
    entries: Vec<MacLine>,
    /// Arena indices of entries awaiting address resolution.
    unresolved: Vec<usize>,
    symbols: Symbols,
    next_mac_line: usize,
}

/// Result of a successful two-pass run.
pub struct Program {
    pub entries: Vec<MacLine>,
    pub symbols: Symbols,
}

impl Assembler {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            src_line: 0,
            expect: Expect::None,
            queue: Vec::new(),
            comments: VecDeque::new(),
            label: None,
            block_open: None,
            entries: Vec::new(),
            unresolved: Vec::new(),
            symbols: Symbols::new(),
            next_mac_line: 0,
        }
    }

    /// Pass 1: scan one source line and commit its entries.
    pub fn line(&mut self, raw: &str) -> Result<(), Error> {
        self.src_line += 1;
        let mut cur = Cursor::new(raw);

        // An open block comment swallows the line up to its terminator.
        if self.block_open.is_some() {
            match raw.find("*/") {
                Some(end) => {
                    self.comments.push_back(raw[..end].trim().to_string());
                    self.block_open = None;
                    cur.reset(end + 2);
                }
                None => {
                    self.comments.push_back(raw.trim().to_string());
                    return self.flush();
                }
            }
        }

        if cur.at_end() {
            if self.comments.is_empty() {
                // blank line: preserve vertical spacing in the output
                self.comments.push_back(String::new());
            }
            return self.flush();
        }

        while !cur.at_end() {
            self.step(&mut cur)?;
        }
        self.flush()
    }

    /// Pass 2: resolve every pending address reference.
    pub fn finish(mut self) -> Result<Program, Error> {
        if let Some(open) = self.block_open {
            return Err(Error::UnclosedComment { line: open });
        }
        for idx in mem::take(&mut self.unresolved) {
            let entry = &self.entries[idx];
            let Bits::Pending(part) = &entry.bits else {
                continue;
            };
            let target = self.symbols.get(&part.label).ok_or_else(|| Error::UnresolvedLabel {
                line: entry.src_line,
                label: part.label.clone(),
            })?;
            let resolved = target as i64 + part.offset;
            if !(0..=0xFFFF).contains(&resolved) {
                return Err(Error::AddressRange {
                    line: entry.src_line,
                    label: part.label.clone(),
                    value: resolved,
                });
            }
            let bits = part.bits_of(resolved as u16);
            self.entries[idx].bits = Bits::Code(bits);
        }
        Ok(Program {
            entries: self.entries,
            symbols: self.symbols,
        })
    }

    /// Match one construct at the cursor, in strict priority order.
    fn step(&mut self, cur: &mut Cursor) -> Result<(), Error> {
        // (a) comment
        if cur.try_str("//") || cur.try_str(";") {
            cur.skip_space();
            self.comments.push_back(cur.take_rest().to_string());
            return Ok(());
        }
        if cur.try_str("/*") {
            match cur.rest().find("*/") {
                Some(end) => {
                    let text = cur.rest()[..end].trim().to_string();
                    self.comments.push_back(text);
                    cur.advance(end + 2);
                }
                None => {
                    self.block_open = Some(self.src_line);
                    self.comments.push_back(cur.take_rest().trim().to_string());
                }
            }
            return Ok(());
        }

        // (b) label definition: #name
        if let Some(name) = try_label(cur) {
            if let Some((pending, _)) = &self.label {
                return Err(Error::LabelPending {
                    line: self.src_line,
                    pending: pending.clone(),
                });
            }
            self.label = Some((name.to_string(), self.src_line));
            return Ok(());
        }

        // (c) one byte of an address: @name.H / @name.L
        if let Some(part) = AddressPart::parse(cur) {
            self.queue
                .push(MacLine::pending(self.src_line, part.to_string(), part));
            // one byte of the outstanding expectation is satisfied
            self.expect = match mem::replace(&mut self.expect, Expect::None) {
                Expect::Two(op) => Expect::One(op),
                _ => Expect::None,
            };
            return Ok(());
        }

        // (d) full two-byte address, high byte first
        if let Some(addr) = Address::parse(cur) {
            if let Expect::One(op) = &self.expect {
                return Err(Error::AddressWidth {
                    line: self.src_line,
                    op: op.clone(),
                    label: addr.label.clone(),
                });
            }
            self.expect = Expect::None;
            self.queue
                .push(MacLine::pending(self.src_line, format!("{}.H", addr), addr.high()));
            self.queue
                .push(MacLine::pending(self.src_line, format!("{}.L", addr), addr.low()));
            return Ok(());
        }

        // (e) literal under an operand-width constraint
        match mem::replace(&mut self.expect, Expect::None) {
            Expect::Two(op) => return self.step_expect2(cur, op),
            Expect::One(op) => return self.step_expect1(cur, op),
            Expect::None => {}
        }

        // (f) unconstrained literal: hex width by digit count, decimal by magnitude
        if let Some((text, n)) = cur.try_hex(3, 4) {
            self.push_pair(text, n as u16);
            return Ok(());
        }
        if let Some((text, n)) = cur.try_hex(1, 2) {
            self.push_byte(text, n as u8);
            return Ok(());
        }
        if let Some((text, n)) = cur.try_decimal() {
            return self.push_decimal(text, n);
        }

        // (g) opcode mnemonic
        match cur.try_token() {
            Some(token) => match Op::parse(token) {
                Some(op) => {
                    self.queue.push(MacLine::code(
                        self.src_line,
                        byte_to_bits(op.code()),
                        op.to_string(),
                    ));
                    self.expect = match op.operand() {
                        Width::One => Expect::One(op.to_string()),
                        Width::Two => Expect::Two(op.to_string()),
                        Width::None => Expect::None,
                    };
                    Ok(())
                }
                None => Err(Error::UnknownToken {
                    line: self.src_line,
                    token: token.to_string(),
                }),
            },
            None => Err(Error::Syntax {
                line: self.src_line,
                rest: cur.rest().trim_end().to_string(),
            }),
        }
    }

    /// A 2-byte value is due: a 4-digit hex literal, a decimal padded to
    /// two bytes, or a 2-digit hex literal leaving one more byte due.
    fn step_expect2(&mut self, cur: &mut Cursor, op: String) -> Result<(), Error> {
        if let Some((text, n)) = cur.try_hex(3, 4) {
            self.push_pair(text, n as u16);
        } else if let Some((text, n)) = cur.try_hex(1, 2) {
            self.push_byte(text, n as u8);
            self.expect = Expect::One(op);
        } else if let Some((text, n)) = cur.try_decimal() {
            if (-0x80..=0x7F).contains(&n) {
                self.queue.push(MacLine::code(
                    self.src_line,
                    byte_to_bits(0),
                    format!("{} H", text),
                ));
                self.queue.push(MacLine::code(
                    self.src_line,
                    byte_to_bits(n as u8),
                    format!("{} L", " ".repeat(text.len())),
                ));
            } else if (-0x8000..=0x7FFF).contains(&n) {
                self.push_pair(text, n as u16);
            } else {
                return Err(Error::Overflow {
                    line: self.src_line,
                    text: text.to_string(),
                });
            }
        } else {
            return Err(Error::WidthMismatch {
                line: self.src_line,
                op,
                expect: 2,
            });
        }
        Ok(())
    }

    /// A 1-byte value is due; 2-byte forms are rejected, not truncated.
    fn step_expect1(&mut self, cur: &mut Cursor, op: String) -> Result<(), Error> {
        if let Some((text, n)) = cur.try_hex(1, 2) {
            self.push_byte(text, n as u8);
            return Ok(());
        }
        if cur.try_hex(3, 4).is_some() {
            // a 3-4 digit hex literal is a 2-byte value by convention
            return Err(Error::WidthMismatch {
                line: self.src_line,
                op,
                expect: 1,
            });
        }
        if let Some((text, n)) = cur.try_decimal() {
            if (-0x80..=0x7F).contains(&n) {
                self.push_byte(text, n as u8);
                return Ok(());
            }
        }
        Err(Error::WidthMismatch {
            line: self.src_line,
            op,
            expect: 1,
        })
    }

    fn push_byte(&mut self, text: &str, value: u8) {
        self.queue
            .push(MacLine::code(self.src_line, byte_to_bits(value), text.to_string()));
    }

    /// High/low pair; the low-byte annotation is padded so its `L` aligns
    /// under the high-byte annotation's `H`.
    fn push_pair(&mut self, text: &str, value: u16) {
        self.queue.push(MacLine::code(
            self.src_line,
            byte_to_bits(high_byte(value)),
            format!("{} H", text),
        ));
        self.queue.push(MacLine::code(
            self.src_line,
            byte_to_bits(low_byte(value)),
            format!("{} L", " ".repeat(text.len())),
        ));
    }

    /// Unconstrained decimal: one byte if it fits, two if 16-bit, else fatal.
    fn push_decimal(&mut self, text: &str, n: i64) -> Result<(), Error> {
        if (-0x80..=0x7F).contains(&n) {
            self.push_byte(text, n as u8);
        } else if (-0x8000..=0x7FFF).contains(&n) {
            self.push_pair(text, n as u16);
        } else {
            return Err(Error::Overflow {
                line: self.src_line,
                text: text.to_string(),
            });
        }
        Ok(())
    }

    /// End of line: commit queued entries in order, pairing them with
    /// queued comments; leftover comments stand on their own.
    fn flush(&mut self) -> Result<(), Error> {
        for mut entry in mem::take(&mut self.queue) {
            if let Some(comment) = self.comments.pop_front() {
                if !comment.is_empty() {
                    entry.comment = Some(comment);
                }
            }
            self.commit(entry)?;
        }
        while let Some(comment) = self.comments.pop_front() {
            self.orphan(comment)?;
        }
        Ok(())
    }

    /// A comment (or blank line) with no machine code to ride on.
    fn orphan(&mut self, comment: String) -> Result<(), Error> {
        let comment = if comment.is_empty() { None } else { Some(comment) };
        if self.cfg.add_noops {
            let mut entry =
                MacLine::code(self.src_line, byte_to_bits(Op::Noop.code()), String::new());
            entry.comment = comment;
            self.commit(entry)
        } else {
            let mut entry = MacLine::display(self.src_line);
            entry.comment = comment;
            self.entries.push(entry);
            Ok(())
        }
    }

    /// Assign the next machine line number and bind any pending label.
    fn commit(&mut self, mut entry: MacLine) -> Result<(), Error> {
        entry.mac_line = Some(self.next_mac_line);
        if let Some((label, def_line)) = self.label.take() {
            if self.symbols.insert(label.clone(), self.next_mac_line).is_some() {
                return Err(Error::DuplicateLabel {
                    line: def_line,
                    label,
                });
            }
            entry.label = Some(label);
        }
        if matches!(entry.bits, Bits::Pending(_)) {
            self.unresolved.push(self.entries.len());
        }
        self.entries.push(entry);
        self.next_mac_line += 1;
        Ok(())
    }
}

/// `#name`; no match without a trailing token.
fn try_label<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let mark = cur.mark();
    if !cur.try_char(b'#') {
        return None;
    }
    match cur.try_token() {
        Some(token) => Some(token),
        None => {
            cur.reset(mark);
            None
        }
    }
}
