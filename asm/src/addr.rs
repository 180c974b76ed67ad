// ----------------------------------------------------------------------------
// Address grammar: `@name[+n|-n][.H|.L]`

use std::fmt;

use arch::bits;

use crate::cursor::Cursor;

/// Selects one byte of a two-byte machine line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytePart {
    High,
    Low,
}

/// A pending reference to one byte of a label's machine line.
/// The offset is added to the resolved line before the byte split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPart {
    pub label: String,
    pub part: BytePart,
    pub offset: i64,
}

impl AddressPart {
    /// `@name[+n|-n].H` / `.L`; no match without the byte-part suffix.
    pub fn parse(cur: &mut Cursor) -> Option<AddressPart> {
        let mark = cur.mark();
        let (label, offset) = parse_base(cur)?;
        if !cur.try_char(b'.') {
            cur.reset(mark);
            return None;
        }
        let part = if cur.try_char(b'h') || cur.try_char(b'H') {
            BytePart::High
        } else if cur.try_char(b'l') || cur.try_char(b'L') {
            BytePart::Low
        } else {
            cur.reset(mark);
            return None;
        };
        Some(AddressPart { label, part, offset })
    }

    /// 8-bit encoding of this byte of a resolved machine line.
    pub fn bits_of(&self, resolved: u16) -> String {
        match self.part {
            BytePart::High => bits::byte_to_bits(bits::high_byte(resolved)),
            BytePart::Low => bits::byte_to_bits(bits::low_byte(resolved)),
        }
    }
}

impl fmt::Display for AddressPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_base(f, &self.label, self.offset)?;
        match self.part {
            BytePart::High => write!(f, ".H"),
            BytePart::Low => write!(f, ".L"),
        }
    }
}

/// A full two-byte reference, always emitted as a high/low pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub label: String,
    pub offset: i64,
}

impl Address {
    pub fn parse(cur: &mut Cursor) -> Option<Address> {
        let (label, offset) = parse_base(cur)?;
        Some(Address { label, offset })
    }

    pub fn high(&self) -> AddressPart {
        AddressPart {
            label: self.label.clone(),
            part: BytePart::High,
            offset: self.offset,
        }
    }

    pub fn low(&self) -> AddressPart {
        AddressPart {
            label: self.label.clone(),
            part: BytePart::Low,
            offset: self.offset,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_base(f, &self.label, self.offset)
    }
}

/// `@name` with an optional decimal `+n`/`-n` offset.
fn parse_base(cur: &mut Cursor) -> Option<(String, i64)> {
    let mark = cur.mark();
    if !cur.try_char(b'@') {
        return None;
    }
    let label = match cur.try_token() {
        Some(token) => token.to_string(),
        None => {
            cur.reset(mark);
            return None;
        }
    };
    // the sign is part of the address grammar, so the digits after it
    // may not carry one of their own
    let offset = if cur.try_char(b'-') {
        match cur.try_unsigned() {
            Some((_, n)) => -n,
            None => {
                cur.reset(mark);
                return None;
            }
        }
    } else if cur.try_char(b'+') {
        match cur.try_unsigned() {
            Some((_, n)) => n,
            None => {
                cur.reset(mark);
                return None;
            }
        }
    } else {
        0
    };
    Some((label, offset))
}

fn write_base(f: &mut fmt::Formatter<'_>, label: &str, offset: i64) -> fmt::Result {
    write!(f, "@{}", label)?;
    if offset > 0 {
        write!(f, "+{}", offset)?;
    } else if offset < 0 {
        write!(f, "{}", offset)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_part() {
        let mut cur = Cursor::new("@loop.H");
        let part = AddressPart::parse(&mut cur).unwrap();
        assert_eq!(part.label, "loop");
        assert_eq!(part.part, BytePart::High);
        assert_eq!(part.offset, 0);
        assert_eq!(part.to_string(), "@loop.H");
    }

    #[test]
    fn byte_part_with_offset() {
        let mut cur = Cursor::new("@loop-2.l");
        let part = AddressPart::parse(&mut cur).unwrap();
        assert_eq!(part.offset, -2);
        assert_eq!(part.part, BytePart::Low);
        assert_eq!(part.to_string(), "@loop-2.L");
    }

    #[test]
    fn full_address() {
        let mut cur = Cursor::new("@target+3");
        assert_eq!(AddressPart::parse(&mut cur), None);
        let addr = Address::parse(&mut cur).unwrap();
        assert_eq!(addr.label, "target");
        assert_eq!(addr.offset, 3);
        assert_eq!(addr.to_string(), "@target+3");
        assert_eq!(addr.high().part, BytePart::High);
        assert_eq!(addr.low().offset, 3);
    }

    #[test]
    fn double_sign_rejected() {
        let mut cur = Cursor::new("@x+-3");
        assert_eq!(Address::parse(&mut cur), None);
        assert_eq!(cur.mark(), 0);
        let mut cur = Cursor::new("@x--3");
        assert_eq!(Address::parse(&mut cur), None);
        let mut cur = Cursor::new("@x+-3.L");
        assert_eq!(AddressPart::parse(&mut cur), None);
    }

    #[test]
    fn no_match_leaves_position() {
        let mut cur = Cursor::new("pushimm");
        assert_eq!(Address::parse(&mut cur), None);
        assert_eq!(cur.mark(), 0);
    }

    #[test]
    fn split_bits() {
        let part = AddressPart {
            label: "x".to_string(),
            part: BytePart::High,
            offset: 0,
        };
        assert_eq!(part.bits_of(0x1234), "00010010");
        let part = AddressPart { part: BytePart::Low, ..part };
        assert_eq!(part.bits_of(0x1234), "00110100");
    }
}
