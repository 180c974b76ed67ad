// ----------------------------------------------------------------------------
// Character-level scanning over one source line.
//
// Every try-parser either consumes the matched construct and returns its
// value, or restores the scan position and reports no match. Whitespace is
// skipped before every attempt.

pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.line.as_bytes().get(self.pos).copied()
    }

    pub fn mark(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn skip_space(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    pub fn at_end(&mut self) -> bool {
        self.skip_space();
        self.pos >= self.line.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.line.len();
        rest
    }

    pub fn try_char(&mut self, c: u8) -> bool {
        let mark = self.pos;
        self.skip_space();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            self.pos = mark;
            false
        }
    }

    pub fn try_str(&mut self, pat: &str) -> bool {
        let mark = self.pos;
        self.skip_space();
        if self.line[self.pos..].starts_with(pat) {
            self.pos += pat.len();
            true
        } else {
            self.pos = mark;
            false
        }
    }

    /// A token is a maximal run of alphanumerics and underscores.
    pub fn try_token(&mut self) -> Option<&'a str> {
        let mark = self.pos;
        self.skip_space();
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        if self.pos == start {
            self.pos = mark;
            None
        } else {
            Some(&self.line[start..self.pos])
        }
    }

    /// Decimal literal with an optional leading sign.
    /// Returns the matched text and its value; digits beyond the i64
    /// range saturate, which callers reject as overflow anyway.
    pub fn try_decimal(&mut self) -> Option<(&'a str, i64)> {
        let mark = self.pos;
        self.skip_space();
        let start = self.pos;
        let mut sign = 1i64;
        match self.peek() {
            Some(b'-') => {
                sign = -1;
                self.pos += 1;
            }
            Some(b'+') => {
                self.pos += 1;
            }
            _ => {}
        }
        let digits = self.pos;
        let mut value = 0i64;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
            self.pos += 1;
        }
        if self.pos == digits {
            self.pos = mark;
            return None;
        }
        Some((&self.line[start..self.pos], sign * value))
    }

    /// Decimal digits only, no sign.
    pub fn try_unsigned(&mut self) -> Option<(&'a str, i64)> {
        let mark = self.pos;
        self.skip_space();
        let start = self.pos;
        let mut value = 0i64;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
            self.pos += 1;
        }
        if self.pos == start {
            self.pos = mark;
            return None;
        }
        Some((&self.line[start..self.pos], value))
    }

    /// `0x`/`0X` literal whose digit count falls in `min..=max`.
    /// The digit count, not the magnitude, decides the byte width the
    /// caller assumes: `0xFF` is one byte, `0x00FF` is two.
    pub fn try_hex(&mut self, min: usize, max: usize) -> Option<(&'a str, i64)> {
        let mark = self.pos;
        self.skip_space();
        let start = self.pos;
        if !self.try_prefix("0x") && !self.try_prefix("0X") {
            self.pos = mark;
            return None;
        }
        let digits = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        let count = self.pos - digits;
        if count < min || count > max {
            self.pos = mark;
            return None;
        }
        match i64::from_str_radix(&self.line[digits..self.pos], 16) {
            Ok(value) => Some((&self.line[start..self.pos], value)),
            Err(_) => {
                self.pos = mark;
                None
            }
        }
    }

    fn try_prefix(&mut self, pat: &str) -> bool {
        if self.line[self.pos..].starts_with(pat) {
            self.pos += pat.len();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        let mut cur = Cursor::new("  pushimm my_label2 ");
        assert_eq!(cur.try_token(), Some("pushimm"));
        assert_eq!(cur.try_token(), Some("my_label2"));
        assert_eq!(cur.try_token(), None);
        assert!(cur.at_end());
    }

    #[test]
    fn no_partial_advance() {
        let mut cur = Cursor::new(" @label");
        assert!(!cur.try_str("//"));
        assert_eq!(cur.mark(), 0);
        assert!(cur.try_char(b'@'));
        assert_eq!(cur.try_token(), Some("label"));
    }

    #[test]
    fn decimal() {
        let mut cur = Cursor::new("-12 +3 9 x");
        assert_eq!(cur.try_decimal(), Some(("-12", -12)));
        assert_eq!(cur.try_decimal(), Some(("+3", 3)));
        assert_eq!(cur.try_decimal(), Some(("9", 9)));
        assert_eq!(cur.try_decimal(), None);
    }

    #[test]
    fn unsigned() {
        let mut cur = Cursor::new("12 -3");
        assert_eq!(cur.try_unsigned(), Some(("12", 12)));
        assert_eq!(cur.try_unsigned(), None);
        assert_eq!(cur.try_decimal(), Some(("-3", -3)));
    }

    #[test]
    fn hex_digit_count() {
        let mut cur = Cursor::new("0xFF");
        assert_eq!(cur.try_hex(3, 4), None);
        assert_eq!(cur.try_hex(1, 2), Some(("0xFF", 0xFF)));

        let mut cur = Cursor::new("0x00FF");
        assert_eq!(cur.try_hex(1, 2), None);
        assert_eq!(cur.try_hex(3, 4), Some(("0x00FF", 0xFF)));

        // five digits match neither width
        let mut cur = Cursor::new("0x12345");
        assert_eq!(cur.try_hex(1, 2), None);
        assert_eq!(cur.try_hex(3, 4), None);
    }

    #[test]
    fn hex_case() {
        let mut cur = Cursor::new("0X1a");
        assert_eq!(cur.try_hex(1, 2), Some(("0X1a", 0x1A)));
    }
}
