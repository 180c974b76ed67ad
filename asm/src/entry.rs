use crate::addr::AddressPart;

/// One line of assembled output. Committed entries carry a unique,
/// monotonically increasing machine line number; display-only entries
/// (blank lines, orphaned comments) carry none and are invisible to
/// addressing.
#[derive(Debug, Clone)]
pub struct MacLine {
    /// 1-based source line that produced this entry.
    pub src_line: usize,
    /// Final 0-based position in program memory.
    pub mac_line: Option<usize>,
    pub bits: Bits,
    /// Mnemonic/literal annotation shown next to the bits.
    pub text: String,
    /// Label bound to exactly this machine line.
    pub label: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Bits {
    /// Display-only line, no byte emitted.
    None,
    /// Resolved 8-character binary digit string.
    Code(String),
    /// Awaiting pass-2 resolution of a label reference.
    Pending(AddressPart),
}

impl MacLine {
    pub fn display(src_line: usize) -> Self {
        Self {
            src_line,
            mac_line: None,
            bits: Bits::None,
            text: String::new(),
            label: None,
            comment: None,
        }
    }

    pub fn code(src_line: usize, bits: String, text: String) -> Self {
        Self {
            bits: Bits::Code(bits),
            text,
            ..Self::display(src_line)
        }
    }

    pub fn pending(src_line: usize, text: String, part: AddressPart) -> Self {
        Self {
            bits: Bits::Pending(part),
            text,
            ..Self::display(src_line)
        }
    }

    pub fn is_code(&self) -> bool {
        !matches!(self.bits, Bits::None)
    }
}
