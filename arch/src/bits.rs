//! Textual machine-code codecs shared by the toolchain.
//!
//! A "mac" file carries one byte of program memory per line, written as
//! an 8-character string of `0`/`1`, most significant bit first.

/// 8-bit binary digit string from a byte, MSB first.
/// e.g. `9` -> `"00001001"`
pub fn byte_to_bits(n: u8) -> String {
    format!("{:08b}", n)
}

/// Byte value of an 8-character binary digit string.
pub fn bits_to_byte(bits: &str) -> Option<u8> {
    if bits.len() != 8 {
        return None;
    }
    u8::from_str_radix(bits, 2).ok()
}

pub fn high_byte(n: u16) -> u8 {
    (n >> 8) as u8
}

pub fn low_byte(n: u16) -> u8 {
    (n & 0xFF) as u8
}

/// `0xNNNN` address notation used for line-number prefixes.
pub fn to_four_hex(n: u16) -> String {
    format!("0x{:04X}", n)
}

/// Maximal leading run of binary digits.
pub fn binary_prefix(s: &str) -> &str {
    let end = s
        .find(|c| c != '0' && c != '1')
        .unwrap_or(s.len());
    &s[..end]
}

/// The first 8 characters of a line, if they are all binary digits.
pub fn leading_byte_bits(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    if bytes.len() >= 8 && bytes[..8].iter().all(|&b| b == b'0' || b == b'1') {
        Some(&line[..8])
    } else {
        None
    }
}
