use color_print::cprintln;
use thiserror::Error;

/// Every variant is fatal: the run aborts and no output file is written.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not parse: `{rest}`")]
    Syntax { line: usize, rest: String },

    #[error("unclosed block comment")]
    UnclosedComment { line: usize },

    #[error("expected {expect} byte value for operation: `{op}`")]
    WidthMismatch { line: usize, op: String, expect: u8 },

    #[error(
        "expected 1 byte value for operation: `{op}`, received full address reference `@{label}`; \
         use `@{label}.H` or `@{label}.L` for the high or low byte of the address"
    )]
    AddressWidth { line: usize, op: String, label: String },

    #[error("number too large to convert: `{text}`")]
    Overflow { line: usize, text: String },

    #[error("address label used already: `{label}`")]
    DuplicateLabel { line: usize, label: String },

    #[error("label `#{pending}` is still unbound; a label must precede a machine code byte")]
    LabelPending { line: usize, pending: String },

    #[error("unrecognized address label: `{label}`")]
    UnresolvedLabel { line: usize, label: String },

    #[error("address out of range: `{label}` resolves to line {value}")]
    AddressRange { line: usize, label: String, value: i64 },

    #[error("unrecognized token: `{token}`")]
    UnknownToken { line: usize, token: String },

    #[error("failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Source line the diagnostic points at (1-based), if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::UnclosedComment { line }
            | Error::WidthMismatch { line, .. }
            | Error::AddressWidth { line, .. }
            | Error::Overflow { line, .. }
            | Error::DuplicateLabel { line, .. }
            | Error::LabelPending { line, .. }
            | Error::UnresolvedLabel { line, .. }
            | Error::AddressRange { line, .. }
            | Error::UnknownToken { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Print the error with the file location and raw line content.
    pub fn print_diag(&self, path: &str, lines: &[String]) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Some(no) = self.line() {
            let raw = lines
                .get(no - 1)
                .map(|s| s.as_str())
                .unwrap_or("");
            cprintln!("     <blue>--></> <underline>{}:{}</>", path, no);
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", no, raw);
            cprintln!("      <blue>|</>");
        }
    }
}
