use ssbcasm::assembler::{Assembler, Config};
use ssbcasm::emit::render;
use ssbcasm::error::Error;

fn assemble_with(cfg: Config, source: &str) -> Result<Vec<String>, Error> {
    let mut asm = Assembler::new(cfg);
    for line in source.lines() {
        asm.line(line)?;
    }
    let prog = asm.finish()?;
    Ok(prog.entries.iter().map(|e| render(e, &cfg)).collect())
}

fn assemble(source: &str) -> Vec<String> {
    assemble_with(Config::default(), source).expect("assembly failed")
}

fn assemble_err(source: &str) -> Error {
    assemble_with(Config::default(), source).expect_err("assembly unexpectedly succeeded")
}

macro_rules! case {
    ($name:ident, $src:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert_eq!(assemble($src), $expect as &[&str]);
        }
    };
}

// --------------------------------------------------------------------------
// opcodes

case!(pushimm_operand, "pushimm 5", &["00000010 pushimm", "00000101 5"]);

case!(
    zero_operand_opcodes,
    "noop halt popinh popext jnz jnn add sub nor",
    &[
        "00000000 noop",
        "00000001 halt",
        "00000100 popinh",
        "00000101 popext",
        "00000110 jnz",
        "00000111 jnn",
        "00001000 add",
        "00001001 sub",
        "00001010 nor",
    ]
);

// --------------------------------------------------------------------------
// literals

case!(negative_byte, "-1", &["11111111 -1"]);

case!(
    decimal_two_bytes_by_magnitude,
    "300",
    &["00000001 300 H", "00101100     L"]
);

case!(one_byte_hex, "0xFF", &["11111111 0xFF"]);

case!(
    two_byte_hex_by_digit_count,
    "0x00FF",
    &["00000000 0x00FF H", "11111111        L"]
);

case!(
    pushext_two_byte_hex,
    "pushext 0x1234",
    &["00000011 pushext", "00010010 0x1234 H", "00110100        L"]
);

case!(
    pushext_byte_then_byte,
    "pushext 0x12 0x34",
    &["00000011 pushext", "00010010 0x12", "00110100 0x34"]
);

case!(
    pushext_second_byte_on_next_line,
    "pushext 0x12\n0x34",
    &["00000011 pushext", "00010010 0x12", "00110100 0x34"]
);

case!(
    pushext_small_decimal_padded,
    "pushext 5",
    &["00000011 pushext", "00000000 5 H", "00000101   L"]
);

// --------------------------------------------------------------------------
// labels and addresses

case!(
    forward_reference,
    "pushext @target\n\
     noop\nnoop\nnoop\nnoop\nnoop\nnoop\nnoop\n\
     #target halt",
    &[
        "00000011 pushext",
        "00000000 @target.H",
        "00001010 @target.L",
        "00000000 noop",
        "00000000 noop",
        "00000000 noop",
        "00000000 noop",
        "00000000 noop",
        "00000000 noop",
        "00000000 noop",
        "00000001 halt #target",
    ]
);

case!(
    backward_reference,
    "#start noop\npushext @start",
    &[
        "00000000 noop #start",
        "00000011 pushext",
        "00000000 @start.H",
        "00000000 @start.L",
    ]
);

case!(
    byte_part_with_offset,
    "#top noop\npushimm @top+2.L",
    &["00000000 noop #top", "00000010 pushimm", "00000010 @top+2.L"]
);

case!(
    label_on_own_line_binds_next_byte,
    "#loop\nnoop",
    &["00000000 noop #loop"]
);

// --------------------------------------------------------------------------
// comments and blank lines

case!(blank_line_preserved, "noop\n\nhalt", &["00000000 noop", "", "00000001 halt"]);

case!(comment_only_line, "; hello", &[" ; hello"]);

case!(trailing_comment_attached, "noop ; first", &["00000000 noop ; first"]);

case!(double_slash_comment, "noop // note", &["00000000 noop ; note"]);

// a line with more comments than machine-code entries keeps the surplus
// on its own display lines instead of carrying them over to the next line
case!(
    surplus_comments_stay_on_their_line,
    "noop /* a */ /* b */\nhalt",
    &["00000000 noop ; a", " ; b", "00000001 halt"]
);

case!(
    block_comment_spans_lines,
    "/* multi\nline */ noop",
    &[" ; multi", "00000000 noop ; line"]
);

#[test]
fn comment_noop_padding() {
    let cfg = Config {
        add_noops: true,
        ..Config::default()
    };
    assert_eq!(
        assemble_with(cfg, "; hello").unwrap(),
        &["00000000 ; hello"]
    );
}

#[test]
fn blank_line_noop_padding() {
    let cfg = Config {
        add_noops: true,
        ..Config::default()
    };
    // the synthesized noop occupies a machine line, so the label of the
    // following byte shifts
    assert_eq!(
        assemble_with(cfg, "\n#start halt\npushext @start").unwrap(),
        &[
            "00000000",
            "00000001 halt #start",
            "00000011 pushext",
            "00000000 @start.H",
            "00000001 @start.L",
        ]
    );
}

#[test]
fn hex_line_numbers() {
    let cfg = Config {
        hex_line_numbers: true,
        ..Config::default()
    };
    assert_eq!(
        assemble_with(cfg, "pushimm 5\n; note").unwrap(),
        &["0x0000 00000010 pushimm", "0x0001 00000101 5", " ; note"]
    );
}

// --------------------------------------------------------------------------
// errors

#[test]
fn width_mismatch_two_byte_hex_for_pushimm() {
    assert!(matches!(
        assemble_err("pushimm 0x1FF"),
        Error::WidthMismatch { line: 1, expect: 1, .. }
    ));
}

#[test]
fn width_mismatch_large_decimal_for_pushimm() {
    assert!(matches!(
        assemble_err("pushimm 300"),
        Error::WidthMismatch { expect: 1, .. }
    ));
}

#[test]
fn full_address_rejected_for_one_byte_operand() {
    assert!(matches!(
        assemble_err("#x noop\npushimm @x"),
        Error::AddressWidth { line: 2, .. }
    ));
}

#[test]
fn duplicate_label() {
    assert!(matches!(
        assemble_err("#a noop\n#a halt"),
        Error::DuplicateLabel { line: 2, .. }
    ));
}

#[test]
fn unresolved_label() {
    assert!(matches!(
        assemble_err("pushext @nowhere"),
        Error::UnresolvedLabel { line: 1, .. }
    ));
}

#[test]
fn address_out_of_range() {
    assert!(matches!(
        assemble_err("#a noop\npushext @a-5"),
        Error::AddressRange { value: -5, .. }
    ));
}

#[test]
fn overflow_decimal() {
    assert!(matches!(
        assemble_err("40000"),
        Error::Overflow { line: 1, .. }
    ));
}

#[test]
fn unknown_token() {
    assert!(matches!(
        assemble_err("frobnicate"),
        Error::UnknownToken { line: 1, .. }
    ));
}

#[test]
fn second_label_while_one_pending() {
    assert!(matches!(
        assemble_err("#a #b"),
        Error::LabelPending { line: 1, .. }
    ));
}

#[test]
fn unclosed_block_comment() {
    assert!(matches!(
        assemble_err("noop\n/* never closed"),
        Error::UnclosedComment { line: 2 }
    ));
}

#[test]
fn syntax_error_names_remainder() {
    match assemble_err("noop $$$") {
        Error::Syntax { line, rest } => {
            assert_eq!(line, 1);
            assert_eq!(rest, "$$$");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
