use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumString};

/// How many operand bytes an opcode expects after its own byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    One,
    Two,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Op {
    #[default]
    Noop = 0,
    Halt = 1,
    PushImm = 2,
    PushExt = 3,
    PopInh = 4,
    PopExt = 5,
    Jnz = 6,
    Jnn = 7,
    Add = 8,
    Sub = 9,
    Nor = 10,
}

impl Op {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn code(&self) -> u8 {
        (*self).into()
    }

    /// Operand bytes the assembler must see after this opcode.
    /// Only pushimm/pushext take inline operands; the rest of the
    /// instruction set is inherent-addressing.
    pub fn operand(&self) -> Width {
        match self {
            Op::PushImm => Width::One,
            Op::PushExt => Width::Two,
            _ => Width::None,
        }
    }
}

#[test]
fn test() {
    assert_eq!(Op::parse("pushimm"), Some(Op::PushImm));
    assert_eq!(Op::parse("nor"), Some(Op::Nor));
    assert_eq!(Op::parse("hoge"), None);
    assert_eq!(Op::PushExt.code(), 3);
    assert_eq!(Op::PushImm.to_string(), "pushimm");
    assert_eq!(Op::Halt.operand(), Width::None);
}
