use crate::OperandSize;
use std::fmt::{Display, Formatter};

/// A general purpose register as encoded in the `reg` and `r/m` fields. Which half of the pair is
/// meant depends on the operand size of the instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    AlAx,
    ClCx,
    DlDx,
    BlBx,
    AhSp,
    ChBp,
    DhSi,
    BhDi,
}

impl Register {
    /// Map a 3-bit register encoding to a [Register].
    pub fn from_encoding(encoding: u8) -> Self {
        use Register::*;

        debug_assert!(encoding <= 0b111);

        match encoding & 0b111 {
            0b000 => AlAx,
            0b001 => ClCx,
            0b010 => DlDx,
            0b011 => BlBx,
            0b100 => AhSp,
            0b101 => ChBp,
            0b110 => DhSi,
            0b111 => BhDi,

            _ => unreachable!(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizedRegister(pub Register, pub OperandSize);

impl SizedRegister {
    pub fn name(&self) -> &'static str {
        use Register::*;

        match self.1 {
            OperandSize::Byte => match self.0 {
                AlAx => "al",
                ClCx => "cl",
                DlDx => "dl",
                BlBx => "bl",
                AhSp => "ah",
                ChBp => "ch",
                DhSi => "dh",
                BhDi => "bh",
            },

            OperandSize::Word => match self.0 {
                AlAx => "ax",
                ClCx => "cx",
                DlDx => "dx",
                BlBx => "bx",
                AhSp => "sp",
                ChBp => "bp",
                DhSi => "si",
                BhDi => "di",
            },
        }
    }
}

impl Display for SizedRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
