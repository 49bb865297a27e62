use crate::SizedRegister;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSize {
    Byte,
    Word,
}

impl OperandSize {
    /// Number of bytes an operand of this size occupies in the instruction stream.
    pub fn byte_size(self) -> usize {
        match self {
            OperandSize::Byte => 1,
            OperandSize::Word => 2,
        }
    }
}

/// The base/index expression selected by the `r/m` field when `mod` is not `11`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

impl AddressingMode {
    /// With `mod == 00` this encoding does not select `[bp]`, but a direct 16-bit address.
    pub const DIRECT_ENCODING: u8 = 0b110;

    pub fn from_encoding(encoding: u8) -> Self {
        use AddressingMode::*;

        debug_assert!(encoding <= 0b111);

        match encoding & 0b111 {
            0b000 => BxSi,
            0b001 => BxDi,
            0b010 => BpSi,
            0b011 => BpDi,
            0b100 => Si,
            0b101 => Di,
            0b110 => Bp,
            0b111 => Bx,

            _ => unreachable!(),
        }
    }

    pub fn expression(&self) -> &'static str {
        use AddressingMode::*;

        match self {
            BxSi => "bx + si",
            BxDi => "bx + di",
            BpSi => "bp + si",
            BpDi => "bp + di",
            Si => "si",
            Di => "di",
            Bp => "bp",
            Bx => "bx",
        }
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.expression())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// `[address]`
    Direct(u16),
    /// `[base + index +/- displacement]`
    Indirect(AddressingMode, i16),
    Register(SizedRegister),
    Immediate(u16),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Direct(address) => write!(f, "[{}]", address),

            Operand::Indirect(addressing_mode, displacement) => {
                write!(f, "[{}", addressing_mode)?;
                match *displacement {
                    0 => {}
                    d if d < 0 => write!(f, " - {}", d.unsigned_abs())?,
                    d => write!(f, " + {}", d)?,
                }
                write!(f, "]")
            }

            Operand::Register(register) => register.fmt(f),

            Operand::Immediate(value) => write!(f, "{}", value),
        }
    }
}
