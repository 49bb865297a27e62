use crate::{DecodeError, Result};
use sim86_instruction::OperandSize;

pub trait OpCodeExt {
    fn operand_size(self) -> OperandSize;
}

impl OpCodeExt for u8 {
    /// Interpret the lowest bit as the `w` flag.
    fn operand_size(self) -> OperandSize {
        if self & 1 == 0 {
            OperandSize::Byte
        } else {
            OperandSize::Word
        }
    }
}

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }

    /// Read `byte_count` (0, 1 or 2) displacement bytes. A single byte is sign-extended.
    fn read_displacement(&mut self, byte_count: usize) -> Result<i16> {
        Ok(match byte_count {
            0 => 0,
            1 => self.read_u8()? as i8 as i16,
            _ => self.read_u16()? as i16,
        })
    }

    fn read_immediate(&mut self, operand_size: OperandSize) -> Result<u16> {
        Ok(match operand_size {
            OperandSize::Byte => self.read_u8()? as u16,
            OperandSize::Word => self.read_u16()?,
        })
    }
}

impl<T: Iterator<Item = u8>> ReadExt for T {
    fn read_u8(&mut self) -> Result<u8> {
        if let Some(byte) = self.next() {
            Ok(byte)
        } else {
            Err(DecodeError::UnexpectedEndOfStream)
        }
    }
}
