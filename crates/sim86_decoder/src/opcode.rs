use crate::errors::Result;
use crate::fields::{self, Field};
use crate::traits::OpCodeExt;
use crate::DecodeError;
use sim86_instruction::OperandSize;

/// The two `mov` encodings understood by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    /// `1 0 0 0 1 0 d w`
    RegisterOrMemoryToRegister,
    /// `1 0 1 1 w reg`
    ImmediateToRegister,
}

struct Pattern {
    family: Family,
    op_code: Field,
    value: u8,
}

impl Pattern {
    fn matches(&self, byte: u8) -> bool {
        self.op_code.extract(byte) == self.value
    }
}

// Checked in order: the 4-bit immediate op code has to be tried before the 6-bit one.
static PATTERNS: [Pattern; 2] = [
    Pattern {
        family: Family::ImmediateToRegister,
        op_code: fields::IMMEDIATE_OP_CODE,
        value: 0b1011,
    },
    Pattern {
        family: Family::RegisterOrMemoryToRegister,
        op_code: fields::REG_MEM_OP_CODE,
        value: 0b10_0010,
    },
];

impl Family {
    /// Returns the first family whose op code pattern matches `byte`.
    pub fn of(byte: u8) -> Option<Family> {
        PATTERNS
            .iter()
            .find(|pattern| pattern.matches(byte))
            .map(|pattern| pattern.family)
    }
}

/// The fields carried by the op code byte itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpCode {
    ImmediateToRegister {
        operand_size: OperandSize,
        reg: u8,
    },
    RegisterOrMemoryToRegister {
        reg_is_destination: bool,
        operand_size: OperandSize,
    },
}

/// Classify an op code byte into one of the known [Family] encodings.
pub fn classify(op_code: u8) -> Result<OpCode> {
    match Family::of(op_code) {
        Some(Family::ImmediateToRegister) => Ok(OpCode::ImmediateToRegister {
            operand_size: fields::IMMEDIATE_W.extract(op_code).operand_size(),
            reg: fields::IMMEDIATE_REG.extract(op_code),
        }),

        Some(Family::RegisterOrMemoryToRegister) => Ok(OpCode::RegisterOrMemoryToRegister {
            reg_is_destination: fields::D.extract(op_code) == 1,
            operand_size: fields::W.extract(op_code).operand_size(),
        }),

        None => Err(DecodeError::UnrecognizedOpcode(op_code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_family_is_tried_first() {
        assert_eq!(
            PATTERNS.iter().map(|p| p.family).collect::<Vec<_>>(),
            vec![
                Family::ImmediateToRegister,
                Family::RegisterOrMemoryToRegister
            ]
        );
    }

    #[test]
    fn classify_register_or_memory() {
        let tests = [
            (0x88, false, OperandSize::Byte),
            (0x89, false, OperandSize::Word),
            (0x8A, true, OperandSize::Byte),
            (0x8B, true, OperandSize::Word),
        ];

        for (op_code, reg_is_destination, operand_size) in tests {
            assert_eq!(
                classify(op_code),
                Ok(OpCode::RegisterOrMemoryToRegister {
                    reg_is_destination,
                    operand_size
                })
            );
        }
    }

    #[test]
    fn classify_immediate() {
        for op_code in 0xB0..=0xBF_u8 {
            let expected_size = if op_code >= 0xB8 {
                OperandSize::Word
            } else {
                OperandSize::Byte
            };

            assert_eq!(
                classify(op_code),
                Ok(OpCode::ImmediateToRegister {
                    operand_size: expected_size,
                    reg: op_code & 0b111,
                })
            );
        }
    }

    #[test]
    fn unrecognized_op_codes() {
        for op_code in 0..=0xFF_u8 {
            if (0x88..=0x8B).contains(&op_code) || (0xB0..=0xBF).contains(&op_code) {
                continue;
            }
            assert_eq!(
                classify(op_code),
                Err(DecodeError::UnrecognizedOpcode(op_code))
            );
        }
    }
}
