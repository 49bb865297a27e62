use crate::errors::Result;
use crate::traits::ReadExt;
use crate::{classify, fields, DecodeError, Form, InstructionRecord, ModRm, OpCode};
use sim86_instruction::{Instruction, OperandSize};
use tracing::debug;

enum State {
    AwaitingOpCode,
    AwaitingModRm {
        direction: bool,
        operand_size: OperandSize,
    },
    AwaitingTrailingBytes {
        record: InstructionRecord,
        byte_count: usize,
    },
    Complete(InstructionRecord),
}

/// Run a single decode cycle over `it` and return the decoded fields without rendering them.
///
/// On failure nothing of the partially decoded instruction is returned, but the bytes that were
/// read up to that point are consumed.
pub fn decode_record(it: &mut impl Iterator<Item = u8>) -> Result<InstructionRecord> {
    let mut state = State::AwaitingOpCode;

    loop {
        state = match state {
            State::AwaitingOpCode => {
                let op_code = it.read_u8().map_err(|_| DecodeError::EndOfInput)?;
                let op = classify(op_code)?;

                debug!("op code {:#04x} classified as {:?}", op_code, op);

                match op {
                    // 1 0 1 1 w reg | data | data if w = 1
                    OpCode::ImmediateToRegister { operand_size, reg } => {
                        State::AwaitingTrailingBytes {
                            record: InstructionRecord {
                                operand_size,
                                reg,
                                form: Form::Immediate(0),
                            },
                            byte_count: operand_size.byte_size(),
                        }
                    }

                    // 1 0 0 0 1 0 d w | mod reg r/m
                    OpCode::RegisterOrMemoryToRegister {
                        reg_is_destination,
                        operand_size,
                    } => State::AwaitingModRm {
                        direction: reg_is_destination,
                        operand_size,
                    },
                }
            }

            State::AwaitingModRm {
                direction,
                operand_size,
            } => {
                let mrrm_byte = it.read_u8()?;
                let mod_rm = ModRm::from_byte(mrrm_byte);

                State::AwaitingTrailingBytes {
                    record: InstructionRecord {
                        operand_size,
                        reg: fields::REG.extract(mrrm_byte),
                        form: Form::RegisterOrMemory {
                            direction,
                            mod_rm,
                            displacement: None,
                        },
                    },
                    byte_count: mod_rm.displacement_size(),
                }
            }

            State::AwaitingTrailingBytes {
                mut record,
                byte_count,
            } => {
                record.form = match record.form {
                    Form::Immediate(_) => Form::Immediate(it.read_immediate(record.operand_size)?),

                    // Register mode and memory without displacement have nothing to read.
                    Form::RegisterOrMemory { direction, mod_rm, .. } => Form::RegisterOrMemory {
                        direction,
                        mod_rm,
                        displacement: match byte_count {
                            0 => None,
                            _ => Some(it.read_displacement(byte_count)?),
                        },
                    },
                };

                State::Complete(record)
            }

            State::Complete(record) => return Ok(record),
        }
    }
}

/// Takes a byte iterator and tries to decode the next [Instruction] from it.
pub fn decode_instruction(it: &mut impl Iterator<Item = u8>) -> Result<Instruction> {
    match decode_record(it) {
        Ok(record) => {
            let instruction = record.to_instruction();
            debug!(
                "decoded {:?} ({:?}) as \"{}\"",
                record,
                record.family(),
                instruction
            );
            Ok(instruction)
        }

        Err(DecodeError::EndOfInput) => Err(DecodeError::EndOfInput),

        Err(err) => {
            debug!("could not decode instruction: {}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "_tests/decode.rs"]
mod tests;
