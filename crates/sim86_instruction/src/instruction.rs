use crate::{Operand, RenderedOperands};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Mov,
}

impl Operation {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Mov => "mov",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Representation of a decoded 8086 instruction.
///
/// ```rust
/// use sim86_instruction::*;
///
/// // mov [si - 300], cx
/// let i = Instruction::new(
///     Operation::Mov,
///     Operand::Indirect(AddressingMode::Si, -300),
///     Operand::Register(SizedRegister(Register::ClCx, OperandSize::Word)),
/// );
/// assert_eq!(i.to_string(), "mov [si - 300], cx");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub destination: Operand,
    pub source: Operand,
}

impl Instruction {
    pub fn new(operation: Operation, destination: Operand, source: Operand) -> Self {
        Self {
            operation,
            destination,
            source,
        }
    }

    pub fn render(&self) -> RenderedOperands {
        RenderedOperands::of(self)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render().into_line())
    }
}
