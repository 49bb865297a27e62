//! This crate holds the structs and lookup tables used to represent a decoded 8086 `mov`
//! instruction, as well as the code that renders it as assembly text.

mod display;
mod instruction;
mod operand;
mod register;

pub use display::{format_line, RenderedOperands};
pub use instruction::{Instruction, Operation};
pub use operand::{AddressingMode, Operand, OperandSize};
pub use register::{Register, SizedRegister};
