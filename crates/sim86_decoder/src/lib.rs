//! Decoder for the 8086 `mov` encodings that move data between registers, memory and immediates.

mod decode;
mod errors;
pub mod fields;
mod opcode;
mod record;
mod stream;
mod traits;

pub use decode::{decode_instruction, decode_record};
pub use errors::{DecodeError, Result};
pub use opcode::{classify, Family, OpCode};
pub use record::{Form, InstructionRecord, Mode, ModRm};
pub use stream::{disassemble, Decoded, Decoder};
