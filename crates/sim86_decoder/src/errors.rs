use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream was exhausted before the first byte of an instruction.
    #[error("End of input")]
    EndOfInput,

    #[error("Unexpected end of stream in the middle of an instruction")]
    UnexpectedEndOfStream,

    #[error("Unrecognized op code ({0:#04x})")]
    UnrecognizedOpcode(u8),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
