use crate::Instruction;

/// The mnemonic and both operands of an [Instruction], each rendered into its own string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedOperands {
    pub mnemonic: String,
    pub destination: String,
    pub source: String,
}

impl RenderedOperands {
    pub fn of(instruction: &Instruction) -> Self {
        Self {
            mnemonic: instruction.operation.mnemonic().to_string(),
            destination: instruction.destination.to_string(),
            source: instruction.source.to_string(),
        }
    }

    pub fn into_line(self) -> String {
        format_line(&self.mnemonic, &self.destination, &self.source)
    }
}

/// Join a mnemonic and its operands into a single line of assembly.
pub fn format_line(mnemonic: &str, destination: &str, source: &str) -> String {
    format!("{} {}, {}", mnemonic, destination, source)
}
