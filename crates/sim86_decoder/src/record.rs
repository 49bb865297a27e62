use crate::fields;
use crate::Family;
use sim86_instruction::{
    AddressingMode, Instruction, Operand, OperandSize, Operation, Register, SizedRegister,
};

/// The addressing mode held in the top two bits of the mod reg r/m byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `00`: memory, no displacement (except for the direct address form).
    Memory,
    /// `01`: memory with an 8-bit displacement.
    MemoryByteDisplacement,
    /// `10`: memory with a 16-bit displacement.
    MemoryWordDisplacement,
    /// `11`: register to register.
    Register,
}

impl Mode {
    pub fn from_encoding(encoding: u8) -> Self {
        debug_assert!(encoding <= 0b11);

        match encoding & 0b11 {
            0b00 => Mode::Memory,
            0b01 => Mode::MemoryByteDisplacement,
            0b10 => Mode::MemoryWordDisplacement,
            0b11 => Mode::Register,

            _ => unreachable!(),
        }
    }
}

/// The `mod` and `r/m` fields of a mod reg r/m byte. The `reg` field lives on the record itself,
/// since the immediate encoding carries one as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModRm {
    pub mode: Mode,
    pub rm: u8,
}

impl ModRm {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            mode: Mode::from_encoding(fields::MOD.extract(byte)),
            rm: fields::RM.extract(byte),
        }
    }

    pub fn is_direct_address(&self) -> bool {
        self.mode == Mode::Memory && self.rm == AddressingMode::DIRECT_ENCODING
    }

    /// Number of displacement bytes that follow the mod reg r/m byte.
    pub fn displacement_size(&self) -> usize {
        match self.mode {
            Mode::Memory if self.is_direct_address() => 2,
            Mode::Memory => 0,
            Mode::MemoryByteDisplacement => 1,
            Mode::MemoryWordDisplacement => 2,
            Mode::Register => 0,
        }
    }
}

/// Everything after the op code byte. Which variant is present follows from the family, so a
/// record can never carry both a displacement and an immediate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Form {
    /// `1 0 0 0 1 0 d w | mod reg r/m | disp-lo | disp-hi`
    RegisterOrMemory {
        /// `true` if `reg` names the destination operand.
        direction: bool,
        mod_rm: ModRm,
        /// Resolved (sign-extended) displacement, only present when displacement bytes followed
        /// the mod reg r/m byte. For the direct address form this holds the address itself.
        displacement: Option<i16>,
    },
    /// `1 0 1 1 w reg | data | data if w = 1`
    Immediate(u16),
}

/// All the fields decoded from a single instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionRecord {
    pub operand_size: OperandSize,
    pub reg: u8,
    pub form: Form,
}

impl InstructionRecord {
    pub fn family(&self) -> Family {
        match self.form {
            Form::RegisterOrMemory { .. } => Family::RegisterOrMemoryToRegister,
            Form::Immediate(_) => Family::ImmediateToRegister,
        }
    }

    fn register(&self, encoding: u8) -> Operand {
        Operand::Register(SizedRegister(
            Register::from_encoding(encoding),
            self.operand_size,
        ))
    }

    fn register_or_memory(&self, mod_rm: ModRm, displacement: Option<i16>) -> Operand {
        let displacement = displacement.unwrap_or(0);

        match mod_rm.mode {
            Mode::Register => self.register(mod_rm.rm),
            _ if mod_rm.is_direct_address() => Operand::Direct(displacement as u16),
            _ => Operand::Indirect(AddressingMode::from_encoding(mod_rm.rm), displacement),
        }
    }

    /// Resolve the destination and source operands.
    pub fn operands(&self) -> (Operand, Operand) {
        let reg = self.register(self.reg);

        match self.form {
            Form::Immediate(value) => (reg, Operand::Immediate(value)),

            Form::RegisterOrMemory {
                direction,
                mod_rm,
                displacement,
            } => {
                let reg_mem = self.register_or_memory(mod_rm, displacement);
                if direction {
                    (reg, reg_mem)
                } else {
                    (reg_mem, reg)
                }
            }
        }
    }

    pub fn to_instruction(&self) -> Instruction {
        let (destination, source) = self.operands();
        Instruction::new(Operation::Mov, destination, source)
    }
}
