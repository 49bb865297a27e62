//! Bit fields of the op code byte and the mod reg r/m byte.
//!
//! ```text
//! MOV immediate to register:           1 0 1 1 w reg | data | data if w = 1
//! MOV register/memory to/from register: 1 0 0 0 1 0 d w | mod reg r/m | disp-lo | disp-hi
//! ```

/// Pull the field selected by `mask` out of `byte` and shift it down by `shift` bits.
#[inline]
pub const fn extract(byte: u8, mask: u8, shift: u8) -> u8 {
    (byte & mask) >> shift
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    mask: u8,
    shift: u8,
}

impl Field {
    /// A field is a contiguous run of bits; the shift is implied by the lowest set bit of the mask.
    pub const fn new(mask: u8) -> Self {
        Self {
            mask,
            shift: mask.trailing_zeros() as u8,
        }
    }

    #[inline]
    pub const fn extract(self, byte: u8) -> u8 {
        extract(byte, self.mask, self.shift)
    }
}

pub const IMMEDIATE_OP_CODE: Field = Field::new(0b1111_0000);
pub const IMMEDIATE_W: Field = Field::new(0b0000_1000);
pub const IMMEDIATE_REG: Field = Field::new(0b0000_0111);

pub const REG_MEM_OP_CODE: Field = Field::new(0b1111_1100);
pub const D: Field = Field::new(0b0000_0010);
pub const W: Field = Field::new(0b0000_0001);

pub const MOD: Field = Field::new(0b1100_0000);
pub const REG: Field = Field::new(0b0011_1000);
pub const RM: Field = Field::new(0b0000_0111);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_code_fields() {
        let op_code = 0b1000_1001;
        assert_eq!(REG_MEM_OP_CODE.extract(op_code), 0b10_0010);
        assert_eq!(D.extract(op_code), 0);
        assert_eq!(W.extract(op_code), 1);

        let op_code = 0b1011_0011;
        assert_eq!(IMMEDIATE_OP_CODE.extract(op_code), 0b1011);
        assert_eq!(IMMEDIATE_W.extract(op_code), 0);
        assert_eq!(IMMEDIATE_REG.extract(op_code), 0b011);
    }

    #[test]
    fn mod_reg_rm_fields() {
        let mrrm = 0b10_001_100;
        assert_eq!(MOD.extract(mrrm), 0b10);
        assert_eq!(REG.extract(mrrm), 0b001);
        assert_eq!(RM.extract(mrrm), 0b100);
    }

    #[test]
    fn explicit_shift() {
        assert_eq!(extract(0b1101_1001, 0b0011_1000, 3), 0b011);
        assert_eq!(REG, Field { mask: 0b0011_1000, shift: 3 });
    }
}
