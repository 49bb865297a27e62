use super::*;
use crate::{Family, Mode};
use sim86_instruction::{AddressingMode, Operand, Operation, Register, SizedRegister};

fn decode(bytes: &[u8]) -> Result<String> {
    let mut it = bytes.iter().copied();
    decode_instruction(&mut it).map(|instruction| instruction.to_string())
}

macro_rules! test_decoder {
    ($bytes:expr, $expected:expr) => {{
        assert_eq!(decode(&$bytes), Ok($expected.to_string()));
    }};
}

#[test]
fn register_to_register() {
    test_decoder!([0b1000_1001, 0b1101_1001], "mov cx, bx");
    test_decoder!([0x88, 0xE5], "mov ch, ah");
    test_decoder!([0x89, 0xDE], "mov si, bx");
    test_decoder!([0x8B, 0xDE], "mov bx, si");
    test_decoder!([0x8A, 0xC4], "mov al, ah");
}

#[test]
fn memory_with_word_displacement() {
    test_decoder!(
        [0b1000_1001, 0b1000_1100, 0b1101_0100, 0b1111_1110],
        "mov [si - 300], cx"
    );
    test_decoder!([0x8B, 0x81, 0x87, 0x13], "mov ax, [bx + di + 4999]");
    test_decoder!([0x89, 0x89, 0x87, 0x13], "mov [bx + di + 4999], cx");
}

#[test]
fn memory_with_byte_displacement() {
    test_decoder!([0x8A, 0x60, 0x04], "mov ah, [bx + si + 4]");
    test_decoder!([0x88, 0x47, 0xFF], "mov [bx - 1], al");
    test_decoder!([0x8B, 0x56, 0xDB], "mov dx, [bp - 37]");
    test_decoder!([0x88, 0x6E, 0x00], "mov [bp], ch");
}

#[test]
fn memory_without_displacement() {
    test_decoder!([0x8A, 0x00], "mov al, [bx + si]");
    test_decoder!([0x8B, 0x1B], "mov bx, [bp + di]");
    test_decoder!([0x89, 0x15], "mov [di], dx");

    let mut it = [0x89_u8, 0x15, 0xAA].into_iter();
    let record = decode_record(&mut it).unwrap();
    assert!(matches!(
        record.form,
        Form::RegisterOrMemory {
            displacement: None,
            ..
        }
    ));
    assert_eq!(it.next(), Some(0xAA));
}

#[test]
fn immediate_to_register() {
    test_decoder!([0b1011_0011, 0x03], "mov bl, 3");
    test_decoder!([0xB1, 0x0C], "mov cl, 12");
    test_decoder!([0xB5, 0xF4], "mov ch, 244");
    test_decoder!([0xB9, 0x0C, 0x00], "mov cx, 12");
    test_decoder!([0xBA, 0x6C, 0x0F], "mov dx, 3948");
    test_decoder!([0xBB, 0x03, 0x01], "mov bx, 259");
    test_decoder!([0xB9, 0xF4, 0xFF], "mov cx, 65524");
}

#[test]
fn direct_address() {
    test_decoder!([0x8B, 0x2E, 0x05, 0x00], "mov bp, [5]");
    test_decoder!([0x8B, 0x1E, 0x82, 0x0D], "mov bx, [3458]");
    test_decoder!([0x89, 0x0E, 0x10, 0x00], "mov [16], cx");
}

#[test]
fn direct_address_consumes_two_bytes() {
    let bytes = [0x8B, 0b00_000_110, 0x34, 0x12, 0xAA];
    let mut it = bytes.iter().copied();

    let record = decode_record(&mut it).unwrap();
    assert_eq!(
        record.form,
        Form::RegisterOrMemory {
            direction: true,
            mod_rm: ModRm {
                mode: Mode::Memory,
                rm: 0b110
            },
            displacement: Some(0x1234),
        }
    );
    assert_eq!(
        record.to_instruction().source,
        Operand::Direct(0x1234)
    );
    assert_eq!(it.collect::<Vec<_>>(), vec![0xAA]);
}

#[test]
fn register_mode_never_reads_trailing_bytes() {
    let sentinel = 0xAA;

    for d in 0..2_u8 {
        for w in 0..2_u8 {
            for reg in 0..8_u8 {
                for rm in 0..8_u8 {
                    let op_code = 0b1000_1000 | d << 1 | w;
                    let mrrm = 0b1100_0000 | reg << 3 | rm;
                    let bytes = [op_code, mrrm, sentinel];
                    let mut it = bytes.iter().copied();

                    let record = decode_record(&mut it).unwrap();
                    assert_eq!(record.family(), Family::RegisterOrMemoryToRegister);
                    assert_eq!(record.operand_size.byte_size(), w as usize + 1);
                    assert_eq!(record.reg, reg);
                    assert_eq!(
                        record.form,
                        Form::RegisterOrMemory {
                            direction: d == 1,
                            mod_rm: ModRm {
                                mode: Mode::Register,
                                rm
                            },
                            displacement: None,
                        }
                    );
                    assert_eq!(it.next(), Some(sentinel));

                    let reg_operand = Operand::Register(SizedRegister(
                        Register::from_encoding(reg),
                        record.operand_size,
                    ));
                    let rm_operand = Operand::Register(SizedRegister(
                        Register::from_encoding(rm),
                        record.operand_size,
                    ));
                    let expected = if d == 1 {
                        Instruction::new(Operation::Mov, reg_operand, rm_operand)
                    } else {
                        Instruction::new(Operation::Mov, rm_operand, reg_operand)
                    };
                    assert_eq!(record.to_instruction(), expected);
                }
            }
        }
    }
}

#[test]
fn single_displacement_byte_keeps_its_sign() {
    for displacement in i8::MIN..=i8::MAX {
        let bytes = [0x8B, 0b01_000_100, displacement as u8];
        let mut it = bytes.iter().copied();

        let instruction = decode_instruction(&mut it).unwrap();
        assert_eq!(
            instruction.source,
            Operand::Indirect(AddressingMode::Si, displacement as i16)
        );
    }

    test_decoder!([0x8B, 0b01_000_100, 0xFF], "mov ax, [si - 1]");
}

#[test]
fn immediate_records() {
    let mut it = [0xBB_u8, 0x03, 0x01].into_iter();
    let record = decode_record(&mut it).unwrap();
    assert_eq!(record.family(), Family::ImmediateToRegister);
    assert_eq!(record.operand_size, OperandSize::Word);
    assert_eq!(record.form, Form::Immediate(259));

    let mut it = [0xB3_u8, 0x03, 0x01].into_iter();
    let record = decode_record(&mut it).unwrap();
    assert_eq!(record.operand_size, OperandSize::Byte);
    assert_eq!(record.form, Form::Immediate(3));
    assert_eq!(it.next(), Some(0x01));
}

#[test]
fn truncated_streams() {
    let tests: [&[u8]; 6] = [
        &[0b1000_1001],
        &[0x89, 0b1000_1100],
        &[0x89, 0b1000_1100, 0xD4],
        &[0x8B, 0x06, 0x10],
        &[0x88, 0x47],
        &[0xB8, 0x01],
    ];

    for bytes in tests {
        assert_eq!(
            decode(bytes),
            Err(DecodeError::UnexpectedEndOfStream),
            "{:02X?}",
            bytes
        );
    }

    assert_eq!(decode(&[0xB0]), Err(DecodeError::UnexpectedEndOfStream));
}

#[test]
fn empty_stream() {
    assert_eq!(decode(&[]), Err(DecodeError::EndOfInput));
}

#[test]
fn unrecognized_op_code() {
    assert_eq!(decode(&[0x00, 0x00]), Err(DecodeError::UnrecognizedOpcode(0x00)));
    // mov r/m16, segment register is not one of the supported encodings.
    assert_eq!(decode(&[0x8C, 0xD8]), Err(DecodeError::UnrecognizedOpcode(0x8C)));
    assert_eq!(decode(&[0xC6, 0x03, 0x07]), Err(DecodeError::UnrecognizedOpcode(0xC6)));
}

#[test]
fn sequence_of_instructions() {
    let bytes = [0x89, 0xD9, 0x88, 0xE5, 0xB3, 0x03];
    let mut it = bytes.iter().copied();

    let mut lines = vec![];
    loop {
        match decode_instruction(&mut it) {
            Ok(instruction) => lines.push(instruction.to_string()),
            Err(DecodeError::EndOfInput) => break,
            Err(err) => panic!("{}", err),
        }
    }

    assert_eq!(lines, vec!["mov cx, bx", "mov ch, ah", "mov bl, 3"]);
}
