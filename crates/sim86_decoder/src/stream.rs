use crate::errors::Result;
use crate::{decode_instruction, DecodeError};
use sim86_instruction::Instruction;

/// An instruction along with where it was found and the bytes it was decoded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub offset: usize,
    pub bytes: Vec<u8>,
    pub instruction: Instruction,
}

/// Records every byte pulled through it.
struct Recorder<'a, I> {
    inner: &'a mut I,
    bytes: Vec<u8>,
}

impl<I: Iterator<Item = u8>> Iterator for Recorder<'_, I> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = self.inner.next()?;
        self.bytes.push(byte);
        Some(byte)
    }
}

/// Decodes instructions one after the other from a byte iterator, keeping track of the offset
/// into the stream.
///
/// Bytes consumed by a failed decode are not given back, so after an
/// [DecodeError::UnrecognizedOpcode] decoding resumes at the byte following the op code.
pub struct Decoder<I> {
    it: I,
    position: usize,
}

impl<I: Iterator<Item = u8>> Decoder<I> {
    pub fn new(it: I) -> Self {
        Self { it, position: 0 }
    }

    /// Offset of the next byte that will be read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn decode_next(&mut self) -> Result<Decoded> {
        let offset = self.position;

        let mut recorder = Recorder {
            inner: &mut self.it,
            bytes: Vec::with_capacity(4),
        };
        let result = decode_instruction(&mut recorder);
        let bytes = recorder.bytes;

        self.position += bytes.len();

        result.map(|instruction| Decoded {
            offset,
            bytes,
            instruction,
        })
    }
}

impl<I: Iterator<Item = u8>> Iterator for Decoder<I> {
    type Item = Result<Decoded>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.decode_next() {
            Err(DecodeError::EndOfInput) => None,
            result => Some(result),
        }
    }
}

/// Decode every instruction in `data`, failing on the first error.
pub fn disassemble(data: &[u8]) -> Result<Vec<Instruction>> {
    Decoder::new(data.iter().copied())
        .map(|decoded| decoded.map(|d| d.instruction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_and_bytes() {
        let data = [0x89, 0xD9, 0x8B, 0x1E, 0x82, 0x0D, 0xB3, 0x03];
        let decoded = Decoder::new(data.iter().copied())
            .collect::<Result<Vec<_>>>()
            .unwrap();

        let summary = decoded
            .iter()
            .map(|d| (d.offset, d.bytes.clone(), d.instruction.to_string()))
            .collect::<Vec<_>>();

        assert_eq!(
            summary,
            vec![
                (0, vec![0x89, 0xD9], "mov cx, bx".to_string()),
                (2, vec![0x8B, 0x1E, 0x82, 0x0D], "mov bx, [3458]".to_string()),
                (6, vec![0xB3, 0x03], "mov bl, 3".to_string()),
            ]
        );
    }

    #[test]
    fn resumes_after_unrecognized_op_code() {
        let data = [0x90, 0x89, 0xD9];
        let mut decoder = Decoder::new(data.iter().copied());

        assert_eq!(
            decoder.next(),
            Some(Err(DecodeError::UnrecognizedOpcode(0x90)))
        );
        assert_eq!(decoder.position(), 1);

        let decoded = decoder.next().unwrap().unwrap();
        assert_eq!(decoded.offset, 1);
        assert_eq!(decoded.instruction.to_string(), "mov cx, bx");

        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn truncation_consumes_the_rest() {
        let data = [0x89, 0xD9, 0x89];
        let mut decoder = Decoder::new(data.iter().copied());

        assert!(decoder.next().unwrap().is_ok());
        assert_eq!(
            decoder.next(),
            Some(Err(DecodeError::UnexpectedEndOfStream))
        );
        assert_eq!(decoder.position(), 3);
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn disassemble_buffer() {
        let instructions = disassemble(&[0x89, 0xD9, 0xB3, 0x03]).unwrap();
        let lines = instructions
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>();
        assert_eq!(lines, vec!["mov cx, bx", "mov bl, 3"]);

        assert_eq!(disassemble(&[]), Ok(vec![]));
        assert_eq!(
            disassemble(&[0x89, 0xD9, 0x89]),
            Err(DecodeError::UnexpectedEndOfStream)
        );
    }
}
