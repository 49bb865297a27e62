use sim86_decoder::{DecodeError, Decoded, Decoder};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use thiserror::Error;
use tracing::{info, warn, Level};

/// Widest instruction decoded is 4 bytes.
const LISTING_BYTES: usize = 4;

#[derive(Debug, Error)]
enum DisassembleError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("at offset {offset:#06x}: {source}")]
    Decode { offset: usize, source: DecodeError },
}

#[derive(StructOpt)]
#[structopt(name = "sim86-dis", about = "Disassemble 8086 mov instructions")]
struct Opt {
    /// The binary file to disassemble
    #[structopt(parse(from_os_str))]
    binary: PathBuf,

    /// Prefix every line with its offset and the raw instruction bytes
    #[structopt(short, long)]
    listing: bool,

    /// Emit unrecognized op codes as data bytes and carry on
    #[structopt(short, long)]
    keep_going: bool,

    /// Do not print the leading `bits 16` directive
    #[structopt(long)]
    no_header: bool,

    /// Log more details to stderr (can be repeated)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load_data(path: &Path) -> Result<Vec<u8>, DisassembleError> {
    let read = || -> std::io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        std::fs::File::open(path)?.read_to_end(&mut buffer)?;
        Ok(buffer)
    };

    read().map_err(|source| DisassembleError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn print_instruction(
    out: &mut impl Write,
    decoded: &Decoded,
    listing: bool,
) -> std::io::Result<()> {
    if listing {
        let mut b: String = decoded
            .bytes
            .iter()
            .take(LISTING_BYTES)
            .map(|b| format!("{:02X} ", b))
            .collect();

        for _ in decoded.bytes.len()..LISTING_BYTES {
            b.push_str("   ");
        }

        writeln!(out, "{:04X}  {} {}", decoded.offset, b, decoded.instruction)
    } else {
        writeln!(out, "{}", decoded.instruction)
    }
}

fn print_data_byte(
    out: &mut impl Write,
    offset: usize,
    byte: u8,
    listing: bool,
) -> std::io::Result<()> {
    if listing {
        writeln!(out, "{:04X}  {:02X}           db {:#04x}", offset, byte, byte)
    } else {
        writeln!(out, "db {:#04x}", byte)
    }
}

fn disassemble(data: &[u8], opts: &Opt, out: &mut impl Write) -> Result<(), DisassembleError> {
    if !opts.no_header {
        writeln!(out, "bits 16")?;
    }

    let mut decoder = Decoder::new(data.iter().copied());

    loop {
        let offset = decoder.position();

        match decoder.decode_next() {
            Ok(decoded) => print_instruction(out, &decoded, opts.listing)?,

            Err(DecodeError::EndOfInput) => break,

            Err(DecodeError::UnrecognizedOpcode(byte)) if opts.keep_going => {
                warn!("unrecognized op code {:#04x} at {:#06x}", byte, offset);
                print_data_byte(out, offset, byte, opts.listing)?;
            }

            Err(source) => return Err(DisassembleError::Decode { offset, source }),
        }
    }

    Ok(())
}

fn main() {
    let opts = Opt::from_args();

    tracing_subscriber::fmt()
        .with_max_level(level_for(opts.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = load_data(&opts.binary).and_then(|data| {
        info!("loaded {} bytes from {}", data.len(), opts.binary.display());

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        disassemble(&data, &opts, &mut out)
    });

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(args: &[&str]) -> Opt {
        Opt::from_iter(std::iter::once("sim86-dis").chain(args.iter().copied()))
    }

    fn run(data: &[u8], args: &[&str]) -> (Result<(), DisassembleError>, String) {
        let mut out = Vec::new();
        let mut all_args = vec!["test.bin"];
        all_args.extend_from_slice(args);
        let result = disassemble(data, &opts(&all_args), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_level_for() {
        let tests = [
            (0, Level::WARN),
            (1, Level::INFO),
            (2, Level::DEBUG),
            (3, Level::TRACE),
            (9, Level::TRACE),
        ];

        for (verbose, expected) in tests {
            assert_eq!(level_for(verbose), expected);
        }
    }

    #[test]
    fn plain_output() {
        let (result, output) = run(&[0x89, 0xD9, 0xB3, 0x03], &[]);
        assert!(result.is_ok());
        assert_eq!(output, "bits 16\nmov cx, bx\nmov bl, 3\n");

        let (_, output) = run(&[0x89, 0xD9], &["--no-header"]);
        assert_eq!(output, "mov cx, bx\n");
    }

    #[test]
    fn listing_output() {
        let (result, output) = run(
            &[0x89, 0xD9, 0x89, 0x8C, 0xD4, 0xFE],
            &["--no-header", "--listing"],
        );
        assert!(result.is_ok());
        assert_eq!(
            output,
            "0000  89 D9        mov cx, bx\n\
             0002  89 8C D4 FE  mov [si - 300], cx\n"
        );
    }

    #[test]
    fn keep_going_emits_data_bytes() {
        let data = [0x90, 0x89, 0xD9];

        let (result, output) = run(&data, &["--no-header", "--keep-going"]);
        assert!(result.is_ok());
        assert_eq!(output, "db 0x90\nmov cx, bx\n");

        let (result, output) = run(&data, &["--no-header", "-k", "-l"]);
        assert!(result.is_ok());
        assert_eq!(
            output,
            "0000  90           db 0x90\n\
             0001  89 D9        mov cx, bx\n"
        );
    }

    #[test]
    fn unrecognized_op_code_is_fatal_by_default() {
        let (result, output) = run(&[0x89, 0xD9, 0x90], &["--no-header"]);
        assert_eq!(output, "mov cx, bx\n");
        match result {
            Err(DisassembleError::Decode { offset, source }) => {
                assert_eq!(offset, 2);
                assert_eq!(source, DecodeError::UnrecognizedOpcode(0x90));
            }
            _ => panic!("expected a decode error"),
        }
    }

    #[test]
    fn truncation_is_always_fatal() {
        let (result, output) = run(&[0x89], &["--no-header", "--keep-going"]);
        assert_eq!(output, "");
        assert_eq!(
            result.unwrap_err().to_string(),
            "at offset 0x0000: Unexpected end of stream in the middle of an instruction"
        );
    }
}
