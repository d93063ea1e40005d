use clap::{Args, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod classify;
pub mod decode;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a single AVL frame.
    Decode(DecodeArgs),
    /// Report whether input is an AVL frame or an IMEI/unknown packet.
    Classify(ClassifyArgs),
    /// Reassemble and decode packets from a byte stream.
    Stream(StreamArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Classify(args) => classify::run(args, format),
        Command::Stream(args) => stream::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Where a single packet is read from. Stdin when neither is given.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Packet as hex (whitespace and a leading 0x are ignored).
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw packet bytes from file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> CliResult<Vec<u8>> {
        if let Some(hex) = &self.hex {
            return parse_hex(hex);
        }
        if let Some(path) = &self.file {
            return std::fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
        }
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading stdin", err))?;
        Ok(buf)
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Verify the trailing CRC-16/IBM.
    #[arg(long)]
    pub verify_crc: bool,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Read the stream from file instead of stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Exit after printing N packets.
    #[arg(long)]
    pub count: Option<usize>,
    /// Verify the trailing CRC-16/IBM of each frame.
    #[arg(long)]
    pub verify_crc: bool,
    /// Largest packet accepted, in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = avlprims_codec::DEFAULT_MAX_FRAME)]
    pub max_frame_size: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);

    if digits.len() % 2 != 0 {
        return Err(CliError::new(USAGE, "--hex must have an even number of digits"));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| {
                    CliError::new(USAGE, format!("--hex is not valid hex at offset {i}"))
                })
        })
        .collect()
}
