use clap::{Args, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use base32k_codec::{DecodeConfig, MAX_DECODED_SIZE};

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod capacity;
pub mod decode;
pub mod encode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode bytes into base32k text.
    Encode(EncodeArgs),
    /// Decode base32k text back into bytes.
    Decode(DecodeArgs),
    /// Report the framing fields of encoded text and verify its checksum.
    Inspect(InspectArgs),
    /// Convert between payload bytes and symbol characters.
    Capacity(CapacityArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Capacity(args) => capacity::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Inline input instead of standard input.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Read input from a file ("-" for standard input).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> CliResult<Vec<u8>> {
        if let Some(data) = &self.data {
            return Ok(data.as_bytes().to_vec());
        }
        match &self.file {
            Some(path) if path != Path::new("-") => std::fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
            _ => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buf)
                    .map_err(|err| io_error("failed reading standard input", err))?;
                Ok(buf)
            }
        }
    }
}

#[derive(Args, Debug)]
pub struct LimitArgs {
    /// Largest declared payload, in bytes, the decoder will allocate.
    #[arg(
        long,
        value_name = "BYTES",
        env = "BASE32K_MAX_SIZE",
        default_value_t = MAX_DECODED_SIZE
    )]
    pub max_size: usize,
}

impl LimitArgs {
    pub fn decode_config(&self) -> DecodeConfig {
        DecodeConfig {
            max_decoded_size: self.max_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Write the encoded text to a file instead of standard output.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Do not terminate the encoded text with a newline.
    #[arg(long, short = 'n')]
    pub no_newline: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub limit: LimitArgs,
    /// Write the decoded bytes to a file instead of standard output.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub limit: LimitArgs,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CapacityArgs {
    /// Payload bytes that fit in this many symbol characters.
    #[arg(long, value_name = "N")]
    pub chars: Option<usize>,
    /// Characters needed to encode this many payload bytes.
    #[arg(long, value_name = "N")]
    pub bytes: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance and wire format parameters.
    #[arg(long)]
    pub extended: bool,
}

/// Write `data` to `path`, or to standard output when no path is given.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> CliResult<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err)),
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(data)
                .and_then(|()| out.flush())
                .map_err(|err| io_error("failed writing standard output", err))
        }
    }
}
