use base32k_codec::{checked_available_bytes, encoded_length_of, FRAME_OVERHEAD};
use serde::Serialize;

use crate::cmd::CapacityArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_report, OutputFormat, Report};

#[derive(Debug, Serialize)]
struct CapacityReport {
    schema_id: &'static str,
    payload_bytes: usize,
    symbol_chars: usize,
    total_chars: usize,
}

impl Report for CapacityReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("payload_bytes", self.payload_bytes.to_string()),
            ("symbol_chars", self.symbol_chars.to_string()),
            ("total_chars", self.total_chars.to_string()),
        ]
    }
}

pub fn run(args: CapacityArgs, format: OutputFormat) -> CliResult<i32> {
    print_report(&report(&args)?, format);
    Ok(SUCCESS)
}

fn report(args: &CapacityArgs) -> CliResult<CapacityReport> {
    // Exactly one of the two is present (clap group).
    let (payload_bytes, symbol_chars) = match (args.chars, args.bytes) {
        (Some(chars), _) => {
            let bytes =
                checked_available_bytes(chars).ok_or_else(|| out_of_range("--chars", chars))?;
            (bytes, chars)
        }
        (None, bytes) => {
            let bytes = bytes.unwrap_or_default();
            (bytes, encoded_length_of(bytes))
        }
    };
    let total_chars = symbol_chars
        .checked_add(FRAME_OVERHEAD)
        .ok_or_else(|| out_of_range("--chars", symbol_chars))?;

    Ok(CapacityReport {
        schema_id: "https://schemas.3leaps.dev/base32k/cli/v1/capacity.schema.json",
        payload_bytes,
        symbol_chars,
        total_chars,
    })
}

fn out_of_range(flag: &str, value: usize) -> CliError {
    CliError::new(USAGE, format!("{flag} {value} is too large to report a capacity for"))
}
