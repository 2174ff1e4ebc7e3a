use base32k_codec::{decode_with_config, DecodeConfig, FrameHeader};
use serde::Serialize;

use crate::cmd::decode::read_text;
use crate::cmd::InspectArgs;
use crate::exit::{decode_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat, Report};

#[derive(Debug, Serialize)]
struct InspectReport {
    schema_id: &'static str,
    declared_size: u32,
    declared_checksum: String,
    symbol_chars: usize,
    expected_symbol_chars: usize,
    /// The text decoded in full: within the size limit and matching its checksum.
    verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Report for InspectReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("declared_size", self.declared_size.to_string()),
            ("declared_checksum", self.declared_checksum.clone()),
            ("symbol_chars", self.symbol_chars.to_string()),
            ("expected_symbol_chars", self.expected_symbol_chars.to_string()),
            ("verified", self.verified.to_string()),
        ];
        if let Some(error) = &self.error {
            rows.push(("error", error.clone()));
        }
        rows
    }
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = args.input.read()?;
    let text = read_text(&raw)?;
    let header = FrameHeader::parse(text).map_err(|err| decode_error("inspect failed", err))?;

    let report = inspect(text, header, &args.limit.decode_config());
    print_report(&report, format);

    if report.verified {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn inspect(text: &str, header: FrameHeader, config: &DecodeConfig) -> InspectReport {
    let expected = header.expected_symbol_chars();
    if header.symbol_chars != expected {
        tracing::warn!(
            found = header.symbol_chars,
            expected,
            "symbol region length does not match declared size"
        );
    }

    let error = decode_with_config(text, config).err().map(|err| err.to_string());
    InspectReport {
        schema_id: "https://schemas.3leaps.dev/base32k/cli/v1/inspect.schema.json",
        declared_size: header.declared_size,
        declared_checksum: format!("{:#010x}", header.declared_checksum),
        symbol_chars: header.symbol_chars,
        expected_symbol_chars: expected,
        verified: error.is_none(),
        error,
    }
}
