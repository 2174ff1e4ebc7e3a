use crate::cmd::{write_output, DecodeArgs};
use crate::exit::{decode_error, CliError, CliResult, DATA_INVALID, SUCCESS};

pub fn run(args: DecodeArgs) -> CliResult<i32> {
    let raw = args.input.read()?;
    let text = read_text(&raw)?;
    let payload = base32k_codec::decode_with_config(text, &args.limit.decode_config())
        .map_err(|err| decode_error("decode failed", err))?;
    tracing::debug!(bytes = payload.len(), "decoded input");

    write_output(args.output.as_deref(), &payload)?;
    Ok(SUCCESS)
}

/// Interpret raw input as encoded text.
///
/// Encoded text never contains ASCII, so surrounding ASCII whitespace (such as
/// the trailing newline `encode` emits) is dropped.
pub fn read_text(raw: &[u8]) -> CliResult<&str> {
    let text = std::str::from_utf8(raw)
        .map_err(|err| CliError::new(DATA_INVALID, format!("input is not valid UTF-8: {err}")))?;
    Ok(text.trim_matches(|c: char| c.is_ascii_whitespace()))
}
