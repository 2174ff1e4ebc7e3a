use crate::cmd::{write_output, EncodeArgs};
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let payload = args.input.read()?;

    let mut text = base32k_codec::encode(&payload);
    if !args.no_newline {
        text.push('\n');
    }
    tracing::debug!(
        bytes = payload.len(),
        chars = base32k_codec::encoded_len(payload.len()),
        "encoded input"
    );

    write_output(args.output.as_deref(), text.as_bytes())?;
    Ok(SUCCESS)
}
