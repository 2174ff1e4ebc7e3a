use base32k_codec::{BITS_PER_SYMBOL, CODE_POINT_OFFSET, MAX_DECODED_SIZE};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("base32k {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: base32k");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("BASE32K_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("bits_per_symbol: {BITS_PER_SYMBOL}");
    println!("code_point_offset: {CODE_POINT_OFFSET}");
    println!("checksum: crc32 (ISO-HDLC), 8-char suffix");
    println!("max_decoded_size: {MAX_DECODED_SIZE}");

    Ok(SUCCESS)
}
