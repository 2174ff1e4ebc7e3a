//! Binary-to-text codec packing 15 bits of payload into every character.
//!
//! An encoded string has three regions:
//! - A 4-character length prefix (payload length as big-endian `u32`)
//! - The symbol region, one character per 15-bit group of the payload
//! - An 8-character checksum suffix (CRC32 of the payload, zero-extended to 64 bits)
//!
//! Every character's code point is the raw byte or 15-bit value plus 128, so
//! the output never contains ASCII control characters and all of it falls in
//! U+0080..=U+807F.
//!
//! ```
//! let text = base32k_codec::encode(b"hello");
//! assert_eq!(text.chars().count(), base32k_codec::encoded_len(5));
//! assert_eq!(base32k_codec::decode(&text).unwrap(), b"hello");
//! ```

pub mod bits;
pub mod codec;
pub mod error;
pub mod frame;

pub use bits::{BitReader, BitWriter};
pub use codec::{
    available_bytes, checked_available_bytes, decode, decode_with_config, encode, encode_into,
    encoded_len, encoded_length_of, DecodeConfig,
};
pub use error::{DecodeError, MalformedInput, Result};
pub use frame::{
    crc32, FrameHeader, BITS_PER_SYMBOL, CODE_POINT_OFFSET, FRAME_OVERHEAD, MAX_DECODED_SIZE,
};
