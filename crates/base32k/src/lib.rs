//! Pack binary blobs into text, 15 bits per character.
//!
//! base32k turns arbitrary bytes into a string that survives text-only
//! transports (chat, clipboards, form fields) and turns it back, checking the
//! exact length and a CRC32 on the way.
//!
//! # Crate Structure
//!
//! - [`codec`] — Bit packing, framing, and the encode/decode entry points
//!
//! The `base32k` command-line tool is built with the `cli` feature.
//!
//! ```
//! let text = base32k::encode(&[0xDE, 0xAD, 0xBE, 0xEF]);
//! assert_eq!(base32k::decode(&text).unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
//! assert!(matches!(base32k::decode(""), Err(base32k::DecodeError::Framing { len: 0 })));
//! ```

/// Re-export codec types.
pub mod codec {
    pub use base32k_codec::*;
}

pub use base32k_codec::{decode, encode, DecodeConfig, DecodeError};
