use crate::codec::encoded_length_of;
use crate::error::{DecodeError, MalformedInput, Result};

/// Payload bits carried by each symbol character.
///
/// Part of the wire format: changing it breaks every previously encoded string.
pub const BITS_PER_SYMBOL: u32 = 15;

/// Largest symbol value, `2^15 - 1`.
pub const MAX_SYMBOL: u32 = (1 << BITS_PER_SYMBOL) - 1;

/// Added to every byte or symbol before it becomes a code point, keeping the
/// output clear of ASCII control characters.
pub const CODE_POINT_OFFSET: u32 = 128;

/// Characters in the big-endian length prefix.
pub const LENGTH_PREFIX_CHARS: usize = 4;

/// Characters in the checksum suffix (CRC32 zero-extended to 64 bits).
pub const CHECKSUM_SUFFIX_CHARS: usize = 8;

/// Framing characters surrounding the symbol region.
pub const FRAME_OVERHEAD: usize = LENGTH_PREFIX_CHARS + CHECKSUM_SUFFIX_CHARS;

/// Default cap on the declared payload length accepted by the decoder.
pub const MAX_DECODED_SIZE: usize = 50_000_000;

// Every reachable code point must be a valid `char`.
const _: () = assert!(MAX_SYMBOL + CODE_POINT_OFFSET < 0xD800);

const CRC32: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Standard CRC-32 (zlib / ISO-HDLC polynomial) of `bytes`.
pub fn crc32(bytes: &[u8]) -> u32 {
    CRC32.checksum(bytes)
}

/// Map a byte or symbol value onto its output character.
pub(crate) fn offset_char(value: u32) -> char {
    debug_assert!(value <= MAX_SYMBOL);
    char::from_u32(value + CODE_POINT_OFFSET).expect("offset code points lie below the surrogates")
}

/// The 4-character length prefix for a payload of `len` bytes.
pub fn length_prefix(len: u32) -> [char; LENGTH_PREFIX_CHARS] {
    len.to_be_bytes().map(|b| offset_char(u32::from(b)))
}

/// The 8-character checksum suffix for a payload with CRC32 `crc`.
pub fn checksum_suffix(crc: u32) -> [char; CHECKSUM_SUFFIX_CHARS] {
    u64::from(crc).to_be_bytes().map(|b| offset_char(u32::from(b)))
}

/// The framing fields of an encoded string.
///
/// Layout:
/// ```text
/// ┌────────────────┬────────────────────────┬──────────────────┐
/// │ Length (4 ch)  │ Symbols                │ Checksum (8 ch)  │
/// │ u32 BE, +128   │ ceil(8n/15) ch, +128   │ u64 BE, +128     │
/// └────────────────┴────────────────────────┴──────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Payload length in bytes, as declared by the prefix.
    pub declared_size: u32,
    /// CRC32 of the payload, as declared by the suffix.
    pub declared_checksum: u64,
    /// Characters found between the prefix and the suffix.
    pub symbol_chars: usize,
}

impl FrameHeader {
    /// Parse the length prefix and checksum suffix of `text`.
    ///
    /// The symbol region is counted but not inspected.
    pub fn parse(text: &str) -> Result<Self> {
        let total = text.chars().count();
        if total < FRAME_OVERHEAD {
            return Err(DecodeError::Framing { len: total });
        }

        let mut prefix = [0u8; LENGTH_PREFIX_CHARS];
        for (index, (slot, ch)) in prefix.iter_mut().zip(text.chars()).enumerate() {
            *slot = framing_byte(index, ch)?;
        }

        let suffix_start = total - CHECKSUM_SUFFIX_CHARS;
        let mut suffix = [0u8; CHECKSUM_SUFFIX_CHARS];
        let tail = text.chars().skip(suffix_start);
        for (offset, (slot, ch)) in suffix.iter_mut().zip(tail).enumerate() {
            *slot = framing_byte(suffix_start + offset, ch)?;
        }

        let header = Self {
            declared_size: u32::from_be_bytes(prefix),
            declared_checksum: u64::from_be_bytes(suffix),
            symbol_chars: total - FRAME_OVERHEAD,
        };
        tracing::trace!(?header, "parsed frame header");
        Ok(header)
    }

    /// Symbol characters a well-formed encoding of the declared payload has.
    pub fn expected_symbol_chars(&self) -> usize {
        encoded_length_of(self.declared_size as usize)
    }

    /// The symbol characters of `text`, the string this header was parsed from.
    pub fn symbols<'t>(&self, text: &'t str) -> impl Iterator<Item = char> + 't {
        text.chars()
            .skip(LENGTH_PREFIX_CHARS)
            .take(self.symbol_chars)
    }
}

fn framing_byte(index: usize, ch: char) -> std::result::Result<u8, MalformedInput> {
    u32::from(ch)
        .checked_sub(CODE_POINT_OFFSET)
        .and_then(|v| u8::try_from(v).ok())
        .ok_or(MalformedInput::FramingChar { index, ch })
}
