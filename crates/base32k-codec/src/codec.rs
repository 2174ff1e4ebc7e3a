use tracing::debug;

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, MalformedInput, Result};
use crate::frame::{
    checksum_suffix, crc32, length_prefix, offset_char, FrameHeader, BITS_PER_SYMBOL,
    CODE_POINT_OFFSET, FRAME_OVERHEAD, LENGTH_PREFIX_CHARS, MAX_DECODED_SIZE, MAX_SYMBOL,
};

/// Zero bytes appended to the payload so the last symbol can read past the end.
const READ_PADDING: [u8; 2] = [0, 0];

/// Configuration for the decoder.
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Largest declared payload length, in bytes, that will be allocated.
    /// Default: 50,000,000.
    pub max_decoded_size: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_decoded_size: MAX_DECODED_SIZE,
        }
    }
}

/// Maximum payload bytes representable with `symbol_chars` symbol characters.
///
/// Saturates at `usize::MAX`; see [`checked_available_bytes`].
pub fn available_bytes(symbol_chars: usize) -> usize {
    checked_available_bytes(symbol_chars).unwrap_or(usize::MAX)
}

/// Like [`available_bytes`], but `None` when the result exceeds `usize::MAX`.
pub fn checked_available_bytes(symbol_chars: usize) -> Option<usize> {
    let bits = symbol_chars as u128 * u128::from(BITS_PER_SYMBOL);
    usize::try_from(bits / 8).ok()
}

/// Symbol characters needed for `byte_count` payload bytes, framing excluded.
///
/// Exact for every `usize`; the result never exceeds the input.
pub fn encoded_length_of(byte_count: usize) -> usize {
    let bits = byte_count as u128 * 8;
    let symbols = bits.div_ceil(u128::from(BITS_PER_SYMBOL));
    // symbols <= byte_count, so the conversion is lossless.
    symbols as usize
}

/// Total characters in the encoding of `byte_count` payload bytes.
pub fn encoded_len(byte_count: usize) -> usize {
    FRAME_OVERHEAD + encoded_length_of(byte_count)
}

/// Encode `bytes` into a framed string.
///
/// # Panics
///
/// Panics if `bytes` is longer than `u32::MAX`. This is a limit of the wire
/// format: the length prefix is a 32-bit field, and any longer payload could
/// not be framed (or decoded) at all.
pub fn encode(bytes: &[u8]) -> String {
    // Prefix and suffix chars are 2 UTF-8 bytes each, symbols at most 3.
    let mut out = String::with_capacity(FRAME_OVERHEAD * 2 + encoded_length_of(bytes.len()) * 3);
    encode_into(bytes, &mut out);
    out
}

/// Encode `bytes` and append the framed string to `out`.
///
/// # Panics
///
/// Panics if `bytes` is longer than `u32::MAX`, the largest length the 32-bit
/// prefix of the wire format can declare.
pub fn encode_into(bytes: &[u8], out: &mut String) {
    let declared = declared_len(bytes.len());
    let symbol_count = encoded_length_of(bytes.len());

    let mut padded = Vec::with_capacity(bytes.len() + READ_PADDING.len());
    padded.extend_from_slice(bytes);
    padded.extend_from_slice(&READ_PADDING);
    let mut reader = BitReader::new(&padded);

    out.extend(length_prefix(declared));
    out.extend((0..symbol_count).map(|_| offset_char(reader.read_bits(BITS_PER_SYMBOL))));
    out.extend(checksum_suffix(crc32(bytes)));

    debug!(size = bytes.len(), symbols = symbol_count, "encoded payload");
}

fn declared_len(len: usize) -> u32 {
    u32::try_from(len)
        .unwrap_or_else(|_| panic!("payload of {len} bytes does not fit the 32-bit length prefix"))
}

/// Decode a framed string with the default [`DecodeConfig`].
pub fn decode(text: &str) -> Result<Vec<u8>> {
    decode_with_config(text, &DecodeConfig::default())
}

/// Decode a framed string back into the original bytes.
///
/// Decoding is all-or-nothing: nothing is returned unless the recovered
/// bytes match the declared checksum.
pub fn decode_with_config(text: &str, config: &DecodeConfig) -> Result<Vec<u8>> {
    let result = decode_frame(text, config);
    match &result {
        Ok(bytes) => debug!(size = bytes.len(), "decoded payload"),
        Err(err) => debug!(%err, "rejected encoded input"),
    }
    result
}

fn decode_frame(text: &str, config: &DecodeConfig) -> Result<Vec<u8>> {
    let header = FrameHeader::parse(text)?;

    let size = header.declared_size as usize;
    if size > config.max_decoded_size {
        return Err(DecodeError::SizeLimitExceeded {
            size,
            max: config.max_decoded_size,
        });
    }

    let mut out = vec![0u8; size];
    let mut writer = BitWriter::new(&mut out);
    for (offset, ch) in header.symbols(text).enumerate() {
        let value = symbol_value(LENGTH_PREFIX_CHARS + offset, ch)?;
        writer.write_bits(value, BITS_PER_SYMBOL);
    }

    let actual = crc32(&out);
    if u64::from(actual) != header.declared_checksum {
        return Err(DecodeError::Integrity {
            expected: header.declared_checksum,
            actual,
        });
    }
    Ok(out)
}

fn symbol_value(index: usize, ch: char) -> std::result::Result<u32, MalformedInput> {
    u32::from(ch)
        .checked_sub(CODE_POINT_OFFSET)
        .filter(|&v| v <= MAX_SYMBOL)
        .ok_or(MalformedInput::SymbolChar { index, ch })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic xorshift bytes so failures reproduce.
    fn sample(len: usize, seed: u64) -> Vec<u8> {
        let mut state = seed | 1;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 24) as u8
            })
            .collect()
    }

    fn replace_char(text: &str, index: usize, ch: char) -> String {
        text.chars()
            .enumerate()
            .map(|(i, c)| if i == index { ch } else { c })
            .collect()
    }

    #[test]
    fn test_roundtrip_many_lengths() {
        for len in 0..64 {
            let payload = sample(len, len as u64 + 7);
            let text = encode(&payload);
            assert_eq!(text.chars().count(), encoded_len(len));
            assert_eq!(decode(&text).unwrap(), payload, "length {len}");
        }
    }

    #[test]
    fn test_roundtrip_large_payload() {
        let payload = sample(100_003, 42);
        let text = encode(&payload);
        assert_eq!(text.chars().count(), 12 + 53_335);
        assert_eq!(decode(&text).unwrap(), payload);
    }

    #[test]
    fn test_roundtrip_extreme_bytes() {
        for payload in [vec![0u8; 31], vec![0xFF; 31], vec![0x80; 15]] {
            assert_eq!(decode(&encode(&payload)).unwrap(), payload);
        }
    }

    #[test]
    fn test_encode_empty() {
        let text = encode(&[]);
        assert_eq!(text, "\u{80}".repeat(12));
        assert!(decode(&text).unwrap().is_empty());
    }

    #[test]
    fn test_encode_single_ff() {
        let text = encode(&[0xFF]);
        let chars: Vec<char> = text.chars().collect();
        assert_eq!(chars.len(), 13);
        assert_eq!(&chars[..4], &['\u{80}', '\u{80}', '\u{80}', '\u{81}']);
        assert_eq!(u32::from(chars[4]), ((0xFF << 7) & 0x7FFF) + 128);
        assert_eq!(&chars[5..], &checksum_suffix(crc32(&[0xFF])));
        assert_eq!(decode(&text).unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = String::from("blob:");
        encode_into(b"abc", &mut out);
        assert!(out.starts_with("blob:"));
        assert_eq!(&out["blob:".len()..], encode(b"abc"));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let payload = sample(500, 3);
        assert_eq!(encode(&payload), encode(&payload));
    }

    #[test]
    fn test_output_stays_above_ascii_controls() {
        let text = encode(&sample(4096, 11));
        assert!(text.chars().all(|c| (0x80..=0x807F).contains(&u32::from(c))));
    }

    #[test]
    fn test_capacity_helpers() {
        assert_eq!(encoded_length_of(0), 0);
        assert_eq!(encoded_length_of(1), 1);
        assert_eq!(encoded_length_of(15), 8);
        assert_eq!(encoded_length_of(16), 9);
        assert_eq!(available_bytes(0), 0);
        assert_eq!(available_bytes(1), 1);
        assert_eq!(available_bytes(8), 15);
        assert_eq!(encoded_len(15), 20);
        for n in 0..2000 {
            assert!(available_bytes(encoded_length_of(n)) >= n, "n = {n}");
        }
    }

    #[test]
    fn test_decode_rejects_short_input() {
        assert!(matches!(decode(""), Err(DecodeError::Framing { len: 0 })));
        let text = encode(b"");
        let short: String = text.chars().take(11).collect();
        assert!(matches!(decode(&short), Err(DecodeError::Framing { len: 11 })));
    }

    #[test]
    fn test_decode_rejects_oversized_length() {
        // 0x03000000 = 50,331,648 bytes declared.
        let mut text: String = ['\u{83}', '\u{80}', '\u{80}', '\u{80}'].iter().collect();
        text.push_str(&"\u{80}".repeat(8));
        assert!(matches!(
            decode(&text),
            Err(DecodeError::SizeLimitExceeded { size: 50_331_648, max: MAX_DECODED_SIZE })
        ));
    }

    #[test]
    fn test_decode_size_cap_boundary() {
        let declared = |size: u32| -> String {
            let mut text: String = length_prefix(size).iter().collect();
            text.extend(checksum_suffix(0));
            text
        };

        // At the cap the buffer is allocated; the zero checksum then fails.
        assert!(matches!(
            decode(&declared(50_000_000)),
            Err(DecodeError::Integrity { expected: 0, .. })
        ));
        assert!(matches!(
            decode(&declared(50_000_001)),
            Err(DecodeError::SizeLimitExceeded { size: 50_000_001, max: 50_000_000 })
        ));
    }

    #[test]
    fn test_capacity_helpers_at_usize_max() {
        assert_eq!(encoded_length_of(usize::MAX / 4), (usize::MAX / 4) / 15 * 8 + 2);
        assert!(encoded_length_of(usize::MAX) < usize::MAX);
        assert!(encoded_len(usize::MAX) < usize::MAX);

        let chars = usize::MAX / 8;
        assert_eq!(checked_available_bytes(chars), Some(chars / 8 * 15 + 13));
        assert_eq!(checked_available_bytes(usize::MAX), None);
        assert_eq!(available_bytes(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_declared_len_accepts_u32_max() {
        assert_eq!(declared_len(0), 0);
        assert_eq!(declared_len(u32::MAX as usize), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "does not fit the 32-bit length prefix")]
    fn test_declared_len_rejects_longer_payloads() {
        declared_len(u32::MAX as usize + 1);
    }

    #[test]
    fn test_decode_respects_configured_limit() {
        let config = DecodeConfig {
            max_decoded_size: 4,
        };
        assert_eq!(
            decode_with_config(&encode(b"four"), &config).unwrap(),
            b"four"
        );
        assert!(matches!(
            decode_with_config(&encode(b"five!"), &config),
            Err(DecodeError::SizeLimitExceeded { size: 5, max: 4 })
        ));
    }

    #[test]
    fn test_decode_detects_symbol_tampering() {
        let payload = sample(40, 5);
        let text = encode(&payload);
        let symbols = encoded_length_of(payload.len());
        for index in LENGTH_PREFIX_CHARS..LENGTH_PREFIX_CHARS + symbols - 1 {
            let original = text.chars().nth(index).unwrap();
            // Flip the top payload bit of the symbol.
            let flipped = offset_char((u32::from(original) - CODE_POINT_OFFSET) ^ 0x4000);
            let tampered = replace_char(&text, index, flipped);
            assert!(
                matches!(decode(&tampered), Err(DecodeError::Integrity { .. })),
                "index {index}"
            );
        }
    }

    #[test]
    fn test_decode_detects_checksum_tampering() {
        let text = encode(b"hello, base32k!");
        let last = text.chars().count() - 1;
        let original = text.chars().last().unwrap();
        let replacement = if original == '\u{17F}' { '\u{17E}' } else { '\u{17F}' };
        let tampered = replace_char(&text, last, replacement);
        assert!(matches!(
            decode(&tampered),
            Err(DecodeError::Integrity { .. })
        ));

        // High half of the checksum field must be zero.
        let tampered = replace_char(&text, last - 7, '\u{81}');
        assert!(matches!(
            decode(&tampered),
            Err(DecodeError::Integrity { .. })
        ));
    }

    #[test]
    fn test_decode_detects_missing_symbol() {
        let text = encode(b"hello world");
        let mut chars: Vec<char> = text.chars().collect();
        chars.remove(chars.len() - 9);
        let truncated: String = chars.into_iter().collect();
        assert!(matches!(
            decode(&truncated),
            Err(DecodeError::Integrity { .. })
        ));
    }

    #[test]
    fn test_decode_ignores_surplus_symbols() {
        let text = encode(b"xyz");
        let mut chars: Vec<char> = text.chars().collect();
        chars.insert(chars.len() - 8, '\u{7FFF}');
        let padded: String = chars.into_iter().collect();
        assert_eq!(decode(&padded).unwrap(), b"xyz");
    }

    #[test]
    fn test_decode_rejects_ascii_symbol() {
        let text = replace_char(&encode(b"abcdef"), 5, 'Z');
        assert!(matches!(
            decode(&text),
            Err(DecodeError::Malformed(MalformedInput::SymbolChar { index: 5, ch: 'Z' }))
        ));
    }

    #[test]
    fn test_decode_rejects_symbol_above_range() {
        let text = replace_char(&encode(b"abcdef"), 4, '\u{8080}');
        assert!(matches!(
            decode(&text),
            Err(DecodeError::Malformed(MalformedInput::SymbolChar { index: 4, .. }))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = decode("short").unwrap_err();
        assert!(err.to_string().contains("too short"));

        let err = decode_with_config(&encode(b"abc"), &DecodeConfig { max_decoded_size: 1 })
            .unwrap_err();
        assert_eq!(err.to_string(), "declared payload too large (3 bytes, max 1)");
    }
}
