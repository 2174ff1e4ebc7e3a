/// Errors that can occur while decoding text back into bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is too short to hold the length prefix and checksum suffix.
    #[error("input has {len} characters, too short for length prefix and checksum (need 12)")]
    Framing { len: usize },

    /// The declared payload length exceeds the configured maximum.
    #[error("declared payload too large ({size} bytes, max {max})")]
    SizeLimitExceeded { size: usize, max: usize },

    /// The recovered bytes do not match the declared checksum.
    #[error("checksum mismatch (declared {expected:#018x}, computed {actual:#010x})")]
    Integrity { expected: u64, actual: u32 },

    /// Any other structural problem with the input.
    #[error("malformed input: {0}")]
    Malformed(#[from] MalformedInput),
}

/// The underlying cause of a [`DecodeError::Malformed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInput {
    /// A length-prefix or checksum-suffix character does not carry a byte.
    #[error("character {ch:?} at index {index} is not a framing byte (expected U+0080..=U+017F)")]
    FramingChar { index: usize, ch: char },

    /// A symbol character lies outside the 15-bit symbol range.
    #[error("character {ch:?} at index {index} is not a symbol (expected U+0080..=U+807F)")]
    SymbolChar { index: usize, ch: char },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
