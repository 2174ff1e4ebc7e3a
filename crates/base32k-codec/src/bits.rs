//! Forward-only, MSB-first bit cursors over byte buffers.

/// Reads fixed-width bit groups from a byte slice, most significant bit first.
///
/// Groups may straddle byte boundaries. Bits requested past the end of the
/// slice read as zero.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read the next `n` bits (at most 32) as an unsigned integer.
    pub fn read_bits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= u32::BITS, "cannot read {n} bits into a u32");
        let mut value = 0u32;
        let mut left = n;
        while left > 0 {
            let Some(&byte) = self.buf.get(self.pos / 8) else {
                value = value.checked_shl(left).unwrap_or(0);
                self.pos += left as usize;
                break;
            };
            let offset = (self.pos % 8) as u32;
            let avail = 8 - offset;
            let take = avail.min(left);
            let bits = (u32::from(byte) >> (avail - take)) & low_mask(take);
            value = (value << take) | bits;
            self.pos += take as usize;
            left -= take;
        }
        value
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bits left before the end of the buffer.
    pub fn remaining(&self) -> usize {
        (self.buf.len() * 8).saturating_sub(self.pos)
    }
}

/// Writes fixed-width bit groups into a preallocated byte slice, most
/// significant bit first.
///
/// Bits that land past the end of the slice are dropped. The cursor keeps
/// advancing so [`BitWriter::position`] reports every bit offered.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Create a writer positioned at the first bit of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Write the low `n` bits (at most 32) of `value`.
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= u32::BITS, "cannot write {n} bits from a u32");
        let mut left = n;
        while left > 0 {
            let index = self.pos / 8;
            let Some(slot) = self.buf.get_mut(index) else {
                self.pos += left as usize;
                return;
            };
            let offset = (self.pos % 8) as u32;
            let avail = 8 - offset;
            let take = avail.min(left);
            let chunk = (value >> (left - take)) & low_mask(take);
            let shift = avail - take;
            let mask = (low_mask(take) << shift) as u8;
            *slot = (*slot & !mask) | ((chunk << shift) as u8);
            self.pos += take as usize;
            left -= take;
        }
    }

    /// Number of bits offered so far, including dropped ones.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether every bit of the buffer has been written.
    pub fn is_full(&self) -> bool {
        self.pos >= self.buf.len() * 8
    }
}

fn low_mask(n: u32) -> u32 {
    u32::MAX.checked_shr(u32::BITS - n).unwrap_or(0)
}
