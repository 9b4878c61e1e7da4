/// Growable bit buffer, packed most significant bit first
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bits.div_ceil(8)),
            bit_len: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.buf.push(0);
        }
        if bit {
            if let Some(last) = self.buf.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    /// Appends the low `len` bits of `code`, highest of them first.
    pub fn push_bits(&mut self, code: u64, len: usize) {
        debug_assert!(len <= 64);
        for shift in (0..len).rev() {
            self.push_bit((code >> shift) & 1 == 1);
        }
    }

    pub fn push_u16(&mut self, value: u16) {
        self.push_bits(u64::from(value), 16);
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Valid bits in the final byte, 1..=8 (8 when the byte is full or the buffer is empty).
    pub fn last_byte_bits(&self) -> u8 {
        match self.bit_len % 8 {
            0 => 8,
            n => n as u8,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

/// Random-access bit view over a byte slice
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    buf: &'a [u8],
}

impl<'a> BitReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn bit(&self, pos: usize) -> Option<bool> {
        let byte = self.buf.get(pos / 8)?;
        Some(byte & (0x80 >> (pos % 8)) != 0)
    }

    /// Reads 16 bits starting at an arbitrary bit position.
    pub fn read_u16(&self, pos: usize) -> Option<u16> {
        let index = pos / 8;
        let split = pos % 8;
        let hi = u32::from(*self.buf.get(index)?);
        let mid = u32::from(*self.buf.get(index + 1)?);
        if split == 0 {
            return Some(((hi << 8) | mid) as u16);
        }
        let lo = u32::from(*self.buf.get(index + 2)?);
        let window = (hi << 16) | (mid << 8) | lo;
        Some((window >> (8 - split)) as u16)
    }

    pub fn bit_len(&self) -> usize {
        self.buf.len() * 8
    }
}
