//! MD5 message digest (RFC 1321)
//!
//! CBF authenticates the compressed payload with a `Content-MD5` header
//! field, so the digest is part of the interchange format and has to be
//! the real algorithm, not an ad-hoc hash. Implemented here directly, the
//! same way the wire framing implements its own checksum.

/// Per-step rotation amounts, four per round
const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Round constants: floor(2^32 * abs(sin(i + 1)))
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Streaming MD5 hashing session.
///
/// One session per digest: create, feed bytes with [`update`](Md5::update),
/// then consume with [`finish`](Md5::finish).
#[derive(Debug, Clone)]
pub struct Md5 {
    state: [u32; 4],
    count: u64,
    buffer: [u8; 64],
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Create a fresh hashing session
    #[inline]
    pub const fn new() -> Self {
        Self {
            state: [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476],
            count: 0,
            buffer: [0; 64],
        }
    }

    /// Absorb input bytes
    pub fn update(&mut self, input: &[u8]) {
        let mut offset = (self.count % 64) as usize;
        self.count += input.len() as u64;

        let mut rest = input;
        if offset > 0 {
            let fill = (64 - offset).min(rest.len());
            self.buffer[offset..offset + fill].copy_from_slice(&rest[..fill]);
            offset += fill;
            rest = &rest[fill..];

            if offset < 64 {
                return;
            }
            let block = self.buffer;
            self.transform(&block);
        }

        let mut chunks = rest.chunks_exact(64);
        for chunk in chunks.by_ref() {
            let mut block = [0u8; 64];
            block.copy_from_slice(chunk);
            self.transform(&block);
        }

        let tail = chunks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
    }

    /// Finalize the session: pad, append the bit length, and extract the
    /// 16-byte digest (state words in little-endian order)
    pub fn finish(mut self) -> [u8; 16] {
        let bit_count = self.count.wrapping_mul(8);
        let mut offset = (self.count % 64) as usize;

        self.buffer[offset] = 0x80;
        offset += 1;

        if offset > 56 {
            self.buffer[offset..].fill(0);
            let block = self.buffer;
            self.transform(&block);
            offset = 0;
        }

        self.buffer[offset..56].fill(0);
        self.buffer[56..].copy_from_slice(&bit_count.to_le_bytes());
        let block = self.buffer;
        self.transform(&block);

        let mut digest = [0u8; 16];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        digest
    }

    /// Canonical four-round, 64-step block compression
    fn transform(&mut self, block: &[u8; 64]) {
        let mut x = [0u32; 16];
        for (word, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let [mut a, mut b, mut c, mut d] = self.state;

        for i in 0..64 {
            let (f, g) = match i {
                0..=15 => ((b & c) | (!b & d), i),
                16..=31 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
                _ => (c ^ (b | !d), (7 * i) % 16),
            };

            let tmp = f
                .wrapping_add(a)
                .wrapping_add(K[i])
                .wrapping_add(x[g]);
            a = d;
            d = c;
            c = b;
            b = b.wrapping_add(tmp.rotate_left(S[i]));
        }

        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
    }
}

/// One-shot MD5 of a byte sequence
#[inline]
pub fn digest(data: &[u8]) -> [u8; 16] {
    let mut md5 = Md5::new();
    md5.update(data);
    md5.finish()
}
