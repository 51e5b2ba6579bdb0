//! The rolling window of the last four bytes, and the hash functions that map
//! a quadgram and a label into the feature table.

/// The number of bytes in a feature.
pub const NGRAM_SIZE: usize = 4;

/// Marks run boundaries in the window. This byte never appears in valid
/// UTF-8 so it can't be confused with text.
pub const PAD: u8 = 0xff;

/// The initial value of the feature hash.
pub const HASH_SEED: u32 = 1315423911;

/// One step of the mixing function.
#[inline(always)]
fn mix(h: u32, byte: u32) -> u32 {
    h ^ (h << 5).wrapping_add(byte).wrapping_add(h >> 2)
}

/// Hash the four bytes of 'gram' in circular order, starting at 'pos' % 4.
pub fn hash_quadgram(gram: &[u8; NGRAM_SIZE], pos: usize) -> u32 {
    let mut h = HASH_SEED;
    for i in 0..NGRAM_SIZE {
        h = mix(h, gram[(pos + i) % NGRAM_SIZE] as u32);
    }
    h
}

/// Combine the quadgram hash 'h' with the label index 'label'.
pub fn hash_label(h: u32, label: usize) -> u32 {
    mix(h, label as u32)
}

/// A four byte ring buffer with a write cursor. The cursor only moves forward
/// within a session, and the physical slot is 'pos % 4'.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    bytes: [u8; NGRAM_SIZE],
    pos: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    pub fn new() -> Self {
        let mut w = Window {
            bytes: [0; NGRAM_SIZE],
            pos: 0,
        };
        w.reset();
        w
    }

    /// Start a new run: the window holds a single PAD byte.
    pub fn reset(&mut self) {
        self.bytes[0] = PAD;
        self.pos = 1;
    }

    /// Move the cursor to the start without touching the content. Pushing
    /// fewer than four bytes after this never completes a quadgram.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Write 'byte' into the window and return the completed quadgram hash,
    /// if the window has seen at least four bytes since the last reset.
    pub fn put_byte(&mut self, byte: u8) -> Option<u32> {
        self.bytes[self.pos % NGRAM_SIZE] = byte;
        self.pos += 1;
        if self.pos >= NGRAM_SIZE {
            return Some(hash_quadgram(&self.bytes, self.pos));
        }
        None
    }

    /// Return the bytes of the window, oldest first.
    pub fn ordered(&self) -> [u8; NGRAM_SIZE] {
        let mut out = [0; NGRAM_SIZE];
        for (i, b) in out.iter_mut().enumerate() {
            *b = self.bytes[(self.pos + i) % NGRAM_SIZE];
        }
        out
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
}
