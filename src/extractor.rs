//! The feature extractor turns a stream of text chunks into quadgrams.
//!
//! Letters are copied into the rolling window byte by byte. Every other
//! codepoint closes the current run with a single PAD byte and starts a new
//! run. Chunks may be split anywhere, including inside a multi-byte
//! codepoint: the bytes of an unfinished sequence are held back until the
//! next chunk completes it, so feeding a text in pieces produces exactly the
//! same quadgrams as feeding it at once. Malformed bytes are skipped.

use crate::utf8::{decode, is_continuation, is_letter, sequence_len, Decoded};
use crate::window::{Window, PAD};

/// A trait that defines the interface for consuming quadgrams.
pub trait QuadgramSink {
    /// Consume the quadgram with the hash 'hash'. 'window' holds its bytes.
    fn update(&mut self, hash: u32, window: &Window);
}

/// Holds the scanning state of one classification session.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    window: Window,
    /// The head of a sequence that the last chunk cut short.
    pending: [u8; 4],
    /// Number of valid bytes in 'pending'. Zero when not waiting.
    pending_len: usize,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            window: Window::new(),
            pending: [0; 4],
            pending_len: 0,
        }
    }

    /// Start a new session.
    pub fn init(&mut self) {
        self.window.reset();
        self.pending_len = 0;
    }

    /// Return True if the extractor is waiting for the rest of a sequence.
    pub fn is_pending(&self) -> bool {
        self.pending_len > 0
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn put_byte<S: QuadgramSink>(&mut self, byte: u8, sink: &mut S) {
        if let Some(hash) = self.window.put_byte(byte) {
            sink.update(hash, &self.window);
        }
    }

    /// Route the codepoint 'c', encoded as 'bytes', into the window.
    fn put_char<S: QuadgramSink>(
        &mut self,
        c: char,
        bytes: &[u8],
        sink: &mut S,
    ) {
        if is_letter(c) {
            for &b in bytes {
                self.put_byte(b, sink);
            }
            return;
        }

        self.put_byte(PAD, sink);
        self.window.reset();
    }

    /// Try to complete the pending sequence with the head of 'chunk'.
    /// Returns the number of bytes of 'chunk' that were consumed.
    fn resume<S: QuadgramSink>(&mut self, chunk: &[u8], sink: &mut S) -> usize {
        let need = sequence_len(self.pending[0]) - self.pending_len;

        let mut taken = 0;
        while taken < need
            && taken < chunk.len()
            && is_continuation(chunk[taken])
        {
            self.pending[self.pending_len] = chunk[taken];
            self.pending_len += 1;
            taken += 1;
        }

        if taken == need {
            let seq = self.pending;
            let len = self.pending_len;
            self.pending_len = 0;
            if let Decoded::Char(c, clen) = decode(&seq[..len]) {
                self.put_char(c, &seq[..clen], sink);
            }
            return taken;
        }

        // Ran out of input. Keep waiting.
        if taken == chunk.len() {
            return taken;
        }

        // Something other than a continuation byte interrupted the sequence.
        // The bytes we held are garbage, and scanning restarts at the
        // interrupting byte.
        self.pending_len = 0;
        taken
    }

    /// Scan the text chunk 'chunk' and send the quadgrams to 'sink'.
    pub fn feed<S: QuadgramSink>(&mut self, chunk: &[u8], sink: &mut S) {
        let mut i = 0;

        if self.is_pending() {
            i = self.resume(chunk, sink);
            if self.is_pending() {
                return;
            }
        }

        while i < chunk.len() {
            match decode(&chunk[i..]) {
                Decoded::Char(c, clen) => {
                    self.put_char(c, &chunk[i..i + clen], sink);
                    i += clen;
                }
                Decoded::Invalid => {
                    i += 1;
                }
                Decoded::Incomplete => {
                    let rest = &chunk[i..];
                    self.pending[..rest.len()].copy_from_slice(rest);
                    self.pending_len = rest.len();
                    return;
                }
            }
        }
    }

    /// Flush the last quadgram. Calling this again without feeding more text
    /// does not produce any quadgram.
    pub fn finish<S: QuadgramSink>(&mut self, sink: &mut S) {
        self.put_byte(PAD, sink);
        self.window.rewind();
    }
}
