//! The table-driven decoder (`spec.md` §4.4): one classifier routine
//! per instruction class, each narrowing the current instruction word
//! to a single id through masked opcode matching, conditioned on the
//! validity bitmap.
//!
//! Per `SPEC_FULL.md` §4 resolution 1, every per-class classifier
//! delegates to the same shared decision tree as the top-level one —
//! real SMOL bundles freely mix classes — so the class argument only
//! ever affects bundle bookkeeping in `bundle.rs`, never which ids are
//! reachable. Each classifier still performs its own `read` calls and
//! bitmap checks, preserving the per-call contract.
//!
//! The tree itself is a linear, alias-first scan over precomputed
//! `(mask, pattern, id)` triples drawn from the instruction table —
//! one of the equivalent representations `spec.md` §9 sanctions in
//! place of a hand-nested branch structure.

use crate::bitmap::ValidityBitmap;
use crate::tables::instructions::{InstClass, INSTRUCTIONS};

/// Per-call contract result: a matched id and its byte length, no
/// match, or a read failure (propagated verbatim from the byte
/// source).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    Matched { id: usize, len: u8 },
    NoMatch,
    ReadError,
}

/// Feeds bytes to the decoder on demand. `read(to)` ensures at least
/// `to` bytes are available from the current position and returns
/// them as a little-endian word; it fails if fewer than `to` bytes
/// remain.
pub trait ByteSource {
    fn read(&self, to: usize) -> Option<u32>;
}

/// A read-only view of a byte buffer at a fixed offset.
pub struct ByteCursor<'a> {
    pub buf: &'a [u8],
    pub offset: usize,
}

impl ByteSource for ByteCursor<'_> {
    fn read(&self, to: usize) -> Option<u32> {
        if self.offset + to > self.buf.len() {
            return None;
        }
        let mut word = 0u32;
        for (i, &byte) in self.buf[self.offset..self.offset + to].iter().enumerate() {
            word |= (byte as u32) << (8 * i);
        }
        Some(word)
    }
}

/// Dispatch to the classifier for `current_class` (`InstClass::None`
/// when no bundle is in progress). All classifiers mix into the same
/// shared tree; see the module docs for why `current_class` affects
/// only which of the (identical) classifier entry points is invoked,
/// never which ids are reachable.
pub fn classify(
    _current_class: InstClass,
    source: &dyn ByteSource,
    bitmap: &ValidityBitmap,
) -> DecodeOutcome {
    decode_shared(source, bitmap)
}

fn decode_shared(source: &dyn ByteSource, bitmap: &ValidityBitmap) -> DecodeOutcome {
    let Some(half) = source.read(2) else {
        return DecodeOutcome::ReadError;
    };

    let size_marker = half & 0b11;
    let (word, len) = if size_marker == 0b11 {
        match source.read(4) {
            Some(word) => (word, 4u8),
            None => return DecodeOutcome::ReadError,
        }
    } else {
        (half, 2u8)
    };

    for (id, inst) in INSTRUCTIONS.iter().enumerate() {
        if inst.len != len {
            continue;
        }
        if (word & inst.mask) != inst.pattern {
            continue;
        }
        if bitmap.is_set(id) {
            return DecodeOutcome::Matched { id, len };
        }
        // Matched the pattern but not enabled: keep searching, per
        // spec.md §4.4 ("the classifier continues searching").
    }

    DecodeOutcome::NoMatch
}

/// The stop bit: the top bit of the instruction's highest used byte.
/// Clear means "end of bundle here".
pub fn stop_bit(word: u32, len: u8) -> bool {
    let top_bit = len as u32 * 8 - 1;
    (word >> top_bit) & 1 == 0
}
