use alloc::vec::Vec;

use crate::error::CompressionError;
use crate::scratch::{EMPTY_ENTRY, Scratch, context_hash, worst_case_output_bytes};

type Result<T> = core::result::Result<T, CompressionError>;

/// Minimum match length required to encode a copy record.
const MIN_MATCH: usize = 3;

/// Maximum match length (4-bit length field storing `length - 3`).
const MAX_MATCH: usize = 18;

/// Maximum back-reference distance (12-bit field storing `distance - 1`).
const MAX_DISTANCE: usize = 4096;

/// Number of items described by one flag word.
const FLAG_GROUP_SIZE: usize = 16;

/// A single compression decision, decoupled from its packed wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Literal(u8),
    Copy { distance: u16, length: u8 },
}

/// Bounds-checked write cursor over the caller-owned destination buffer.
struct OutputCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OutputCursor<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn write_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(CompressionError::BufferTooSmall);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

/// Accumulates one control-flag group: a 16-bit flag word plus up to 16 items.
///
/// Flag bit `i` describes item `i` (0 = literal, 1 = copy). The group is
/// flushed to the output as the flag word (little endian) followed by the
/// items in slot order.
struct FlagGroup {
    flags: u16,
    item_count: usize,
    buffer: [u8; 2 * FLAG_GROUP_SIZE], // Max size: 16 copy records * 2 bytes
    buffer_len: usize,
}

impl FlagGroup {
    const fn new() -> Self {
        Self {
            flags: 0,
            item_count: 0,
            buffer: [0; 2 * FLAG_GROUP_SIZE],
            buffer_len: 0,
        }
    }

    /// Appends an item to the current group, flushing when 16 slots fill.
    fn push(&mut self, item: Item, out: &mut OutputCursor) -> Result<()> {
        match item {
            Item::Literal(byte) => {
                // Flag bit 0 is implicit
                self.buffer[self.buffer_len] = byte;
                self.buffer_len += 1;
            }
            Item::Copy { distance, length } => {
                self.flags |= 1 << self.item_count;
                let record = encode_copy(distance, length);
                let bytes = record.to_le_bytes();
                self.buffer[self.buffer_len] = bytes[0];
                self.buffer[self.buffer_len + 1] = bytes[1];
                self.buffer_len += 2;
            }
        }
        self.item_count += 1;
        if self.item_count == FLAG_GROUP_SIZE {
            self.flush(out)?;
        }
        Ok(())
    }

    /// Writes the current group to the output and resets state.
    ///
    /// In a partial final group the unused high flag bits stay zero, keeping
    /// the output deterministic.
    fn flush(&mut self, out: &mut OutputCursor) -> Result<()> {
        if self.item_count > 0 {
            out.write_slice(&self.flags.to_le_bytes())?;
            out.write_slice(&self.buffer[..self.buffer_len])?;
            self.flags = 0;
            self.item_count = 0;
            self.buffer_len = 0;
        }
        Ok(())
    }
}

/// Packs a copy record: high 12 bits `distance - 1`, low 4 bits `length - 3`.
#[inline]
const fn encode_copy(distance: u16, length: u8) -> u16 {
    ((distance - 1) << 4) | (length as u16 - MIN_MATCH as u16)
}

/// Compresses `input` into the caller-owned `output` buffer.
///
/// `output` must be at least [`worst_case_output_bytes`]`(input.len())` bytes;
/// smaller buffers may fail with [`CompressionError::BufferTooSmall`] when the
/// input does not compress. `scratch` is cleared on entry, so a single
/// [`Scratch`] may be pooled across any number of independent calls.
///
/// Returns the number of compressed bytes written.
pub fn compress_into(input: &[u8], output: &mut [u8], scratch: &mut Scratch) -> Result<usize> {
    scratch.reset();
    let mut out = OutputCursor::new(output);
    let mut group = FlagGroup::new();
    let mut in_idx = 0;

    while in_idx < input.len() {
        let item = match find_match(input, in_idx, scratch) {
            Some((distance, length)) => {
                // Update the hash tables for all bytes covered by the match
                for _ in 0..length {
                    scratch.update(input, in_idx);
                    in_idx += 1;
                }
                Item::Copy {
                    distance: distance as u16,
                    length: length as u8,
                }
            }
            None => {
                let byte = input[in_idx];
                scratch.update(input, in_idx);
                in_idx += 1;
                Item::Literal(byte)
            }
        };
        group.push(item, &mut out)?;
    }

    // Flush any remaining items in the final partial group
    group.flush(&mut out)?;
    Ok(out.pos)
}

/// Compresses `input` into a freshly allocated vector.
///
/// Convenience wrapper around [`compress_into`] that sizes the destination by
/// the worst-case rule and owns its own scratch memory.
#[must_use]
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut scratch = Scratch::new();
    let mut output = alloc::vec![0u8; worst_case_output_bytes(input.len())];
    let written = match compress_into(input, &mut output, &mut scratch) {
        Ok(n) => n,
        // The destination satisfies the worst-case bound.
        Err(CompressionError::BufferTooSmall) => unreachable!(),
    };
    output.truncate(written);
    output
}

/// Searches both hash tables for the longest profitable match at `pos`.
///
/// Candidate offsets are validated by direct byte comparison since buckets
/// may hold stale or colliding contexts. Returns `(distance, length)` when a
/// match of at least [`MIN_MATCH`] bytes within [`MAX_DISTANCE`] exists.
fn find_match(input: &[u8], pos: usize, scratch: &Scratch) -> Option<(usize, usize)> {
    if pos + MIN_MATCH > input.len() {
        return None; // Too close to the end to probe a full context window
    }

    let hash = context_hash(&input[pos..pos + MIN_MATCH]);
    let mut best_len = 0;
    let mut best_dist = 0;

    for entry in scratch.candidates(hash) {
        if entry == EMPTY_ENTRY {
            continue;
        }
        let candidate = entry as usize;
        debug_assert!(candidate < pos);

        let dist = pos - candidate;
        if dist > MAX_DISTANCE {
            continue;
        }

        // Check the byte at `best_len` to fail fast on shorter candidates
        if pos + best_len < input.len() && input[candidate + best_len] == input[pos + best_len] {
            let match_len = common_prefix_len(&input[pos..], &input[candidate..], MAX_MATCH);
            if match_len >= MIN_MATCH && match_len > best_len {
                best_len = match_len;
                best_dist = dist;
                if best_len == MAX_MATCH {
                    break;
                }
            }
        }
    }

    (best_len >= MIN_MATCH).then_some((best_dist, best_len))
}

/// Finds the length of the common prefix between two slices, up to `max`.
///
/// The slices may overlap in the underlying input; comparing past `pos` into
/// the candidate's own extension is what makes run-length style matches
/// (distance < length) work.
#[inline]
fn common_prefix_len(a: &[u8], b: &[u8], max: usize) -> usize {
    let limit = a.len().min(b.len()).min(max);
    let mut len = 0;
    while len < limit && a[len] == b[len] {
        len += 1;
    }
    len
}
