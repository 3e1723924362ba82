//! Scratch memory for the compressor: the dual hash tables and the buffer
//! sizing rules the caller must honor.

use core::mem::size_of;

/// Number of buckets in each hash table (12-bit hash).
const TABLE_LEN: usize = 4096;

/// Hash mask for the 4096-entry tables.
const HASH_MASK: u32 = 0xFFF;

/// Multiplier for the 3-byte context hash (Ross Williams' LZRW constant).
const HASH_MULTIPLIER: u32 = 40543;

/// Marker for an empty hash table bucket.
pub(crate) const EMPTY_ENTRY: u32 = u32::MAX;

/// Number of context bytes fed to the hash function.
pub(crate) const CONTEXT_LEN: usize = 3;

/// Working memory for compression, reusable across calls to avoid
/// allocation churn.
///
/// Two flat tables map a 3-byte context hash to the most recent input offset
/// where that context was seen. Inserts alternate between the tables, so each
/// bucket effectively remembers the two most recent offsets for its hash.
/// Entries are overwritten unconditionally; stale or colliding offsets are
/// filtered by direct byte comparison in the match finder.
pub struct Scratch {
    primary: [u32; TABLE_LEN],
    secondary: [u32; TABLE_LEN],
    toggle: bool,
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

impl Scratch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            primary: [EMPTY_ENTRY; TABLE_LEN],
            secondary: [EMPTY_ENTRY; TABLE_LEN],
            toggle: false,
        }
    }

    /// Clears both tables for a new compression call.
    ///
    /// Offsets recorded by a previous call must never surface as match
    /// candidates in a new one.
    pub(crate) fn reset(&mut self) {
        self.primary.fill(EMPTY_ENTRY);
        self.secondary.fill(EMPTY_ENTRY);
        self.toggle = false;
    }

    /// Returns the two bucket entries for `hash`, either of which may be
    /// [`EMPTY_ENTRY`].
    pub(crate) fn candidates(&self, hash: usize) -> [u32; 2] {
        [self.primary[hash], self.secondary[hash]]
    }

    /// Records `idx` as the most recent offset for its 3-byte context.
    ///
    /// This should be called for every byte processed (literal or matched) so
    /// future searches can reference the bytes a match skipped over.
    pub(crate) fn update(&mut self, input: &[u8], idx: usize) {
        // Offsets at or past the sentinel do not fit a table entry and are
        // simply not recorded.
        if idx + CONTEXT_LEN <= input.len() && idx < EMPTY_ENTRY as usize {
            let h = context_hash(&input[idx..idx + CONTEXT_LEN]);
            let table = if self.toggle {
                &mut self.secondary
            } else {
                &mut self.primary
            };
            table[h] = idx as u32;
            self.toggle = !self.toggle;
        }
    }
}

/// Hashes a 3-byte context window into a table index.
///
/// Multiplicative/XOR mix so that common short byte sequences spread across
/// the 4096 buckets.
#[inline]
pub(crate) fn context_hash(b: &[u8]) -> usize {
    let v = ((((b[0] as u32) << 4) ^ (b[1] as u32)) << 4) ^ (b[2] as u32);
    ((v.wrapping_mul(HASH_MULTIPLIER) >> 4) & HASH_MASK) as usize
}

/// Scratch memory required by a compression call, in bytes.
///
/// A compile-time constant determined by the two hash table sizes; it does
/// not depend on the input.
#[must_use]
pub const fn required_scratch_bytes() -> usize {
    2 * TABLE_LEN * size_of::<u32>()
}

/// Upper bound on compressed output size for an `input_len`-byte input.
///
/// The worst case is an all-literal encoding: every input byte is copied
/// through plus one 2-byte flag word per group of 16 items. Destination
/// buffers passed to [`compress_into`](crate::compress_into) must be at least
/// this large to be guaranteed to fit.
#[must_use]
pub const fn worst_case_output_bytes(input_len: usize) -> usize {
    input_len + 2 * input_len.div_ceil(16)
}
