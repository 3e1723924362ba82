//! # LZRW3-A Compression
//!
//! `lzrw3a` is a safe, pure-Rust implementation of the LZRW3-A compression
//! algorithm: a hash-accelerated LZ77 variant that trades compression ratio
//! for very high throughput and a small, fixed working-memory footprint.
//!
//! The compressed stream is a sequence of control-flag groups: one 16-bit
//! flag word followed by up to 16 items, each item either a literal byte or a
//! 2-byte copy record (12-bit distance, 4-bit length). The stream carries no
//! end marker and no original size; callers that persist or transmit
//! compressed data must frame it with the uncompressed length themselves and
//! hand that length back to [`decompress`].
//!
//! ## Example
//!
//! ```rust
//! use lzrw3a::{compress, decompress};
//!
//! let original = b"the cat sat on the mat, the cat sat on the mat";
//! let compressed = compress(original);
//! assert!(compressed.len() < original.len());
//!
//! let restored = decompress(&compressed, original.len()).expect("Decompression failed");
//! assert_eq!(restored, original);
//! ```
//!
//! Callers that process many buffers can avoid per-call allocation entirely
//! with [`compress_into`]/[`decompress_into`], pooling one [`Scratch`] and
//! destination buffers sized by [`worst_case_output_bytes`].

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod compress;
pub mod decompress;
pub mod error;
pub mod scratch;

pub use compress::{compress, compress_into};
pub use decompress::{decompress, decompress_into};
pub use error::{CompressionError, DecompressionError};
pub use scratch::{Scratch, required_scratch_bytes, worst_case_output_bytes};
