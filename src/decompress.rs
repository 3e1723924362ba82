use alloc::vec::Vec;

use crate::error::DecompressionError;

type Result<T> = core::result::Result<T, DecompressionError>;

// --- Constants ---

/// Number of items described by one flag word.
const FLAG_GROUP_SIZE: usize = 16;

/// Bias added to the 4-bit length field of a copy record.
const MIN_MATCH: usize = 3;

/// Mask extracting the length field from a copy record.
const LENGTH_MASK: usize = 0x0F;

/// Bit width of the length field; the distance field occupies the rest.
const LENGTH_BITS: usize = 4;

/// Decompresses a complete stream into the caller-owned `output` buffer.
///
/// `output` must be exactly as long as the original uncompressed data; the
/// stream carries no end marker, so the original size is the terminal
/// condition. Compressed bytes past the final produced byte are ignored (the
/// caller's framing delimits the stream).
///
/// # Errors
///
/// Fails with [`DecompressionError::UnexpectedEof`] if the stream ends before
/// `output` is filled, [`DecompressionError::InvalidDistance`] if a copy
/// reaches behind the start of the output, and
/// [`DecompressionError::OutputOverflow`] if an item would write past
/// `output.len()`. On error the output contents are unspecified.
pub fn decompress_into(input: &[u8], output: &mut [u8]) -> Result<()> {
    let mut in_idx = 0;
    let mut out_idx = 0;
    let end = input.len();

    while out_idx < output.len() {
        // 1. Load the flag word
        if in_idx + 2 > end {
            return Err(DecompressionError::UnexpectedEof);
        }
        let flags = u16::from_le_bytes([input[in_idx], input[in_idx + 1]]);
        in_idx += 2;

        // --- All-Literals Fast Path ---
        // A zero flag word with a full group of bytes available on both sides
        // is a straight 16-byte copy.
        if flags == 0
            && in_idx + FLAG_GROUP_SIZE <= end
            && out_idx + FLAG_GROUP_SIZE <= output.len()
        {
            output[out_idx..out_idx + FLAG_GROUP_SIZE]
                .copy_from_slice(&input[in_idx..in_idx + FLAG_GROUP_SIZE]);
            in_idx += FLAG_GROUP_SIZE;
            out_idx += FLAG_GROUP_SIZE;
            continue;
        }

        // 2. Mixed Literal/Copy Loop
        for i in 0..FLAG_GROUP_SIZE {
            if out_idx == output.len() {
                // Remaining slots of the final group are padding
                break;
            }
            let is_copy = (flags >> i) & 1 != 0;

            if is_copy {
                if in_idx + 2 > end {
                    return Err(DecompressionError::UnexpectedEof);
                }
                let record = u16::from_le_bytes([input[in_idx], input[in_idx + 1]]) as usize;
                in_idx += 2;

                let length = (record & LENGTH_MASK) + MIN_MATCH;
                let distance = (record >> LENGTH_BITS) + 1;

                apply_copy(output, &mut out_idx, distance, length)?;
            } else {
                if in_idx >= end {
                    return Err(DecompressionError::UnexpectedEof);
                }
                output[out_idx] = input[in_idx];
                in_idx += 1;
                out_idx += 1;
            }
        }
    }

    Ok(())
}

/// Decompresses a stream of `original_size` uncompressed bytes into a
/// freshly allocated vector.
///
/// Convenience wrapper around [`decompress_into`]; `original_size` must be
/// supplied out of band by whatever framed the compressed data.
pub fn decompress(input: &[u8], original_size: usize) -> Result<Vec<u8>> {
    let mut output = alloc::vec![0u8; original_size];
    decompress_into(input, &mut output)?;
    Ok(output)
}

/// Reproduces `length` bytes from `distance` behind the output cursor.
///
/// The copy advances byte-by-byte: when `distance < length` the source and
/// destination ranges alias, and each copied byte becomes the source of a
/// later one. A bulk copy would read stale bytes here.
#[inline]
fn apply_copy(
    output: &mut [u8],
    out_idx: &mut usize,
    distance: usize,
    length: usize,
) -> Result<()> {
    if distance > *out_idx {
        return Err(DecompressionError::InvalidDistance);
    }
    if *out_idx + length > output.len() {
        return Err(DecompressionError::OutputOverflow);
    }

    let src = *out_idx - distance;
    for k in 0..length {
        output[*out_idx + k] = output[src + k];
    }
    *out_idx += length;

    Ok(())
}
