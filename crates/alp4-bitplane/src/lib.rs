//! Bit-plane extraction for binary DMD sequences.
//!
//! A grayscale frame (one byte per pixel) is sliced into eight bit planes.
//! Each plane is packed one bit per pixel, MSB-first within a byte: bit 7 of
//! byte 0 is pixel 0, bit 6 is pixel 1, and so on. This is the layout the
//! controller expects in `ALP_DATA_BINARY_TOPDOWN` sequences.
//!
//! ```
//! let pixels = [0b1000_0000u8, 0, 0b1000_0000, 0, 0, 0, 0, 0];
//! let plane = alp4_bitplane::extract(&pixels, 7)?;
//! assert_eq!(plane, vec![0b1010_0000]);
//! # Ok::<(), alp4_bitplane::BitPlaneError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

/// Number of bit planes in an 8-bit grayscale frame.
pub const PLANES: u8 = 8;

/// Bit-plane errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitPlaneError {
    /// Bit position outside 0..=7
    #[error("Bit position {0} out of range 0..=7")]
    BitOutOfRange(u8),

    /// Packed buffer too short for the requested pixel count
    #[error("Packed buffer too short: expected {expected} bytes, got {actual}")]
    PackedTooShort {
        /// Required byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Pixel buffer is not a whole number of rows
    #[error("Pixel count {pixels} is not a multiple of row width {width}")]
    RaggedRows {
        /// Pixel count
        pixels: usize,
        /// Row width
        width: usize,
    },

    /// Output buffer has the wrong size
    #[error("Output buffer length mismatch: expected {expected} bytes, got {actual}")]
    OutputLength {
        /// Required byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
}

/// Bytes needed to pack `pixel_count` pixels at one bit each.
#[must_use]
pub const fn packed_len(pixel_count: usize) -> usize {
    pixel_count.div_ceil(8)
}

fn check_bit(bit: u8) -> Result<(), BitPlaneError> {
    if bit >= PLANES {
        return Err(BitPlaneError::BitOutOfRange(bit));
    }
    Ok(())
}

fn pack_chunk(chunk: &[u8], bit: u8) -> u8 {
    chunk
        .iter()
        .enumerate()
        .fold(0u8, |byte, (i, &px)| byte | (((px >> bit) & 1) << (7 - i)))
}

/// Extract bit `bit` of every pixel into `out`.
///
/// Trailing bits of the last byte are zero.
///
/// # Errors
///
/// [`BitPlaneError::BitOutOfRange`] for `bit > 7`, [`BitPlaneError::OutputLength`]
/// when `out` is not exactly [`packed_len`] bytes.
pub fn extract_into(pixels: &[u8], bit: u8, out: &mut [u8]) -> Result<(), BitPlaneError> {
    check_bit(bit)?;
    let expected = packed_len(pixels.len());
    if out.len() != expected {
        return Err(BitPlaneError::OutputLength {
            expected,
            actual: out.len(),
        });
    }
    for (slot, chunk) in out.iter_mut().zip(pixels.chunks(8)) {
        *slot = pack_chunk(chunk, bit);
    }
    Ok(())
}

/// Extract bit `bit` of every pixel as a packed buffer.
///
/// # Errors
///
/// [`BitPlaneError::BitOutOfRange`] for `bit > 7`.
pub fn extract(pixels: &[u8], bit: u8) -> Result<Vec<u8>, BitPlaneError> {
    let mut out = vec![0u8; packed_len(pixels.len())];
    extract_into(pixels, bit, &mut out)?;
    Ok(out)
}

/// Extract bit `bit` row by row, padding each row to a whole byte.
///
/// Matches the device layout of binary frames whose width is not a multiple
/// of eight. For the usual DMD widths the result equals [`extract`].
///
/// # Errors
///
/// [`BitPlaneError::BitOutOfRange`] for `bit > 7`, [`BitPlaneError::RaggedRows`]
/// when `pixels` is not a whole number of `width`-pixel rows.
pub fn extract_rows(pixels: &[u8], width: usize, bit: u8) -> Result<Vec<u8>, BitPlaneError> {
    check_bit(bit)?;
    if width == 0 || pixels.len() % width != 0 {
        return Err(BitPlaneError::RaggedRows {
            pixels: pixels.len(),
            width,
        });
    }
    let row_bytes = packed_len(width);
    let mut out = vec![0u8; row_bytes * (pixels.len() / width)];
    for (row_out, row) in out.chunks_mut(row_bytes).zip(pixels.chunks(width)) {
        extract_into(row, bit, row_out)?;
    }
    Ok(out)
}

/// Extract all eight planes, index 0 being the least significant bit.
#[must_use]
pub fn extract_all(pixels: &[u8]) -> Vec<Vec<u8>> {
    (0..PLANES)
        .map(|bit| pixels.chunks(8).map(|chunk| pack_chunk(chunk, bit)).collect())
        .collect()
}

/// Pack 0/1 values (any non-zero counts as 1) MSB-first.
#[must_use]
pub fn pack(values: &[u8]) -> Vec<u8> {
    values
        .chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &v)| byte | (u8::from(v != 0) << (7 - i)))
        })
        .collect()
}

/// Unpack `pixel_count` bits into one 0/1 byte per pixel.
///
/// # Errors
///
/// [`BitPlaneError::PackedTooShort`] when `packed` holds fewer than
/// `pixel_count` bits.
pub fn unpack(packed: &[u8], pixel_count: usize) -> Result<Vec<u8>, BitPlaneError> {
    let expected = packed_len(pixel_count);
    if packed.len() < expected {
        return Err(BitPlaneError::PackedTooShort {
            expected,
            actual: packed.len(),
        });
    }
    Ok((0..pixel_count)
        .map(|ind| (packed[ind / 8] >> (7 - ind % 8)) & 1)
        .collect())
}
