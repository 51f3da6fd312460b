//! Fixed-layout records passed by pointer to the `...Ex` entry points.
//!
//! Field order, field widths and array lengths follow the vendor header. The
//! header packs these structs without padding; every layout below is
//! naturally padding-free under `repr(C)`, which the tests check.

use core::ffi::{c_long, c_ulong};

use crate::codes::ALP_PUT_LINES;

/// Number of gate bytes in [`AlpDynSynchOutGate`].
pub const SYNCH_GATE_LEN: usize = 16;
/// Number of entries in [`FlutWrite::frame_numbers`].
pub const FLUT_ENTRIES: usize = 4096;
/// Number of entries in [`AlpShearTable::shift_distance`].
pub const SHEAR_ENTRIES: usize = 2048;
/// Number of bytes in [`AlpDmdMask::bitmap`].
pub const DMD_MASK_BYTES: usize = 2048;

/// `tAlpDynSynchOutGate`, for `ALP_DEV_DYN_SYNCH_OUT[1..3]_GATE` in
/// `AlpDevControlEx`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlpDynSynchOutGate {
    /// 1..=16 enables the output, 0 tri-states it.
    pub period: u8,
    /// 0: active pulse is low, 1: high.
    pub polarity: u8,
    /// Only the first `period` bytes are used, each 0 or 1.
    pub gate: [u8; SYNCH_GATE_LEN],
}

impl AlpDynSynchOutGate {
    /// Build a gate from a pattern of up to 16 steps.
    ///
    /// Returns `None` if the pattern is longer than 16 steps.
    #[must_use]
    pub fn from_pattern(pattern: &[bool], active_high: bool) -> Option<Self> {
        if pattern.len() > SYNCH_GATE_LEN {
            return None;
        }
        let mut gate = [0u8; SYNCH_GATE_LEN];
        for (slot, &on) in gate.iter_mut().zip(pattern) {
            *slot = u8::from(on);
        }
        Some(Self {
            period: u8::try_from(pattern.len()).ok()?,
            polarity: u8::from(active_high),
            gate,
        })
    }
}

/// `tFlutWrite`, for `ALP_FLUT_WRITE_9BIT` / `ALP_FLUT_WRITE_18BIT` in
/// `AlpProjControlEx`.
///
/// The API reads only the first `size` entries and keeps the 9 or 18 least
/// significant bits of each. `offset + size` must not exceed
/// `ALP_FLUT_MAX_ENTRIES9` (or half of it for 18-bit entries); the API does
/// not reject overflow.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlutWrite {
    /// First LUT entry to write.
    pub offset: c_long,
    /// Number of entries; `ALP_DEFAULT` means the maximum and requires offset 0.
    pub size: c_long,
    /// Frame numbers.
    pub frame_numbers: [c_ulong; FLUT_ENTRIES],
}

impl Default for FlutWrite {
    fn default() -> Self {
        Self {
            offset: 0,
            size: 0,
            frame_numbers: [0; FLUT_ENTRIES],
        }
    }
}

impl FlutWrite {
    /// Fill a record from a frame list, writing at `offset`.
    ///
    /// Returns `None` if more than 4096 frames are given.
    #[must_use]
    pub fn from_frames(offset: u16, frames: &[u32]) -> Option<Self> {
        if frames.len() > FLUT_ENTRIES {
            return None;
        }
        let mut record = Self {
            offset: c_long::from(offset),
            size: c_long::try_from(frames.len()).ok()?,
            ..Self::default()
        };
        for (slot, &frame) in record.frame_numbers.iter_mut().zip(frames) {
            *slot = c_ulong::from(frame);
        }
        Some(record)
    }
}

/// `tAlpShearTable`, for `ALP_X_SHEAR` in `AlpProjControlEx`.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlpShearTable {
    /// First row to write.
    pub offset: c_long,
    /// Number of rows.
    pub size: c_long,
    /// Shift per row, 0..=511.
    pub shift_distance: [c_long; SHEAR_ENTRIES],
}

impl Default for AlpShearTable {
    fn default() -> Self {
        Self {
            offset: 0,
            size: 0,
            shift_distance: [0; SHEAR_ENTRIES],
        }
    }
}

/// `tAlpDmdMask`, for `ALP_DMD_MASK_WRITE` in `AlpProjControlEx`.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlpDmdMask {
    /// Bitmap position in a 16x16 mask, `ALP_DEFAULT` = 0.
    pub row_offset: c_long,
    /// Rows to write, or `ALP_DEFAULT` for the full mask.
    pub row_count: c_long,
    /// Each bit controls one block of DMD pixels.
    pub bitmap: [u8; DMD_MASK_BYTES],
}

impl Default for AlpDmdMask {
    fn default() -> Self {
        Self {
            row_offset: 0,
            row_count: 0,
            bitmap: [0; DMD_MASK_BYTES],
        }
    }
}

/// `tAlpProjProgress`, filled by `AlpProjInquireEx(ALP_PROJ_PROGRESS)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlpProjProgress {
    /// Queue id of the running sequence.
    pub current_queue_id: c_ulong,
    /// Sequence id of the running sequence. A sequence can be enqueued more than once.
    pub sequence_id: c_ulong,
    /// Sequences waiting in the queue.
    pub waiting_sequences: c_ulong,
    /// Iterations still to be done.
    pub sequence_counter: c_ulong,
    /// Non-zero once `sequence_counter` underflowed (indefinite runs).
    pub sequence_counter_underflow: c_ulong,
    /// Frames left in the current iteration.
    pub frame_counter: c_ulong,
    /// Picture time of each frame, microseconds.
    pub picture_time: c_ulong,
    /// Frames displayed per iteration.
    pub frames_per_sub_sequence: c_ulong,
    /// Combination of the `ALP_FLAG_*` values.
    pub flags: c_ulong,
}

impl AlpProjProgress {
    /// True when `flag` (one of the `ALP_FLAG_*` values) is set.
    #[must_use]
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & c_ulong::from(flag) != 0
    }
}

/// `tAlpLinePut`, the user struct of `AlpSeqPutEx`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlpLinePut {
    /// Always `ALP_PUT_LINES`.
    pub transfer_mode: c_long,
    /// First picture to load.
    pub pic_offset: c_long,
    /// Number of pictures, 0 for the rest of the sequence.
    pub pic_load: c_long,
    /// First line of the frame section.
    pub line_offset: c_long,
    /// Number of lines, 0 for every line from `line_offset`.
    pub line_load: c_long,
}

impl AlpLinePut {
    /// Build a line transfer descriptor.
    #[must_use]
    pub fn new(pic_offset: i32, pic_load: i32, line_offset: i32, line_load: i32) -> Self {
        Self {
            transfer_mode: c_long::from(ALP_PUT_LINES),
            pic_offset: c_long::from(pic_offset),
            pic_load: c_long::from(pic_load),
            line_offset: c_long::from(line_offset),
            line_load: c_long::from(line_load),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    const LONG: usize = size_of::<c_long>();
    const ULONG: usize = size_of::<c_ulong>();

    #[test]
    fn synch_gate_is_eighteen_bytes() {
        assert_eq!(size_of::<AlpDynSynchOutGate>(), 18);
    }

    #[test]
    fn record_sizes_match_header_layout() {
        assert_eq!(size_of::<FlutWrite>(), 2 * LONG + FLUT_ENTRIES * ULONG);
        assert_eq!(size_of::<AlpShearTable>(), 2 * LONG + SHEAR_ENTRIES * LONG);
        assert_eq!(size_of::<AlpDmdMask>(), 2 * LONG + DMD_MASK_BYTES);
        assert_eq!(size_of::<AlpProjProgress>(), 9 * ULONG);
        assert_eq!(size_of::<AlpLinePut>(), 5 * LONG);
    }

    #[test]
    fn synch_gate_from_pattern() {
        let gate = AlpDynSynchOutGate::from_pattern(&[true, false, true], true);
        let gate = gate.unwrap_or_default();
        assert_eq!(gate.period, 3);
        assert_eq!(gate.polarity, 1);
        assert_eq!(&gate.gate[..4], &[1, 0, 1, 0]);

        assert!(AlpDynSynchOutGate::from_pattern(&[true; 17], false).is_none());
    }

    #[test]
    fn flut_from_frames() {
        let flut = FlutWrite::from_frames(256, &[3, 1, 2]).unwrap_or_default();
        assert_eq!(flut.offset, 256);
        assert_eq!(flut.size, 3);
        assert_eq!(&flut.frame_numbers[..4], &[3, 1, 2, 0]);

        assert!(FlutWrite::from_frames(0, &[0; FLUT_ENTRIES + 1]).is_none());
    }

    #[test]
    fn line_put_uses_put_lines_mode() {
        let put = AlpLinePut::new(1, 2, 10, 20);
        assert_eq!(put.transfer_mode, c_long::from(ALP_PUT_LINES));
        assert_eq!(put.line_load, 20);
    }

    #[test]
    fn progress_flags() {
        let progress = AlpProjProgress {
            flags: 4 | 8,
            ..AlpProjProgress::default()
        };
        assert!(progress.has_flag(crate::codes::ALP_FLAG_SEQUENCE_INDEFINITE));
        assert!(progress.has_flag(crate::codes::ALP_FLAG_FRAME_FINISHED));
        assert!(!progress.has_flag(crate::codes::ALP_FLAG_QUEUE_IDLE));
    }
}
