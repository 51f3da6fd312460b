//! Numeric parameter codes of the ALP-4.x API.
//!
//! Every value here is part of the vendor library's ABI and must match the
//! `alp.h` header byte for byte. Codes are `i32` because the API passes them
//! as C `long` on the platforms the library ships for.

/// Standard parameter value: let the API choose.
pub const ALP_DEFAULT: i32 = 0;
/// Generic enable value.
pub const ALP_ENABLE: i32 = 1;
/// Identifier the API uses for "no sequence" (e.g. `ALP_PROJ_QUEUE_ID`).
pub const ALP_INVALID_ID: u32 = u32::MAX;

/// Successful execution.
pub const ALP_OK: i32 = 0;

// Device states reported by `ALP_DEV_STATE`.
/// The device is busy.
pub const ALP_DEV_BUSY: i32 = 1100;
/// The device is ready.
pub const ALP_DEV_READY: i32 = 1101;
/// The device is idle.
pub const ALP_DEV_IDLE: i32 = 1102;

// Projection states reported by `ALP_PROJ_STATE`.
/// A sequence is being displayed.
pub const ALP_PROJ_ACTIVE: i32 = 1200;
/// No sequence is being displayed.
pub const ALP_PROJ_IDLE: i32 = 1201;

// AlpDevInquire
/// Serial number of the ALP device.
pub const ALP_DEVICE_NUMBER: i32 = 2000;
/// Version number of the ALP device.
pub const ALP_VERSION: i32 = 2001;
/// Current ALP status, one of `ALP_DEV_BUSY`, `ALP_DEV_READY`, `ALP_DEV_IDLE`.
pub const ALP_DEV_STATE: i32 = 2002;
/// On-board sequence memory still available, in binary pictures.
pub const ALP_AVAIL_MEMORY: i32 = 2003;

// Temperatures, signed long with 1 LSB = 1/256 degree C.
/// DDC FPGA temperature diode (LM95231 external channel).
pub const ALP_DDC_FPGA_TEMPERATURE: i32 = 2050;
/// Application FPGA temperature diode (LM95231 external channel).
pub const ALP_APPS_FPGA_TEMPERATURE: i32 = 2051;
/// Board temperature (LM95231 internal channel).
pub const ALP_PCB_TEMPERATURE: i32 = 2052;

// AlpDevControl control types and values
/// Frame synch output signal polarity.
pub const ALP_SYNCH_POLARITY: i32 = 2004;
/// Active input trigger edge (slave mode).
pub const ALP_TRIGGER_EDGE: i32 = 2005;
/// Active high synch output.
pub const ALP_LEVEL_HIGH: i32 = 2006;
/// Active low synch output.
pub const ALP_LEVEL_LOW: i32 = 2007;
/// High to low signal transition.
pub const ALP_EDGE_FALLING: i32 = 2008;
/// Low to high signal transition.
pub const ALP_EDGE_RISING: i32 = 2009;

/// Trigger time-out (slave mode).
pub const ALP_TRIGGER_TIME_OUT: i32 = 2014;
/// Time-out enabled (default).
pub const ALP_TIME_OUT_ENABLE: i32 = 0;
/// Time-out disabled.
pub const ALP_TIME_OUT_DISABLE: i32 = 1;

/// Re-connect after a USB interruption.
pub const ALP_USB_CONNECTION: i32 = 2016;

/// DMD type; writable only for a newly allocated ALP-3 device.
pub const ALP_DEV_DMDTYPE: i32 = 2021;
/// 1024x768, 0.7" Type A, D3000.
pub const ALP_DMDTYPE_XGA: i32 = 1;
/// 1400x1050, 0.95" Type A, D3000.
pub const ALP_DMDTYPE_SXGA_PLUS: i32 = 2;
/// 1920x1080, 0.95" Type A, D4x00.
pub const ALP_DMDTYPE_1080P_095A: i32 = 3;
/// 1024x768, 0.7" Type A, D4x00.
pub const ALP_DMDTYPE_XGA_07A: i32 = 4;
/// 1024x768, 0.55" Type A, D4x00.
pub const ALP_DMDTYPE_XGA_055A: i32 = 5;
/// 1024x768, 0.55" Type X, D4x00.
pub const ALP_DMDTYPE_XGA_055X: i32 = 6;
/// 1920x1200, 0.96" Type A, D4100.
pub const ALP_DMDTYPE_WUXGA_096A: i32 = 7;
/// 2560x1600, 0.90" Type A, DLPC910 at 400 MHz.
pub const ALP_DMDTYPE_WQXGA_400MHZ_090A: i32 = 8;
/// 2560x1600 at the extended 480 MHz clock. Requires DMD temperature control.
pub const ALP_DMDTYPE_WQXGA_480MHZ_090A: i32 = 9;
/// 1280x800, DLP650LNIR WXGA S450.
pub const ALP_DMDTYPE_WXGA_S450: i32 = 12;
/// No DMD connected; behaves like 1080p (D4100).
pub const ALP_DMDTYPE_DISCONNECT: i32 = 255;

/// Number of mirror rows on the DMD.
pub const ALP_DEV_DISPLAY_HEIGHT: i32 = 2057;
/// Number of mirror columns on the DMD.
pub const ALP_DEV_DISPLAY_WIDTH: i32 = 2058;

/// DMD power-float mode.
pub const ALP_DEV_DMD_MODE: i32 = 2064;
/// Wake up the DMD (default).
pub const ALP_DMD_RESUME: i32 = 0;
/// Power down and release the mirrors from their deflected state.
pub const ALP_DMD_POWER_FLOAT: i32 = 1;

/// PWM pin duty cycle in percent (0..=100). 0 after `AlpDevAlloc`.
pub const ALP_PWM_LEVEL: i32 = 2063;

// AlpDevControlEx
/// Synch output 1 gate, record type [`AlpDynSynchOutGate`](crate::AlpDynSynchOutGate).
pub const ALP_DEV_DYN_SYNCH_OUT1_GATE: i32 = 2023;
/// Synch output 2 gate.
pub const ALP_DEV_DYN_SYNCH_OUT2_GATE: i32 = 2024;
/// Synch output 3 gate.
pub const ALP_DEV_DYN_SYNCH_OUT3_GATE: i32 = 2025;

// AlpSeqControl
/// Number of iterations for non-continuous display (`AlpProjStart`).
pub const ALP_SEQ_REPEAT: i32 = 2100;
/// Spelling used by the primary API documentation.
pub const ALP_SEQ_REPETE: i32 = ALP_SEQ_REPEAT;
/// First picture of the sequence to display.
pub const ALP_FIRSTFRAME: i32 = 2101;
/// Last picture of the sequence to display.
pub const ALP_LASTFRAME: i32 = 2102;

/// Reduced bit depth used for display.
pub const ALP_BITNUM: i32 = 2103;
/// Binary mode, `ALP_BIN_NORMAL` or `ALP_BIN_UNINTERRUPTED`.
pub const ALP_BIN_MODE: i32 = 2104;
/// Binary mode with programmable dark phase.
pub const ALP_BIN_NORMAL: i32 = 2105;
/// Binary mode without dark phase.
pub const ALP_BIN_UNINTERRUPTED: i32 = 2106;

/// PWM mode, `ALP_DEFAULT` or `ALP_FLEX_PWM`.
pub const ALP_PWM_MODE: i32 = 2107;
/// All bit planes displayed as fast as possible in binary uninterrupted mode.
pub const ALP_FLEX_PWM: i32 = 3;

/// Data format and alignment of uploaded pictures.
pub const ALP_DATA_FORMAT: i32 = 2110;
/// Data is MSB aligned (default).
pub const ALP_DATA_MSB_ALIGN: i32 = 0;
/// Data is LSB aligned.
pub const ALP_DATA_LSB_ALIGN: i32 = 1;
/// Packed binary, top row first, bit 7 of a byte is the leftmost pixel.
pub const ALP_DATA_BINARY_TOPDOWN: i32 = 2;
/// Packed binary, bottom row first.
pub const ALP_DATA_BINARY_BOTTOMUP: i32 = 3;

/// `ALP_DEFAULT` locks sequence memory in `AlpSeqPut`; any other value allows
/// writing a sequence while it is displayed.
pub const ALP_SEQ_PUT_LOCK: i32 = 2119;

/// Start line position at the first picture.
pub const ALP_FIRSTLINE: i32 = 2111;
/// Stop line position at the last picture.
pub const ALP_LASTLINE: i32 = 2112;
/// Line shift value for the next frame.
pub const ALP_LINE_INC: i32 = 2113;
/// Combined `ALP_FIRSTFRAME` and `ALP_FIRSTLINE`.
pub const ALP_SCROLL_FROM_ROW: i32 = 2123;
/// Combined `ALP_LASTFRAME` and `ALP_LASTLINE`.
pub const ALP_SCROLL_TO_ROW: i32 = 2124;

/// Frame look-up table usage mode.
pub const ALP_FLUT_MODE: i32 = 2118;
/// Linear addressing, FLUT unused (default).
pub const ALP_FLUT_NONE: i32 = 0;
/// FLUT frame addressing with 9-bit entries.
pub const ALP_FLUT_9BIT: i32 = 1;
/// FLUT frame addressing with 18-bit entries.
pub const ALP_FLUT_18BIT: i32 = 2;
/// Number of FLUT entries, default 1.
pub const ALP_FLUT_ENTRIES9: i32 = 2120;
/// Offset of the FLUT index in multiples of 256, default 0.
pub const ALP_FLUT_OFFSET9: i32 = 2122;

/// Area of interest, value built with [`make_long`].
pub const ALP_SEQ_DMD_LINES: i32 = 2125;

/// X-shear selection, `ALP_DEFAULT` or `ALP_ENABLE`.
pub const ALP_X_SHEAR_SELECT: i32 = 2132;

/// DMD mask selection, `ALP_DEFAULT`, `ALP_DMD_MASK_16X16` or `ALP_DMD_MASK_16X8`.
pub const ALP_DMD_MASK_SELECT: i32 = 2134;
/// 16x16 pixel mask blocks.
pub const ALP_DMD_MASK_16X16: i32 = ALP_ENABLE;
/// 16x8 pixel mask blocks, XGA only.
pub const ALP_DMD_MASK_16X8: i32 = 2;

// AlpSeqInquire
/// Bit depth of the pictures in the sequence.
pub const ALP_BITPLANES: i32 = 2200;
/// Number of pictures in the sequence.
pub const ALP_PICNUM: i32 = 2201;
/// Time between the start of consecutive pictures, in microseconds.
pub const ALP_PICTURE_TIME: i32 = 2203;
/// Display duration of one picture, in microseconds.
pub const ALP_ILLUMINATE_TIME: i32 = 2204;
/// Delay from frame synch output to display start (master mode), microseconds.
pub const ALP_SYNCH_DELAY: i32 = 2205;
/// Duration of the active frame synch output pulse, microseconds.
pub const ALP_SYNCH_PULSEWIDTH: i32 = 2206;
/// Delay from active trigger input edge to display start, microseconds.
pub const ALP_TRIGGER_IN_DELAY: i32 = 2207;
/// Maximum synch delay, microseconds.
pub const ALP_MAX_SYNCH_DELAY: i32 = 2209;
/// Maximum trigger input delay, microseconds.
pub const ALP_MAX_TRIGGER_IN_DELAY: i32 = 2210;
/// Minimum picture time, microseconds.
pub const ALP_MIN_PICTURE_TIME: i32 = 2211;
/// Minimum illuminate time, microseconds. Depends on `ALP_BITNUM` and `ALP_BIN_MODE`.
pub const ALP_MIN_ILLUMINATE_TIME: i32 = 2212;
/// Maximum picture time, microseconds.
pub const ALP_MAX_PICTURE_TIME: i32 = 2213;
/// Total active projection time. `ALP_PICTURE_TIME = ALP_ON_TIME + ALP_OFF_TIME`.
pub const ALP_ON_TIME: i32 = 2214;
/// Total inactive projection time.
pub const ALP_OFF_TIME: i32 = 2215;

// AlpProjInquire, AlpProjControl and their Ex variants
/// Projection mode, `ALP_MASTER` or `ALP_SLAVE`.
pub const ALP_PROJ_MODE: i32 = 2300;
/// Internal timing, a synch signal is sent for every picture.
pub const ALP_MASTER: i32 = 2301;
/// External trigger advances to the next picture.
pub const ALP_SLAVE: i32 = 2302;
/// Master mode, but each frame repeats until a trigger event.
pub const ALP_PROJ_STEP: i32 = 2329;
/// Synchronous or asynchronous projection calls.
pub const ALP_PROJ_SYNC: i32 = 2303;
/// The caller regains control after the sequence display completes.
pub const ALP_SYNCHRONOUS: i32 = 2304;
/// The caller regains control immediately.
pub const ALP_ASYNCHRONOUS: i32 = 2305;

/// Reverse dark into bright.
pub const ALP_PROJ_INVERSION: i32 = 2306;
/// Turn the pictures upside down.
pub const ALP_PROJ_UPSIDE_DOWN: i32 = 2307;

/// Projection state, inquire only.
pub const ALP_PROJ_STATE: i32 = 2400;

/// FLUT size in 9-bit entries.
pub const ALP_FLUT_MAX_ENTRIES9: i32 = 2324;
/// Write 9-bit FLUT entries, record type [`FlutWrite`](crate::FlutWrite).
pub const ALP_FLUT_WRITE_9BIT: i32 = 2325;
/// Write 18-bit FLUT entries, record type [`FlutWrite`](crate::FlutWrite).
pub const ALP_FLUT_WRITE_18BIT: i32 = 2326;

/// X-shear table, record type [`AlpShearTable`](crate::AlpShearTable).
pub const ALP_X_SHEAR: i32 = 2337;

/// DMD mask, record type [`AlpDmdMask`](crate::AlpDmdMask).
pub const ALP_DMD_MASK_WRITE: i32 = 2339;

// Sequence queue extension
/// Queue mode, `ALP_PROJ_LEGACY` or `ALP_PROJ_SEQUENCE_QUEUE`.
pub const ALP_PROJ_QUEUE_MODE: i32 = 2314;
/// Legacy mode: one waiting position, `AlpProjStart` replaces it.
pub const ALP_PROJ_LEGACY: i32 = 0;
/// Manage started sequences in a queue.
pub const ALP_PROJ_SEQUENCE_QUEUE: i32 = 1;
/// Queue id of the most recently enqueued sequence, or `ALP_INVALID_ID`.
pub const ALP_PROJ_QUEUE_ID: i32 = 2315;
/// Total number of waiting positions in the queue.
pub const ALP_PROJ_QUEUE_MAX_AVAIL: i32 = 2316;
/// Available waiting positions in the queue.
pub const ALP_PROJ_QUEUE_AVAIL: i32 = 2317;
/// Detailed progress, `AlpProjInquireEx` with [`AlpProjProgress`](crate::AlpProjProgress).
pub const ALP_PROJ_PROGRESS: i32 = 2318;
/// Remove all enqueued sequences, the running one is not affected.
pub const ALP_PROJ_RESET_QUEUE: i32 = 2319;
/// Abort a sequence after the last frame of the current iteration.
pub const ALP_PROJ_ABORT_SEQUENCE: i32 = 2320;
/// Abort a sequence after the next frame.
pub const ALP_PROJ_ABORT_FRAME: i32 = 2321;
/// When `AlpProjWait` completes relative to the last frame.
pub const ALP_PROJ_WAIT_UNTIL: i32 = 2323;
/// `AlpProjWait` returns after the picture time (default).
pub const ALP_PROJ_WAIT_PIC_TIME: i32 = 0;
/// `AlpProjWait` returns after the illuminate time.
pub const ALP_PROJ_WAIT_ILLU_TIME: i32 = 1;

// AlpProjProgress flags
/// The queue is idle.
pub const ALP_FLAG_QUEUE_IDLE: u32 = 1;
/// A sequence abort is pending.
pub const ALP_FLAG_SEQUENCE_ABORTING: u32 = 2;
/// The sequence runs until aborted (`AlpProjStartCont`).
pub const ALP_FLAG_SEQUENCE_INDEFINITE: u32 = 4;
/// Illumination of the last frame finished, picture time still running.
pub const ALP_FLAG_FRAME_FINISHED: u32 = 8;
/// Reserved.
pub const ALP_FLAG_RSVD0: u32 = 16;

/// `TransferMode` of [`AlpLinePut`](crate::AlpLinePut) for `AlpSeqPutEx`.
pub const ALP_PUT_LINES: i32 = 1;

/// Pack a start row and a row count into one `ALP_SEQ_DMD_LINES` value,
/// the start row in the low word and the count in the high word.
#[must_use]
pub const fn make_long(start_row: u16, row_count: u16) -> i32 {
    ((row_count as u32) << 16 | start_row as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_long_places_start_in_low_word() {
        assert_eq!(make_long(0, 0), 0);
        assert_eq!(make_long(5, 0), 5);
        assert_eq!(make_long(0, 1), 0x0001_0000);
        assert_eq!(make_long(100, 200), 200 << 16 | 100);
    }

    #[test]
    fn make_long_full_range_wraps_into_sign_bit() {
        assert_eq!(make_long(0xFFFF, 0xFFFF), -1);
    }

    #[test]
    fn repete_alias_matches_repeat() {
        assert_eq!(ALP_SEQ_REPETE, ALP_SEQ_REPEAT);
        assert_eq!(ALP_DMD_MASK_16X16, ALP_ENABLE);
    }
}
