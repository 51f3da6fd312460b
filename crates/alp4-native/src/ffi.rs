//! Prototypes of the ALP-4.x entry points and the resolved function table.
//!
//! All functions use the `__stdcall` convention on 32-bit Windows, hence
//! `extern "system"`. `ALP_ID` is an `unsigned long`, codes and values are
//! `long`.

use core::ffi::{c_long, c_ulong, c_void};

use alp4_errors::{AlpError, AlpResult};
use libloading::Library;

/// Native `ALP_ID`.
pub type AlpId = c_ulong;

pub(crate) type DevAllocFn = unsafe extern "system" fn(
    device_num: c_long,
    init_flag: c_long,
    device_id: *mut AlpId,
) -> c_long;
pub(crate) type DevFn = unsafe extern "system" fn(device_id: AlpId) -> c_long;
pub(crate) type DevControlFn =
    unsafe extern "system" fn(device_id: AlpId, control_type: c_long, value: c_long) -> c_long;
pub(crate) type DevControlExFn = unsafe extern "system" fn(
    device_id: AlpId,
    control_type: c_long,
    user_struct: *mut c_void,
) -> c_long;
pub(crate) type DevInquireFn = unsafe extern "system" fn(
    device_id: AlpId,
    inquire_type: c_long,
    user_var: *mut c_long,
) -> c_long;
pub(crate) type SeqAllocFn = unsafe extern "system" fn(
    device_id: AlpId,
    bit_planes: c_long,
    pic_num: c_long,
    sequence_id: *mut AlpId,
) -> c_long;
pub(crate) type SeqControlFn = unsafe extern "system" fn(
    device_id: AlpId,
    sequence_id: AlpId,
    control_type: c_long,
    value: c_long,
) -> c_long;
pub(crate) type SeqTimingFn = unsafe extern "system" fn(
    device_id: AlpId,
    sequence_id: AlpId,
    illuminate_time: c_long,
    picture_time: c_long,
    synch_delay: c_long,
    synch_pulse_width: c_long,
    trigger_in_delay: c_long,
) -> c_long;
pub(crate) type SeqInquireFn = unsafe extern "system" fn(
    device_id: AlpId,
    sequence_id: AlpId,
    inquire_type: c_long,
    user_var: *mut c_long,
) -> c_long;
pub(crate) type SeqPutFn = unsafe extern "system" fn(
    device_id: AlpId,
    sequence_id: AlpId,
    pic_offset: c_long,
    pic_load: c_long,
    user_array: *const c_void,
) -> c_long;
pub(crate) type SeqPutExFn = unsafe extern "system" fn(
    device_id: AlpId,
    sequence_id: AlpId,
    user_struct: *const c_void,
    user_array: *const c_void,
) -> c_long;
pub(crate) type SeqFn = unsafe extern "system" fn(device_id: AlpId, sequence_id: AlpId) -> c_long;
pub(crate) type ProjInquireExFn = unsafe extern "system" fn(
    device_id: AlpId,
    inquire_type: c_long,
    user_struct: *mut c_void,
) -> c_long;

/// Every entry point, resolved once at load time.
#[derive(Clone, Copy)]
pub(crate) struct AlpFunctions {
    pub dev_alloc: DevAllocFn,
    pub dev_halt: DevFn,
    pub dev_free: DevFn,
    pub dev_control: DevControlFn,
    pub dev_control_ex: DevControlExFn,
    pub dev_inquire: DevInquireFn,
    pub seq_alloc: SeqAllocFn,
    pub seq_control: SeqControlFn,
    pub seq_timing: SeqTimingFn,
    pub seq_inquire: SeqInquireFn,
    pub seq_put: SeqPutFn,
    pub seq_put_ex: SeqPutExFn,
    pub seq_free: SeqFn,
    pub proj_control: DevControlFn,
    pub proj_control_ex: DevControlExFn,
    pub proj_inquire: DevInquireFn,
    pub proj_inquire_ex: ProjInquireExFn,
    pub proj_start: SeqFn,
    pub proj_start_cont: SeqFn,
    pub proj_halt: DevFn,
    pub proj_wait: DevFn,
}

fn missing(symbol: &'static str) -> impl FnOnce(libloading::Error) -> AlpError {
    move |e| AlpError::MissingSymbol {
        symbol,
        reason: e.to_string(),
    }
}

impl AlpFunctions {
    /// Resolve every entry point from `library`.
    ///
    /// # Safety
    ///
    /// `library` must be the ViALUX ALP-4.x API, so that each exported
    /// symbol has the prototype declared above.
    pub(crate) unsafe fn resolve(library: &Library) -> AlpResult<Self> {
        // SAFETY: the caller guarantees the prototypes; the copied fn
        // pointers stay valid while `library` is loaded, which the owner
        // of the table ensures.
        let dev_alloc = *unsafe { library.get::<DevAllocFn>(b"AlpDevAlloc") }
            .map_err(missing("AlpDevAlloc"))?;
        // SAFETY: as above.
        let dev_halt = *unsafe { library.get::<DevFn>(b"AlpDevHalt") }
            .map_err(missing("AlpDevHalt"))?;
        // SAFETY: as above.
        let dev_free = *unsafe { library.get::<DevFn>(b"AlpDevFree") }
            .map_err(missing("AlpDevFree"))?;
        // SAFETY: as above.
        let dev_control = *unsafe { library.get::<DevControlFn>(b"AlpDevControl") }
            .map_err(missing("AlpDevControl"))?;
        // SAFETY: as above.
        let dev_control_ex = *unsafe { library.get::<DevControlExFn>(b"AlpDevControlEx") }
            .map_err(missing("AlpDevControlEx"))?;
        // SAFETY: as above.
        let dev_inquire = *unsafe { library.get::<DevInquireFn>(b"AlpDevInquire") }
            .map_err(missing("AlpDevInquire"))?;
        // SAFETY: as above.
        let seq_alloc = *unsafe { library.get::<SeqAllocFn>(b"AlpSeqAlloc") }
            .map_err(missing("AlpSeqAlloc"))?;
        // SAFETY: as above.
        let seq_control = *unsafe { library.get::<SeqControlFn>(b"AlpSeqControl") }
            .map_err(missing("AlpSeqControl"))?;
        // SAFETY: as above.
        let seq_timing = *unsafe { library.get::<SeqTimingFn>(b"AlpSeqTiming") }
            .map_err(missing("AlpSeqTiming"))?;
        // SAFETY: as above.
        let seq_inquire = *unsafe { library.get::<SeqInquireFn>(b"AlpSeqInquire") }
            .map_err(missing("AlpSeqInquire"))?;
        // SAFETY: as above.
        let seq_put = *unsafe { library.get::<SeqPutFn>(b"AlpSeqPut") }
            .map_err(missing("AlpSeqPut"))?;
        // SAFETY: as above.
        let seq_put_ex = *unsafe { library.get::<SeqPutExFn>(b"AlpSeqPutEx") }
            .map_err(missing("AlpSeqPutEx"))?;
        // SAFETY: as above.
        let seq_free = *unsafe { library.get::<SeqFn>(b"AlpSeqFree") }
            .map_err(missing("AlpSeqFree"))?;
        // SAFETY: as above.
        let proj_control = *unsafe { library.get::<DevControlFn>(b"AlpProjControl") }
            .map_err(missing("AlpProjControl"))?;
        // SAFETY: as above.
        let proj_control_ex = *unsafe { library.get::<DevControlExFn>(b"AlpProjControlEx") }
            .map_err(missing("AlpProjControlEx"))?;
        // SAFETY: as above.
        let proj_inquire = *unsafe { library.get::<DevInquireFn>(b"AlpProjInquire") }
            .map_err(missing("AlpProjInquire"))?;
        // SAFETY: as above.
        let proj_inquire_ex = *unsafe { library.get::<ProjInquireExFn>(b"AlpProjInquireEx") }
            .map_err(missing("AlpProjInquireEx"))?;
        // SAFETY: as above.
        let proj_start = *unsafe { library.get::<SeqFn>(b"AlpProjStart") }
            .map_err(missing("AlpProjStart"))?;
        // SAFETY: as above.
        let proj_start_cont = *unsafe { library.get::<SeqFn>(b"AlpProjStartCont") }
            .map_err(missing("AlpProjStartCont"))?;
        // SAFETY: as above.
        let proj_halt = *unsafe { library.get::<DevFn>(b"AlpProjHalt") }
            .map_err(missing("AlpProjHalt"))?;
        // SAFETY: as above.
        let proj_wait = *unsafe { library.get::<DevFn>(b"AlpProjWait") }
            .map_err(missing("AlpProjWait"))?;

        Ok(Self {
            dev_alloc,
            dev_halt,
            dev_free,
            dev_control,
            dev_control_ex,
            dev_inquire,
            seq_alloc,
            seq_control,
            seq_timing,
            seq_inquire,
            seq_put,
            seq_put_ex,
            seq_free,
            proj_control,
            proj_control_ex,
            proj_inquire,
            proj_inquire_ex,
            proj_start,
            proj_start_cont,
            proj_halt,
            proj_wait,
        })
    }
}
