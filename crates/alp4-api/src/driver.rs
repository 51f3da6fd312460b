//! The native entry points as a trait.
//!
//! [`AlpDriver`] has one method per ALP-4.x function. Arguments are already
//! converted to Rust types; the return code is mapped with
//! [`AlpStatus::check`]. The native implementation lives in `alp4-native`,
//! an in-memory simulator in `alp4-test-helpers`.

use core::ffi::c_void;

use crate::records::{
    AlpDmdMask, AlpDynSynchOutGate, AlpLinePut, AlpProjProgress, AlpShearTable, FlutWrite,
};
use crate::status::AlpStatus;
use crate::types::{DeviceId, SequenceId};

/// Result of a native call.
pub type DriverResult<T = ()> = Result<T, AlpStatus>;

/// The five `AlpSeqTiming` arguments, in microseconds.
///
/// A zero (`ALP_DEFAULT`) lets the device choose the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingParams {
    /// `IlluminateTime`.
    pub illuminate_time: i32,
    /// `PictureTime`.
    pub picture_time: i32,
    /// `SynchDelay`.
    pub synch_delay: i32,
    /// `SynchPulseWidth`.
    pub synch_pulse_width: i32,
    /// `TriggerInDelay`.
    pub trigger_in_delay: i32,
}

/// A record passed to `AlpDevControlEx` or `AlpProjControlEx`.
#[derive(Debug, Clone, Copy)]
pub enum UserStruct<'a> {
    /// `ALP_DEV_DYN_SYNCH_OUT[1..3]_GATE`.
    SynchOutGate(&'a AlpDynSynchOutGate),
    /// `ALP_FLUT_WRITE_9BIT` / `ALP_FLUT_WRITE_18BIT`.
    FlutWrite(&'a FlutWrite),
    /// `ALP_X_SHEAR`.
    ShearTable(&'a AlpShearTable),
    /// `ALP_DMD_MASK_WRITE`.
    DmdMask(&'a AlpDmdMask),
}

impl UserStruct<'_> {
    /// Pointer handed to the native library. The library only reads through it.
    #[must_use]
    pub fn as_ptr(&self) -> *const c_void {
        match self {
            UserStruct::SynchOutGate(record) => core::ptr::from_ref(*record).cast(),
            UserStruct::FlutWrite(record) => core::ptr::from_ref(*record).cast(),
            UserStruct::ShearTable(record) => core::ptr::from_ref(*record).cast(),
            UserStruct::DmdMask(record) => core::ptr::from_ref(*record).cast(),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            UserStruct::SynchOutGate(_) => "tAlpDynSynchOutGate",
            UserStruct::FlutWrite(_) => "tFlutWrite",
            UserStruct::ShearTable(_) => "tAlpShearTable",
            UserStruct::DmdMask(_) => "tAlpDmdMask",
        }
    }
}

/// One method per ALP-4.x entry point.
///
/// Implementations assume serialized access: the native library does not
/// support concurrent calls against one device, so every method takes
/// `&mut self`.
pub trait AlpDriver {
    /// `AlpDevAlloc`.
    fn dev_alloc(&mut self, device_num: i32, init_flag: i32) -> DriverResult<DeviceId>;

    /// `AlpDevHalt`.
    fn dev_halt(&mut self, device: DeviceId) -> DriverResult;

    /// `AlpDevFree`.
    fn dev_free(&mut self, device: DeviceId) -> DriverResult;

    /// `AlpDevInquire`.
    fn dev_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32>;

    /// `AlpDevControl`.
    fn dev_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult;

    /// `AlpDevControlEx`.
    fn dev_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult;

    /// `AlpSeqAlloc`.
    fn seq_alloc(
        &mut self,
        device: DeviceId,
        bit_planes: i32,
        pic_num: i32,
    ) -> DriverResult<SequenceId>;

    /// `AlpSeqControl`.
    fn seq_control(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        control_type: i32,
        value: i32,
    ) -> DriverResult;

    /// `AlpSeqTiming`.
    fn seq_timing(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        timing: TimingParams,
    ) -> DriverResult;

    /// `AlpSeqInquire`.
    fn seq_inquire(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        inquire_type: i32,
    ) -> DriverResult<i32>;

    /// `AlpSeqPut`. Blocks until the transfer completes.
    fn seq_put(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        pic_offset: i32,
        pic_load: i32,
        data: &[u8],
    ) -> DriverResult;

    /// `AlpSeqPutEx`.
    fn seq_put_ex(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        line_put: &AlpLinePut,
        data: &[u8],
    ) -> DriverResult;

    /// `AlpSeqFree`.
    fn seq_free(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult;

    /// `AlpProjControl`.
    fn proj_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult;

    /// `AlpProjControlEx`.
    fn proj_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult;

    /// `AlpProjInquire`.
    fn proj_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32>;

    /// `AlpProjInquireEx`.
    fn proj_inquire_ex(
        &mut self,
        device: DeviceId,
        inquire_type: i32,
    ) -> DriverResult<AlpProjProgress>;

    /// `AlpProjStart`.
    fn proj_start(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult;

    /// `AlpProjStartCont`.
    fn proj_start_cont(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult;

    /// `AlpProjHalt`.
    fn proj_halt(&mut self, device: DeviceId) -> DriverResult;

    /// `AlpProjWait`.
    fn proj_wait(&mut self, device: DeviceId) -> DriverResult;
}

/// Lets a handle borrow a driver, so the driver can be inspected after the
/// handle is gone.
impl<D: AlpDriver + ?Sized> AlpDriver for &mut D {
    fn dev_alloc(&mut self, device_num: i32, init_flag: i32) -> DriverResult<DeviceId> {
        (**self).dev_alloc(device_num, init_flag)
    }

    fn dev_halt(&mut self, device: DeviceId) -> DriverResult {
        (**self).dev_halt(device)
    }

    fn dev_free(&mut self, device: DeviceId) -> DriverResult {
        (**self).dev_free(device)
    }

    fn dev_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32> {
        (**self).dev_inquire(device, inquire_type)
    }

    fn dev_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult {
        (**self).dev_control(device, control_type, value)
    }

    fn dev_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult {
        (**self).dev_control_ex(device, control_type, user_struct)
    }

    fn seq_alloc(
        &mut self,
        device: DeviceId,
        bit_planes: i32,
        pic_num: i32,
    ) -> DriverResult<SequenceId> {
        (**self).seq_alloc(device, bit_planes, pic_num)
    }

    fn seq_control(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        control_type: i32,
        value: i32,
    ) -> DriverResult {
        (**self).seq_control(device, sequence, control_type, value)
    }

    fn seq_timing(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        timing: TimingParams,
    ) -> DriverResult {
        (**self).seq_timing(device, sequence, timing)
    }

    fn seq_inquire(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        inquire_type: i32,
    ) -> DriverResult<i32> {
        (**self).seq_inquire(device, sequence, inquire_type)
    }

    fn seq_put(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        pic_offset: i32,
        pic_load: i32,
        data: &[u8],
    ) -> DriverResult {
        (**self).seq_put(device, sequence, pic_offset, pic_load, data)
    }

    fn seq_put_ex(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        line_put: &AlpLinePut,
        data: &[u8],
    ) -> DriverResult {
        (**self).seq_put_ex(device, sequence, line_put, data)
    }

    fn seq_free(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        (**self).seq_free(device, sequence)
    }

    fn proj_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult {
        (**self).proj_control(device, control_type, value)
    }

    fn proj_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult {
        (**self).proj_control_ex(device, control_type, user_struct)
    }

    fn proj_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32> {
        (**self).proj_inquire(device, inquire_type)
    }

    fn proj_inquire_ex(
        &mut self,
        device: DeviceId,
        inquire_type: i32,
    ) -> DriverResult<AlpProjProgress> {
        (**self).proj_inquire_ex(device, inquire_type)
    }

    fn proj_start(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        (**self).proj_start(device, sequence)
    }

    fn proj_start_cont(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        (**self).proj_start_cont(device, sequence)
    }

    fn proj_halt(&mut self, device: DeviceId) -> DriverResult {
        (**self).proj_halt(device)
    }

    fn proj_wait(&mut self, device: DeviceId) -> DriverResult {
        (**self).proj_wait(device)
    }
}
