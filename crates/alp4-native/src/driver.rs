//! [`AlpDriver`] over the loaded vendor library.

use core::ffi::{c_long, c_void};
use core::ptr;
use std::path::{Path, PathBuf};

use alp4_api::{
    AlpDriver, AlpLinePut, AlpProjProgress, AlpStatus, DeviceId, DriverResult, SequenceId,
    TimingParams, UserStruct,
};
use alp4_errors::{AlpError, AlpResult};
use libloading::Library;

use crate::ffi::{AlpFunctions, AlpId};
use crate::library::{AlpVersion, LibraryConfig};

/// The vendor library, loaded and resolved.
///
/// Calls go straight to the DLL. The library serializes nothing itself, so
/// every method takes `&mut self`.
pub struct NativeAlp {
    functions: AlpFunctions,
    path: PathBuf,
    version: AlpVersion,
    // Keeps the fn pointers in `functions` valid. Must stay loaded as long
    // as `functions` is reachable.
    _library: Library,
}

impl std::fmt::Debug for NativeAlp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeAlp")
            .field("path", &self.path)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl NativeAlp {
    /// Locate and load the library described by `config`.
    ///
    /// # Errors
    ///
    /// Path resolution errors from [`LibraryConfig::resolve`],
    /// [`AlpError::LibraryLoad`] when the file cannot be loaded and
    /// [`AlpError::MissingSymbol`] when an entry point is absent.
    pub fn load(config: &LibraryConfig) -> AlpResult<Self> {
        let path = config.resolve()?;
        Self::load_path(&path, config.version)
    }

    /// Load the library at `path`.
    ///
    /// # Errors
    ///
    /// [`AlpError::LibraryLoad`] when the file cannot be loaded and
    /// [`AlpError::MissingSymbol`] when an entry point is absent.
    pub fn load_path(path: &Path, version: AlpVersion) -> AlpResult<Self> {
        // SAFETY: loading runs the library's initialization routines. The
        // path names the vendor ALP library, whose initializers have no
        // preconditions.
        let library = unsafe { Library::new(path) }.map_err(|e| AlpError::LibraryLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        // SAFETY: `library` is the ALP API, and it is stored next to the
        // table below for as long as the table lives.
        let functions = unsafe { AlpFunctions::resolve(&library) }?;

        tracing::info!(
            path = %path.display(),
            version = %version,
            "ALP library loaded"
        );

        Ok(Self {
            functions,
            path: path.to_path_buf(),
            version,
            _library: library,
        })
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured API version.
    pub fn version(&self) -> AlpVersion {
        self.version
    }
}

fn check(ret: c_long) -> DriverResult {
    AlpStatus::check(i32::try_from(ret).unwrap_or(i32::MAX))
}

fn raw(id: u32) -> AlpId {
    AlpId::from(id)
}

fn long(value: i32) -> c_long {
    c_long::from(value)
}

// Values outside `i32` only come from a mismatched library build.
fn narrow(value: c_long) -> DriverResult<i32> {
    i32::try_from(value).map_err(|_| AlpStatus::AddrInvalid)
}

fn narrow_id(value: AlpId) -> DriverResult<u32> {
    u32::try_from(value).map_err(|_| AlpStatus::AddrInvalid)
}

impl AlpDriver for NativeAlp {
    fn dev_alloc(&mut self, device_num: i32, init_flag: i32) -> DriverResult<DeviceId> {
        let mut id: AlpId = 0;
        // SAFETY: `id` is a live local the library writes the new ALP_ID to.
        check(unsafe { (self.functions.dev_alloc)(long(device_num), long(init_flag), &mut id) })?;
        Ok(DeviceId(narrow_id(id)?))
    }

    fn dev_halt(&mut self, device: DeviceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.dev_halt)(raw(device.0)) })
    }

    fn dev_free(&mut self, device: DeviceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.dev_free)(raw(device.0)) })
    }

    fn dev_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32> {
        let mut value: c_long = 0;
        // SAFETY: `value` is a live local the library writes the result to.
        check(unsafe {
            (self.functions.dev_inquire)(raw(device.0), long(inquire_type), &mut value)
        })?;
        narrow(value)
    }

    fn dev_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe {
            (self.functions.dev_control)(raw(device.0), long(control_type), long(value))
        })
    }

    fn dev_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult {
        let record = user_struct.as_ptr().cast_mut();
        // SAFETY: `record` points to a `#[repr(C)]` record borrowed for the
        // duration of the call; the library only reads it.
        check(unsafe { (self.functions.dev_control_ex)(raw(device.0), long(control_type), record) })
    }

    fn seq_alloc(
        &mut self,
        device: DeviceId,
        bit_planes: i32,
        pic_num: i32,
    ) -> DriverResult<SequenceId> {
        let mut id: AlpId = 0;
        // SAFETY: `id` is a live local the library writes the new ALP_ID to.
        check(unsafe {
            (self.functions.seq_alloc)(raw(device.0), long(bit_planes), long(pic_num), &mut id)
        })?;
        Ok(SequenceId(narrow_id(id)?))
    }

    fn seq_control(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        control_type: i32,
        value: i32,
    ) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe {
            (self.functions.seq_control)(
                raw(device.0),
                raw(sequence.0),
                long(control_type),
                long(value),
            )
        })
    }

    fn seq_timing(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        timing: TimingParams,
    ) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe {
            (self.functions.seq_timing)(
                raw(device.0),
                raw(sequence.0),
                long(timing.illuminate_time),
                long(timing.picture_time),
                long(timing.synch_delay),
                long(timing.synch_pulse_width),
                long(timing.trigger_in_delay),
            )
        })
    }

    fn seq_inquire(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        inquire_type: i32,
    ) -> DriverResult<i32> {
        let mut value: c_long = 0;
        // SAFETY: `value` is a live local the library writes the result to.
        check(unsafe {
            (self.functions.seq_inquire)(
                raw(device.0),
                raw(sequence.0),
                long(inquire_type),
                &mut value,
            )
        })?;
        narrow(value)
    }

    fn seq_put(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        pic_offset: i32,
        pic_load: i32,
        data: &[u8],
    ) -> DriverResult {
        let array = data.as_ptr().cast::<c_void>();
        // SAFETY: the caller sized `data` for `pic_load` pictures of the
        // sequence layout; the call blocks until the library is done reading.
        check(unsafe {
            (self.functions.seq_put)(
                raw(device.0),
                raw(sequence.0),
                long(pic_offset),
                long(pic_load),
                array,
            )
        })
    }

    fn seq_put_ex(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        line_put: &AlpLinePut,
        data: &[u8],
    ) -> DriverResult {
        let record = ptr::from_ref(line_put).cast::<c_void>();
        let array = data.as_ptr().cast::<c_void>();
        // SAFETY: `record` is a `#[repr(C)]` tAlpLinePut and `data` is sized
        // for the section it describes; both outlive the blocking call.
        check(unsafe {
            (self.functions.seq_put_ex)(raw(device.0), raw(sequence.0), record, array)
        })
    }

    fn seq_free(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.seq_free)(raw(device.0), raw(sequence.0)) })
    }

    fn proj_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe {
            (self.functions.proj_control)(raw(device.0), long(control_type), long(value))
        })
    }

    fn proj_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult {
        let record = user_struct.as_ptr().cast_mut();
        // SAFETY: `record` points to a `#[repr(C)]` record borrowed for the
        // duration of the call; the library only reads it.
        check(unsafe {
            (self.functions.proj_control_ex)(raw(device.0), long(control_type), record)
        })
    }

    fn proj_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32> {
        let mut value: c_long = 0;
        // SAFETY: `value` is a live local the library writes the result to.
        check(unsafe {
            (self.functions.proj_inquire)(raw(device.0), long(inquire_type), &mut value)
        })?;
        narrow(value)
    }

    fn proj_inquire_ex(
        &mut self,
        device: DeviceId,
        inquire_type: i32,
    ) -> DriverResult<AlpProjProgress> {
        let mut progress = AlpProjProgress::default();
        let out = ptr::from_mut(&mut progress).cast::<c_void>();
        // SAFETY: `out` points to a live `#[repr(C)]` tAlpProjProgress.
        check(unsafe { (self.functions.proj_inquire_ex)(raw(device.0), long(inquire_type), out) })?;
        Ok(progress)
    }

    fn proj_start(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.proj_start)(raw(device.0), raw(sequence.0)) })
    }

    fn proj_start_cont(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.proj_start_cont)(raw(device.0), raw(sequence.0)) })
    }

    fn proj_halt(&mut self, device: DeviceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.proj_halt)(raw(device.0)) })
    }

    fn proj_wait(&mut self, device: DeviceId) -> DriverResult {
        // SAFETY: plain value arguments.
        check(unsafe { (self.functions.proj_wait)(raw(device.0)) })
    }
}
