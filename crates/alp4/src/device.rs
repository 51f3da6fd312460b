//! The device handle.

use alp4_api::codes::*;
use alp4_api::{
    AlpDriver, AlpDynSynchOutGate, AlpLinePut, AlpProjProgress, AlpStatus, DataFormat, DeviceId,
    DeviceState, DisplayGeometry, DmdType, ProjectionState, SequenceId, UserStruct,
};
use alp4_errors::{AlpError, AlpResult, FailureSeverity};
use alp4_native::NativeAlp;
use tracing::{debug, info, warn};

use crate::config::{Alp4Config, ReleasePolicy};
use crate::registry::{SequenceInfo, SequenceRegistry};
use crate::timing::{LinePut, SequenceTiming, native_value};

/// Lifecycle state tracked by the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Allocated, nothing started.
    Idle,
    /// A projection was started and not yet waited for or halted.
    Running {
        /// Sequence on display.
        sequence: SequenceId,
        /// Started with `AlpProjStartCont`.
        looping: bool,
    },
    /// `AlpDevFree` succeeded. Terminal.
    Freed,
}

/// Readings of the three board temperature sensors, in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    /// DDC FPGA.
    pub ddc_fpga: f32,
    /// Application FPGA.
    pub apps_fpga: f32,
    /// Board.
    pub pcb: f32,
}

// Sensors report in 1/256 °C.
fn celsius(raw: i32) -> f32 {
    raw as f32 / 256.0
}

/// An allocated ALP device.
///
/// Owns the device id, the DMD geometry queried at allocation and the set of
/// live sequences. Sequence-scoped methods take `Option<SequenceId>`; `None`
/// selects the most recent allocation.
///
/// Dropping a handle that was not freed halts and frees the device, logging
/// failures instead of raising them.
///
/// ```
/// use alp4::{Alp4, SequenceTiming};
/// use alp4_test_helpers::SimulatedAlp;
///
/// let mut dmd = Alp4::initialize(SimulatedAlp::tiny(16, 8), None)?;
/// let seq = dmd.allocate_sequence(2, 1)?;
/// dmd.upload_images(Some(seq), &[0xFF; 2 * 16 * 8], 0, 0)?;
/// dmd.set_timing(None, &SequenceTiming::with_picture_time(20_000))?;
/// dmd.run(None, false)?;
/// dmd.wait()?;
/// dmd.free()?;
/// # Ok::<(), alp4::AlpError>(())
/// ```
#[derive(Debug)]
pub struct Alp4<D: AlpDriver> {
    driver: D,
    device: DeviceId,
    dmd_type: DmdType,
    geometry: DisplayGeometry,
    sequences: SequenceRegistry,
    release: ReleasePolicy,
    state: HandleState,
}

impl Alp4<NativeAlp> {
    /// Load the vendor library and allocate the configured device.
    ///
    /// # Errors
    ///
    /// Configuration and library loading errors, then everything
    /// [`Alp4::initialize`] reports.
    pub fn open(config: &Alp4Config) -> AlpResult<Self> {
        config.validate()?;
        let driver = NativeAlp::load(&config.library)?;
        Self::with_driver(driver, config)
    }
}

impl<D: AlpDriver> Alp4<D> {
    /// Allocate a device through `driver` using `config`'s device number and
    /// release policy. The library section of `config` is not used.
    ///
    /// # Errors
    ///
    /// As [`Alp4::initialize`].
    pub fn with_driver(driver: D, config: &Alp4Config) -> AlpResult<Self> {
        let mut handle = Self::initialize(driver, config.device_number)?;
        handle.release = config.release;
        Ok(handle)
    }

    /// Allocate a device and query its geometry.
    ///
    /// `device_number` is the serial number of the board; `None` takes the
    /// first available one.
    ///
    /// # Errors
    ///
    /// [`AlpError::DeviceUnavailable`] when `AlpDevAlloc` fails,
    /// [`AlpError::UnsupportedDmdType`] when the DMD model is unknown and
    /// the display size inquiries fail too. The device is released again in
    /// the latter case.
    pub fn initialize(mut driver: D, device_number: Option<i32>) -> AlpResult<Self> {
        let number = device_number.unwrap_or(ALP_DEFAULT);
        if number < 0 {
            return Err(AlpError::invalid_argument(
                "device_number",
                format!("{number} is negative"),
            ));
        }

        let device = driver
            .dev_alloc(number, ALP_DEFAULT)
            .map_err(|status| AlpError::DeviceUnavailable {
                device_number: number,
                status,
            })?;

        let (dmd_type, geometry) = match query_geometry(&mut driver, device) {
            Ok(found) => found,
            Err(e) => {
                if let Err(status) = driver.dev_free(device) {
                    warn!(%device, %status, "Failed to release device after geometry query");
                }
                return Err(e);
            }
        };

        info!(
            %device,
            dmd_type = ?dmd_type,
            width = geometry.width,
            height = geometry.height,
            "ALP device allocated"
        );

        Ok(Self {
            driver,
            device,
            dmd_type,
            geometry,
            sequences: SequenceRegistry::default(),
            release: ReleasePolicy::default(),
            state: HandleState::Idle,
        })
    }

    /// Release the device and every sequence on it.
    ///
    /// Forwarded even while a projection runs; the library then reports
    /// `ALP_NOT_IDLE`. With a soft device release policy the failure is
    /// logged and the handle is considered freed regardless.
    ///
    /// # Errors
    ///
    /// [`AlpError::DeviceFreed`] when already freed,
    /// [`AlpError::Native`] for a hard `AlpDevFree` failure.
    pub fn free(&mut self) -> AlpResult {
        let device = self.live()?;
        if let Err(status) = self.driver.dev_free(device) {
            match self.release.device_free {
                FailureSeverity::Hard => return Err(AlpError::native("AlpDevFree", status)),
                FailureSeverity::Soft => {
                    warn!(%device, %status, "AlpDevFree failed, treating device as released");
                }
            }
        }
        self.sequences.clear();
        self.state = HandleState::Freed;
        info!(%device, "ALP device freed");
        Ok(())
    }

    /// Allocate a sequence of `picture_count` pictures with `bit_depth` bit
    /// planes each. The new sequence becomes the default for calls that
    /// omit the id.
    ///
    /// # Errors
    ///
    /// [`AlpError::InvalidArgument`] for a bit depth outside 1..=8 or zero
    /// pictures, [`AlpError::AllocationFailed`] when the library refuses,
    /// typically with `ALP_MEMORY_FULL`.
    pub fn allocate_sequence(
        &mut self,
        picture_count: u32,
        bit_depth: u8,
    ) -> AlpResult<SequenceId> {
        let device = self.live()?;
        if !(1..=8).contains(&bit_depth) {
            return Err(AlpError::invalid_argument(
                "bit_depth",
                format!("{bit_depth} is outside 1..=8"),
            ));
        }
        if picture_count == 0 {
            return Err(AlpError::invalid_argument(
                "picture_count",
                "at least one picture is required",
            ));
        }
        let pic_num = native_value("picture_count", picture_count)?;

        let sequence = self
            .driver
            .seq_alloc(device, i32::from(bit_depth), pic_num)
            .map_err(|status| AlpError::AllocationFailed {
                bit_depth,
                picture_count,
                status,
            })?;

        self.sequences.insert(
            sequence,
            SequenceInfo {
                bit_depth,
                picture_count,
                data_format: DataFormat::default(),
            },
        );
        debug!(%device, %sequence, bit_depth, picture_count, "Sequence allocated");
        Ok(sequence)
    }

    /// Release a sequence.
    ///
    /// With the default soft policy a library failure is logged and the
    /// sequence is forgotten anyway. With a hard policy the failure is
    /// raised and the sequence stays registered.
    ///
    /// # Errors
    ///
    /// Sequence resolution errors, or [`AlpError::Native`] for a hard
    /// `AlpSeqFree` failure.
    pub fn free_sequence(&mut self, sequence: Option<SequenceId>) -> AlpResult {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        if let Err(status) = self.driver.seq_free(device, sequence) {
            match self.release.sequence_free {
                FailureSeverity::Hard => return Err(AlpError::native("AlpSeqFree", status)),
                FailureSeverity::Soft => {
                    warn!(%device, %sequence, %status, "AlpSeqFree failed, forgetting sequence");
                }
            }
        }
        self.sequences.remove(sequence);
        debug!(%device, %sequence, "Sequence freed");
        Ok(())
    }

    /// Upload whole pictures with `AlpSeqPut`.
    ///
    /// `picture_count == 0` loads from `picture_offset` to the end of the
    /// sequence. `data` must hold exactly that many frames in the sequence's
    /// data format: one byte per pixel, or one bit per pixel for the binary
    /// formats. Blocks until the transfer is complete.
    ///
    /// # Errors
    ///
    /// [`AlpError::InvalidArgument`] for a picture range outside the
    /// sequence, [`AlpError::BufferLength`] for a mis-sized buffer and
    /// [`AlpError::TransferFailed`] when the library refuses, e.g. with
    /// `ALP_SEQ_IN_USE` while the sequence is displayed with upload locking.
    pub fn upload_images(
        &mut self,
        sequence: Option<SequenceId>,
        data: &[u8],
        picture_offset: u32,
        picture_count: u32,
    ) -> AlpResult {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        let info = self.info(sequence)?;
        let pictures = picture_range(&info, picture_offset, picture_count)?;

        let expected = pictures as usize * self.geometry.frame_bytes(info.data_format);
        check_len(expected, data.len())?;

        self.driver
            .seq_put(
                device,
                sequence,
                native_value("picture_offset", picture_offset)?,
                native_value("picture_count", pictures)?,
                data,
            )
            .map_err(|status| AlpError::TransferFailed { sequence, status })?;
        debug!(%sequence, picture_offset, pictures, bytes = data.len(), "Pictures uploaded");
        Ok(())
    }

    /// Upload a band of rows with `AlpSeqPutEx`.
    ///
    /// `data` holds `line_count` rows for each picture, pictures
    /// back-to-back.
    ///
    /// # Errors
    ///
    /// As [`Alp4::upload_images`], plus [`AlpError::InvalidArgument`] for a
    /// line range outside the DMD.
    pub fn upload_images_partial(
        &mut self,
        sequence: Option<SequenceId>,
        data: &[u8],
        section: LinePut,
    ) -> AlpResult {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        let info = self.info(sequence)?;
        let pictures = picture_range(&info, section.picture_offset, section.picture_count)?;

        let height = self.geometry.height;
        if section.line_offset >= height {
            return Err(AlpError::invalid_argument(
                "line_offset",
                format!("{} is beyond the last row {}", section.line_offset, height - 1),
            ));
        }
        let lines = if section.line_count == 0 {
            height - section.line_offset
        } else {
            section.line_count
        };
        if u64::from(section.line_offset) + u64::from(lines) > u64::from(height) {
            return Err(AlpError::invalid_argument(
                "line_count",
                format!("rows {}+{lines} exceed {height}", section.line_offset),
            ));
        }

        let expected =
            pictures as usize * lines as usize * self.geometry.row_bytes(info.data_format);
        check_len(expected, data.len())?;

        let record = AlpLinePut::new(
            native_value("picture_offset", section.picture_offset)?,
            native_value("picture_count", pictures)?,
            native_value("line_offset", section.line_offset)?,
            native_value("line_count", lines)?,
        );
        self.driver
            .seq_put_ex(device, sequence, &record, data)
            .map_err(|status| AlpError::TransferFailed { sequence, status })?;
        debug!(
            %sequence,
            picture_offset = section.picture_offset,
            pictures,
            line_offset = section.line_offset,
            lines,
            "Rows uploaded"
        );
        Ok(())
    }

    /// Extract bit `bit` of a full grayscale frame and upload it as one
    /// binary picture at `picture_offset`.
    ///
    /// The sequence must already use a binary data format. Rows are packed
    /// in the order given; for `ALP_DATA_BINARY_BOTTOMUP` pass the frame
    /// bottom row first.
    ///
    /// # Errors
    ///
    /// [`AlpError::InvalidState`] for a non-binary sequence,
    /// [`AlpError::BufferLength`] when `pixels` is not one frame,
    /// [`AlpError::InvalidArgument`] for `bit > 7`, then as
    /// [`Alp4::upload_images`].
    pub fn upload_bit_plane(
        &mut self,
        sequence: Option<SequenceId>,
        pixels: &[u8],
        bit: u8,
        picture_offset: u32,
    ) -> AlpResult {
        self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        let info = self.info(sequence)?;
        if !info.data_format.is_binary() {
            return Err(AlpError::invalid_state(format!(
                "{sequence} uses {:?}, bit planes need a binary data format",
                info.data_format
            )));
        }
        check_len(self.geometry.pixel_count(), pixels.len())?;

        let plane = alp4_bitplane::extract_rows(pixels, self.geometry.width as usize, bit)
            .map_err(|e| AlpError::invalid_argument("bit", e.to_string()))?;
        self.upload_images(Some(sequence), &plane, picture_offset, 1)
    }

    /// Set the timing of a sequence. Omitted values are chosen by the
    /// device.
    ///
    /// # Errors
    ///
    /// [`AlpError::InvalidArgument`] for values the library cannot take,
    /// [`AlpError::InvalidTiming`] when the library rejects the combination.
    pub fn set_timing(
        &mut self,
        sequence: Option<SequenceId>,
        timing: &SequenceTiming,
    ) -> AlpResult {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        let params = timing.to_params()?;
        self.driver
            .seq_timing(device, sequence, params)
            .map_err(|status| AlpError::InvalidTiming { sequence, status })?;
        debug!(%sequence, ?timing, "Sequence timing set");
        Ok(())
    }

    /// Start displaying a sequence, once or in a loop.
    ///
    /// # Errors
    ///
    /// Sequence resolution errors or [`AlpError::Native`].
    pub fn run(&mut self, sequence: Option<SequenceId>, looping: bool) -> AlpResult {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        if looping {
            self.driver
                .proj_start_cont(device, sequence)
                .map_err(native("AlpProjStartCont"))?;
        } else {
            self.driver
                .proj_start(device, sequence)
                .map_err(native("AlpProjStart"))?;
        }
        self.state = HandleState::Running { sequence, looping };
        info!(%device, %sequence, looping, "Projection started");
        Ok(())
    }

    /// Block until a single-pass projection has finished.
    ///
    /// # Errors
    ///
    /// [`AlpError::InvalidState`] while a looping projection runs, since it
    /// only ends with a halt. [`AlpError::Native`] on library failure.
    pub fn wait(&mut self) -> AlpResult {
        let device = self.live()?;
        if let HandleState::Running {
            sequence,
            looping: true,
        } = self.state
        {
            return Err(AlpError::invalid_state(format!(
                "{sequence} is looping, halt it instead of waiting"
            )));
        }
        self.driver.proj_wait(device).map_err(native("AlpProjWait"))?;
        self.state = HandleState::Idle;
        debug!(%device, "Projection finished");
        Ok(())
    }

    /// Stop the display and abort running uploads (`AlpDevHalt`).
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn halt(&mut self) -> AlpResult {
        let device = self.live()?;
        self.driver.dev_halt(device).map_err(native("AlpDevHalt"))?;
        self.state = HandleState::Idle;
        info!(%device, "Device halted");
        Ok(())
    }

    /// Stop only the projection (`AlpProjHalt`).
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn halt_projection(&mut self) -> AlpResult {
        let device = self.live()?;
        self.driver.proj_halt(device).map_err(native("AlpProjHalt"))?;
        self.state = HandleState::Idle;
        info!(%device, "Projection halted");
        Ok(())
    }

    /// `AlpDevInquire`.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn dev_inquire(&mut self, inquire_type: i32) -> AlpResult<i32> {
        let device = self.live()?;
        self.driver
            .dev_inquire(device, inquire_type)
            .map_err(native("AlpDevInquire"))
    }

    /// `AlpSeqInquire`.
    ///
    /// # Errors
    ///
    /// Sequence resolution errors or [`AlpError::Native`].
    pub fn seq_inquire(
        &mut self,
        inquire_type: i32,
        sequence: Option<SequenceId>,
    ) -> AlpResult<i32> {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        self.driver
            .seq_inquire(device, sequence, inquire_type)
            .map_err(native("AlpSeqInquire"))
    }

    /// `AlpProjInquire`.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn proj_inquire(&mut self, inquire_type: i32) -> AlpResult<i32> {
        let device = self.live()?;
        self.driver
            .proj_inquire(device, inquire_type)
            .map_err(native("AlpProjInquire"))
    }

    /// `AlpProjInquireEx`, currently only `ALP_PROJ_PROGRESS`.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn proj_inquire_ex(&mut self, inquire_type: i32) -> AlpResult<AlpProjProgress> {
        let device = self.live()?;
        self.driver
            .proj_inquire_ex(device, inquire_type)
            .map_err(native("AlpProjInquireEx"))
    }

    /// `AlpDevControl`.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn dev_control(&mut self, control_type: i32, value: i32) -> AlpResult {
        let device = self.live()?;
        self.driver
            .dev_control(device, control_type, value)
            .map_err(native("AlpDevControl"))?;
        debug!(%device, control_type, value, "Device control set");
        Ok(())
    }

    /// `AlpDevControlEx` with a synch output gate,
    /// `ALP_DEV_DYN_SYNCH_OUT1_GATE` to `..._OUT3_GATE`.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn dev_control_ex(&mut self, control_type: i32, gate: &AlpDynSynchOutGate) -> AlpResult {
        let device = self.live()?;
        self.driver
            .dev_control_ex(device, control_type, UserStruct::SynchOutGate(gate))
            .map_err(native("AlpDevControlEx"))
    }

    /// `AlpSeqControl`. Changes of `ALP_DATA_FORMAT` are remembered for
    /// upload length checks.
    ///
    /// # Errors
    ///
    /// Sequence resolution errors or [`AlpError::Native`].
    pub fn seq_control(
        &mut self,
        control_type: i32,
        value: i32,
        sequence: Option<SequenceId>,
    ) -> AlpResult {
        let device = self.live()?;
        let sequence = self.sequences.resolve(sequence)?;
        self.driver
            .seq_control(device, sequence, control_type, value)
            .map_err(native("AlpSeqControl"))?;
        if control_type == ALP_DATA_FORMAT
            && let Some(format) = DataFormat::from_code(value)
        {
            self.sequences.set_format(sequence, format);
        }
        debug!(%sequence, control_type, value, "Sequence control set");
        Ok(())
    }

    /// `AlpProjControl`.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn proj_control(&mut self, control_type: i32, value: i32) -> AlpResult {
        let device = self.live()?;
        self.driver
            .proj_control(device, control_type, value)
            .map_err(native("AlpProjControl"))?;
        debug!(%device, control_type, value, "Projection control set");
        Ok(())
    }

    /// `AlpProjControlEx` with a FLUT, shear table or DMD mask record.
    ///
    /// # Errors
    ///
    /// [`AlpError::Native`] on library failure.
    pub fn proj_control_ex(&mut self, control_type: i32, record: UserStruct<'_>) -> AlpResult {
        let device = self.live()?;
        let kind = record.kind();
        self.driver
            .proj_control_ex(device, control_type, record)
            .map_err(native("AlpProjControlEx"))?;
        debug!(%device, control_type, kind, "Projection record written");
        Ok(())
    }

    /// `ALP_DEV_STATE`.
    ///
    /// # Errors
    ///
    /// As [`Alp4::dev_inquire`].
    pub fn device_state(&mut self) -> AlpResult<DeviceState> {
        self.dev_inquire(ALP_DEV_STATE).map(DeviceState::from_code)
    }

    /// `ALP_PROJ_STATE`.
    ///
    /// # Errors
    ///
    /// As [`Alp4::proj_inquire`].
    pub fn projection_state(&mut self) -> AlpResult<ProjectionState> {
        self.proj_inquire(ALP_PROJ_STATE).map(ProjectionState::from_code)
    }

    /// Free sequence memory, in binary pictures.
    ///
    /// # Errors
    ///
    /// As [`Alp4::dev_inquire`].
    pub fn available_memory(&mut self) -> AlpResult<i32> {
        self.dev_inquire(ALP_AVAIL_MEMORY)
    }

    /// Serial number of the board.
    ///
    /// # Errors
    ///
    /// As [`Alp4::dev_inquire`].
    pub fn serial_number(&mut self) -> AlpResult<i32> {
        self.dev_inquire(ALP_DEVICE_NUMBER)
    }

    /// Read all three temperature sensors.
    ///
    /// # Errors
    ///
    /// As [`Alp4::dev_inquire`].
    pub fn temperatures(&mut self) -> AlpResult<Temperatures> {
        Ok(Temperatures {
            ddc_fpga: celsius(self.dev_inquire(ALP_DDC_FPGA_TEMPERATURE)?),
            apps_fpga: celsius(self.dev_inquire(ALP_APPS_FPGA_TEMPERATURE)?),
            pcb: celsius(self.dev_inquire(ALP_PCB_TEMPERATURE)?),
        })
    }

    /// Live sequences in ascending id order.
    pub fn sequences(&self) -> Vec<SequenceId> {
        self.sequences.ids()
    }

    /// The sequence used when an id is omitted.
    pub fn last_sequence(&self) -> Option<SequenceId> {
        self.sequences.last()
    }

    /// What the handle recorded for a live sequence.
    pub fn sequence_info(&self, sequence: SequenceId) -> Option<SequenceInfo> {
        self.sequences.get(sequence).copied()
    }

    /// Device id returned by `AlpDevAlloc`.
    pub fn device_id(&self) -> DeviceId {
        self.device
    }

    /// DMD resolution.
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// DMD model.
    pub fn dmd_type(&self) -> DmdType {
        self.dmd_type
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Release failure reporting in effect.
    pub fn release_policy(&self) -> ReleasePolicy {
        self.release
    }

    /// Change how release failures are reported.
    pub fn set_release_policy(&mut self, release: ReleasePolicy) {
        self.release = release;
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The underlying driver. Calls made here bypass the sequence registry.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn live(&self) -> AlpResult<DeviceId> {
        match self.state {
            HandleState::Freed => Err(AlpError::DeviceFreed),
            _ => Ok(self.device),
        }
    }

    fn info(&self, sequence: SequenceId) -> AlpResult<SequenceInfo> {
        self.sequences
            .get(sequence)
            .copied()
            .ok_or(AlpError::UnknownSequence(sequence))
    }
}

impl<D: AlpDriver> Drop for Alp4<D> {
    fn drop(&mut self) {
        if self.state == HandleState::Freed {
            return;
        }
        let device = self.device;
        if matches!(self.state, HandleState::Running { .. })
            && let Err(status) = self.driver.dev_halt(device)
        {
            warn!(%device, %status, "AlpDevHalt failed during drop");
        }
        match self.driver.dev_free(device) {
            Ok(()) => debug!(%device, "ALP device freed on drop"),
            Err(status) => warn!(%device, %status, "AlpDevFree failed during drop"),
        }
    }
}

fn native(operation: &'static str) -> impl FnOnce(AlpStatus) -> AlpError {
    move |status| AlpError::native(operation, status)
}

fn check_len(expected: usize, actual: usize) -> AlpResult {
    if expected == actual {
        Ok(())
    } else {
        Err(AlpError::BufferLength { expected, actual })
    }
}

// Pictures covered by `offset` and `count`, 0 meaning the rest.
fn picture_range(info: &SequenceInfo, offset: u32, count: u32) -> AlpResult<u32> {
    if offset >= info.picture_count {
        return Err(AlpError::invalid_argument(
            "picture_offset",
            format!("{offset} is beyond the last picture {}", info.picture_count - 1),
        ));
    }
    let available = info.picture_count - offset;
    match count {
        0 => Ok(available),
        n if n <= available => Ok(n),
        n => Err(AlpError::invalid_argument(
            "picture_count",
            format!("{n} pictures from {offset} exceed {}", info.picture_count),
        )),
    }
}

fn query_geometry<D: AlpDriver>(
    driver: &mut D,
    device: DeviceId,
) -> AlpResult<(DmdType, DisplayGeometry)> {
    let code = driver
        .dev_inquire(device, ALP_DEV_DMDTYPE)
        .map_err(native("AlpDevInquire"))?;
    let dmd_type = DmdType::from_code(code);
    if let Some(geometry) = dmd_type.geometry() {
        return Ok((dmd_type, geometry));
    }

    let size = |driver: &mut D, inquire_type| {
        driver
            .dev_inquire(device, inquire_type)
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
    };
    match (size(driver, ALP_DEV_DISPLAY_WIDTH), size(driver, ALP_DEV_DISPLAY_HEIGHT)) {
        (Some(width), Some(height)) => {
            debug!(code, width, height, "DMD type not in table, using reported display size");
            Ok((dmd_type, DisplayGeometry::new(width, height)))
        }
        _ => Err(AlpError::UnsupportedDmdType { code }),
    }
}
