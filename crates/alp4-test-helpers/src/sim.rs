//! In-memory ALP device.
//!
//! [`SimulatedAlp`] implements [`AlpDriver`] with the parts of the controller
//! behavior the binding relies on: one allocatable device, sequence memory
//! accounting, timing defaults and bounds, upload locking while a sequence is
//! displayed, and the vendor status codes for each rejection. Every call is
//! recorded, and any entry point can be told to fail once with a chosen
//! status.

use std::collections::BTreeMap;

use alp4_api::codes::*;
use alp4_api::{
    AlpDriver, AlpLinePut, AlpProjProgress, AlpStatus, DataFormat, DeviceId, DisplayGeometry,
    DmdType, DriverResult, SequenceId, TimingParams, UserStruct,
};

/// Picture time chosen when neither picture nor illumination time is given (30 Hz).
pub const DEFAULT_PICTURE_TIME_US: i32 = 1_000_000 / 30;
/// Minimum picture time per bit plane.
pub const MIN_PICTURE_TIME_PER_PLANE_US: i32 = 45;
/// Largest accepted picture time.
pub const MAX_PICTURE_TIME_US: i32 = 10_000_000;
/// Largest accepted synch delay.
pub const MAX_SYNCH_DELAY_US: i32 = 130_000;
/// Largest accepted trigger-in delay.
pub const MAX_TRIGGER_IN_DELAY_US: i32 = 130_000;
/// Sequence memory of the simulated board, in binary pictures.
pub const DEFAULT_MEMORY_PICTURES: i32 = 43_690;

const DEVICE_CONTROLS: [i32; 6] = [
    ALP_SYNCH_POLARITY,
    ALP_TRIGGER_EDGE,
    ALP_USB_CONNECTION,
    ALP_DEV_DMD_MODE,
    ALP_PWM_LEVEL,
    ALP_TRIGGER_TIME_OUT,
];

const SEQUENCE_CONTROLS: [i32; 17] = [
    ALP_SEQ_REPEAT,
    ALP_FIRSTFRAME,
    ALP_LASTFRAME,
    ALP_BITNUM,
    ALP_BIN_MODE,
    ALP_PWM_MODE,
    ALP_DATA_FORMAT,
    ALP_SEQ_PUT_LOCK,
    ALP_FIRSTLINE,
    ALP_LASTLINE,
    ALP_LINE_INC,
    ALP_SCROLL_FROM_ROW,
    ALP_SCROLL_TO_ROW,
    ALP_FLUT_MODE,
    ALP_FLUT_ENTRIES9,
    ALP_FLUT_OFFSET9,
    ALP_SEQ_DMD_LINES,
];

const PROJECTION_CONTROLS: [i32; 9] = [
    ALP_PROJ_MODE,
    ALP_PROJ_STEP,
    ALP_PROJ_SYNC,
    ALP_PROJ_INVERSION,
    ALP_PROJ_UPSIDE_DOWN,
    ALP_PROJ_QUEUE_MODE,
    ALP_PROJ_ABORT_SEQUENCE,
    ALP_PROJ_ABORT_FRAME,
    ALP_PROJ_WAIT_UNTIL,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedTiming {
    illuminate: i32,
    picture: i32,
    synch_delay: i32,
    synch_pulse_width: i32,
    trigger_in_delay: i32,
}

#[derive(Debug, Clone)]
struct SimSequence {
    bit_planes: i32,
    pic_num: i32,
    controls: BTreeMap<i32, i32>,
    timing: ResolvedTiming,
    frames: Vec<Vec<u8>>,
}

impl SimSequence {
    fn new(bit_planes: i32, pic_num: i32) -> Self {
        let controls = BTreeMap::from([
            (ALP_SEQ_REPEAT, 1),
            (ALP_FIRSTFRAME, 0),
            (ALP_LASTFRAME, pic_num - 1),
            (ALP_BITNUM, bit_planes),
            (ALP_BIN_MODE, ALP_BIN_NORMAL),
            (ALP_DATA_FORMAT, ALP_DATA_MSB_ALIGN),
            (ALP_SEQ_PUT_LOCK, ALP_DEFAULT),
        ]);
        Self {
            bit_planes,
            pic_num,
            controls,
            timing: ResolvedTiming {
                illuminate: DEFAULT_PICTURE_TIME_US,
                picture: DEFAULT_PICTURE_TIME_US,
                synch_delay: 0,
                synch_pulse_width: DEFAULT_PICTURE_TIME_US / 2,
                trigger_in_delay: 0,
            },
            frames: vec![Vec::new(); usize::try_from(pic_num).unwrap_or(0)],
        }
    }

    fn control(&self, code: i32) -> i32 {
        self.controls.get(&code).copied().unwrap_or(ALP_DEFAULT)
    }

    fn data_format(&self) -> DataFormat {
        DataFormat::from_code(self.control(ALP_DATA_FORMAT)).unwrap_or_default()
    }

    fn min_picture_time(&self) -> i32 {
        MIN_PICTURE_TIME_PER_PLANE_US * self.bit_planes
    }

    fn memory(&self) -> i32 {
        self.bit_planes * self.pic_num
    }

    fn frame_count(&self) -> i32 {
        self.control(ALP_LASTFRAME) - self.control(ALP_FIRSTFRAME) + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Projection {
    sequence: SequenceId,
    looping: bool,
    // Settings in effect at start; changes during display apply to the next run.
    frames: i32,
    repeats: i32,
}

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCall {
    /// Native entry point name, e.g. `AlpSeqPut`.
    pub operation: &'static str,
    /// Sequence the call targeted, if any.
    pub sequence: Option<SequenceId>,
}

/// Simulated ALP-4.x controller with one DMD.
#[derive(Debug, Clone)]
pub struct SimulatedAlp {
    dmd_type: DmdType,
    display: Option<DisplayGeometry>,
    serial: i32,
    memory_pictures: i32,
    temperatures: [i32; 3],
    device: Option<DeviceId>,
    next_device: u32,
    next_sequence: u32,
    dev_controls: BTreeMap<i32, i32>,
    proj_controls: BTreeMap<i32, i32>,
    sequences: BTreeMap<SequenceId, SimSequence>,
    projection: Option<Projection>,
    completed_runs: u32,
    elapsed_us: u64,
    user_structs: Vec<(i32, &'static str)>,
    injected: BTreeMap<&'static str, AlpStatus>,
    calls: Vec<SimCall>,
}

impl Default for SimulatedAlp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAlp {
    /// A 0.7" XGA board (1024x768).
    pub fn new() -> Self {
        Self {
            dmd_type: DmdType::Xga07A,
            display: None,
            serial: 12_345,
            memory_pictures: DEFAULT_MEMORY_PICTURES,
            temperatures: [40 * 256, 42 * 256, 35 * 256],
            device: None,
            next_device: 1,
            next_sequence: 1,
            dev_controls: BTreeMap::from([
                (ALP_SYNCH_POLARITY, ALP_LEVEL_HIGH),
                (ALP_TRIGGER_EDGE, ALP_EDGE_RISING),
                (ALP_DEV_DMD_MODE, ALP_DMD_RESUME),
            ]),
            proj_controls: BTreeMap::from([
                (ALP_PROJ_MODE, ALP_MASTER),
                (ALP_PROJ_QUEUE_MODE, ALP_PROJ_LEGACY),
            ]),
            sequences: BTreeMap::new(),
            projection: None,
            completed_runs: 0,
            elapsed_us: 0,
            user_structs: Vec::new(),
            injected: BTreeMap::new(),
            calls: Vec::new(),
        }
    }

    /// Report a different DMD type.
    pub fn with_dmd_type(mut self, dmd_type: DmdType) -> Self {
        self.dmd_type = dmd_type;
        self
    }

    /// Answer `ALP_DEV_DISPLAY_WIDTH` / `ALP_DEV_DISPLAY_HEIGHT` with this size.
    ///
    /// Without it, the display inquiries only succeed for known DMD types.
    pub fn with_display(mut self, geometry: DisplayGeometry) -> Self {
        self.display = Some(geometry);
        self
    }

    /// A small unknown DMD, handy for tests that upload whole frames.
    pub fn tiny(width: u32, height: u32) -> Self {
        Self::new()
            .with_dmd_type(DmdType::Other(0x7F))
            .with_display(DisplayGeometry::new(width, height))
    }

    /// Set the serial number reported by `ALP_DEVICE_NUMBER`.
    pub fn with_serial(mut self, serial: i32) -> Self {
        self.serial = serial;
        self
    }

    /// Set the sequence memory, in binary pictures.
    pub fn with_memory(mut self, pictures: i32) -> Self {
        self.memory_pictures = pictures;
        self
    }

    /// Set the three temperature sensors, in 1/256 °C.
    pub fn with_temperatures(mut self, ddc: i32, apps: i32, pcb: i32) -> Self {
        self.temperatures = [ddc, apps, pcb];
        self
    }

    /// Make the next call to `operation` fail with `status`.
    pub fn fail_next(&mut self, operation: &'static str, status: AlpStatus) {
        self.injected.insert(operation, status);
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> &[SimCall] {
        &self.calls
    }

    /// Number of calls to `operation`.
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.iter().filter(|c| c.operation == operation).count()
    }

    /// Forget the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// True while a device is allocated.
    pub fn is_allocated(&self) -> bool {
        self.device.is_some()
    }

    /// Sequences currently allocated on the device.
    pub fn live_sequences(&self) -> Vec<SequenceId> {
        self.sequences.keys().copied().collect()
    }

    /// The sequence being displayed and whether it loops.
    pub fn running(&self) -> Option<(SequenceId, bool)> {
        self.projection.map(|p| (p.sequence, p.looping))
    }

    /// Picture `index` of `sequence` as last uploaded. Empty if never written.
    pub fn frame(&self, sequence: SequenceId, index: usize) -> Option<&[u8]> {
        self.sequences
            .get(&sequence)
            .and_then(|seq| seq.frames.get(index))
            .map(Vec::as_slice)
    }

    /// Single-pass runs completed by `AlpProjWait`.
    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Display time accumulated by completed runs, in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// User structs received through the `...ControlEx` calls, as (code, kind).
    pub fn user_structs(&self) -> &[(i32, &'static str)] {
        &self.user_structs
    }

    fn geometry(&self) -> Option<DisplayGeometry> {
        self.display.or_else(|| self.dmd_type.geometry())
    }

    fn enter(
        &mut self,
        operation: &'static str,
        device: Option<DeviceId>,
        sequence: Option<SequenceId>,
    ) -> DriverResult {
        self.calls.push(SimCall {
            operation,
            sequence,
        });
        if let Some(status) = self.injected.remove(operation) {
            return Err(status);
        }
        if let Some(device) = device
            && self.device != Some(device)
        {
            return Err(AlpStatus::NotAvailable);
        }
        Ok(())
    }

    fn sequence(&self, sequence: SequenceId) -> DriverResult<&SimSequence> {
        self.sequences
            .get(&sequence)
            .ok_or(AlpStatus::NotAvailable)
    }

    fn sequence_mut(&mut self, sequence: SequenceId) -> DriverResult<&mut SimSequence> {
        self.sequences
            .get_mut(&sequence)
            .ok_or(AlpStatus::NotAvailable)
    }

    fn is_displaying(&self, sequence: SequenceId) -> bool {
        self.projection.is_some_and(|p| p.sequence == sequence)
    }

    fn used_memory(&self) -> i32 {
        self.sequences.values().map(SimSequence::memory).sum()
    }

    fn check_put(&self, sequence: SequenceId) -> DriverResult {
        let seq = self.sequence(sequence)?;
        if self.is_displaying(sequence) && seq.control(ALP_SEQ_PUT_LOCK) == ALP_DEFAULT {
            return Err(AlpStatus::SeqInUse);
        }
        Ok(())
    }

    fn start(&mut self, device: DeviceId, sequence: SequenceId, looping: bool) -> DriverResult {
        let operation = if looping {
            "AlpProjStartCont"
        } else {
            "AlpProjStart"
        };
        self.enter(operation, Some(device), Some(sequence))?;
        let seq = self.sequence(sequence)?;
        self.projection = Some(Projection {
            sequence,
            looping,
            frames: seq.frame_count(),
            repeats: seq.control(ALP_SEQ_REPEAT),
        });
        Ok(())
    }
}

fn picture_range(pic_offset: i32, pic_load: i32, pic_num: i32) -> DriverResult<(usize, usize)> {
    if pic_offset < 0 || pic_offset >= pic_num || pic_load < 0 {
        return Err(AlpStatus::ParmInvalid);
    }
    let load = if pic_load == ALP_DEFAULT {
        pic_num - pic_offset
    } else {
        pic_load
    };
    if pic_offset + load > pic_num {
        return Err(AlpStatus::ParmInvalid);
    }
    let offset = usize::try_from(pic_offset).map_err(|_| AlpStatus::ParmInvalid)?;
    let load = usize::try_from(load).map_err(|_| AlpStatus::ParmInvalid)?;
    Ok((offset, load))
}

impl AlpDriver for SimulatedAlp {
    fn dev_alloc(&mut self, device_num: i32, init_flag: i32) -> DriverResult<DeviceId> {
        self.enter("AlpDevAlloc", None, None)?;
        if init_flag != ALP_DEFAULT {
            return Err(AlpStatus::ParmInvalid);
        }
        if device_num != ALP_DEFAULT && device_num != self.serial {
            return Err(AlpStatus::NotOnline);
        }
        if self.device.is_some() {
            return Err(AlpStatus::NotReady);
        }
        let id = DeviceId(self.next_device);
        self.next_device += 1;
        self.device = Some(id);
        Ok(id)
    }

    fn dev_halt(&mut self, device: DeviceId) -> DriverResult {
        self.enter("AlpDevHalt", Some(device), None)?;
        self.projection = None;
        Ok(())
    }

    fn dev_free(&mut self, device: DeviceId) -> DriverResult {
        self.enter("AlpDevFree", Some(device), None)?;
        if self.projection.is_some() {
            return Err(AlpStatus::NotIdle);
        }
        self.device = None;
        self.sequences.clear();
        Ok(())
    }

    fn dev_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32> {
        self.enter("AlpDevInquire", Some(device), None)?;
        let value = match inquire_type {
            ALP_DEVICE_NUMBER => self.serial,
            ALP_VERSION => 0x0401,
            ALP_DEV_STATE => {
                if self.projection.is_some() {
                    ALP_DEV_BUSY
                } else {
                    ALP_DEV_IDLE
                }
            }
            ALP_AVAIL_MEMORY => self.memory_pictures - self.used_memory(),
            ALP_DEV_DMDTYPE => self.dmd_type.code(),
            ALP_DEV_DISPLAY_WIDTH | ALP_DEV_DISPLAY_HEIGHT => {
                let geometry = self.geometry().ok_or(AlpStatus::ParmInvalid)?;
                let size = if inquire_type == ALP_DEV_DISPLAY_WIDTH {
                    geometry.width
                } else {
                    geometry.height
                };
                i32::try_from(size).map_err(|_| AlpStatus::ParmInvalid)?
            }
            ALP_DDC_FPGA_TEMPERATURE => self.temperatures[0],
            ALP_APPS_FPGA_TEMPERATURE => self.temperatures[1],
            ALP_PCB_TEMPERATURE => self.temperatures[2],
            code => self
                .dev_controls
                .get(&code)
                .copied()
                .ok_or(AlpStatus::ParmInvalid)?,
        };
        Ok(value)
    }

    fn dev_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult {
        self.enter("AlpDevControl", Some(device), None)?;
        if !DEVICE_CONTROLS.contains(&control_type) {
            return Err(AlpStatus::ParmInvalid);
        }
        self.dev_controls.insert(control_type, value);
        Ok(())
    }

    fn dev_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult {
        self.enter("AlpDevControlEx", Some(device), None)?;
        match (control_type, user_struct) {
            (
                ALP_DEV_DYN_SYNCH_OUT1_GATE | ALP_DEV_DYN_SYNCH_OUT2_GATE
                | ALP_DEV_DYN_SYNCH_OUT3_GATE,
                UserStruct::SynchOutGate(gate),
            ) if usize::from(gate.period) <= gate.gate.len() && gate.polarity <= 1 => {
                self.user_structs.push((control_type, user_struct.kind()));
                Ok(())
            }
            _ => Err(AlpStatus::ParmInvalid),
        }
    }

    fn seq_alloc(
        &mut self,
        device: DeviceId,
        bit_planes: i32,
        pic_num: i32,
    ) -> DriverResult<SequenceId> {
        self.enter("AlpSeqAlloc", Some(device), None)?;
        if !(1..=8).contains(&bit_planes) || pic_num < 1 {
            return Err(AlpStatus::ParmInvalid);
        }
        let needed = bit_planes
            .checked_mul(pic_num)
            .ok_or(AlpStatus::MemoryFull)?;
        if self.used_memory() + needed > self.memory_pictures {
            return Err(AlpStatus::MemoryFull);
        }
        let id = SequenceId(self.next_sequence);
        self.next_sequence += 1;
        self.sequences.insert(id, SimSequence::new(bit_planes, pic_num));
        Ok(id)
    }

    fn seq_control(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        control_type: i32,
        value: i32,
    ) -> DriverResult {
        self.enter("AlpSeqControl", Some(device), Some(sequence))?;
        let seq = self.sequence_mut(sequence)?;
        if !SEQUENCE_CONTROLS.contains(&control_type) {
            return Err(AlpStatus::ParmInvalid);
        }
        let valid = match control_type {
            ALP_DATA_FORMAT => DataFormat::from_code(value).is_some(),
            ALP_BITNUM => (1..=seq.bit_planes).contains(&value),
            ALP_FIRSTFRAME | ALP_LASTFRAME => (0..seq.pic_num).contains(&value),
            ALP_BIN_MODE => matches!(value, ALP_BIN_NORMAL | ALP_BIN_UNINTERRUPTED),
            ALP_SEQ_REPEAT => value >= 1,
            _ => true,
        };
        if !valid {
            return Err(AlpStatus::ParmInvalid);
        }
        seq.controls.insert(control_type, value);
        Ok(())
    }

    fn seq_timing(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        timing: TimingParams,
    ) -> DriverResult {
        self.enter("AlpSeqTiming", Some(device), Some(sequence))?;
        if self.is_displaying(sequence) {
            return Err(AlpStatus::SeqInUse);
        }
        let seq = self.sequence_mut(sequence)?;
        let TimingParams {
            illuminate_time,
            picture_time,
            synch_delay,
            synch_pulse_width,
            trigger_in_delay,
        } = timing;
        if [
            illuminate_time,
            picture_time,
            synch_delay,
            synch_pulse_width,
            trigger_in_delay,
        ]
        .iter()
        .any(|v| *v < 0)
        {
            return Err(AlpStatus::ParmInvalid);
        }

        let picture = match (picture_time, illuminate_time) {
            (ALP_DEFAULT, ALP_DEFAULT) => DEFAULT_PICTURE_TIME_US,
            (ALP_DEFAULT, illuminate) => illuminate.max(seq.min_picture_time()),
            (picture, _) => picture,
        };
        let illuminate = if illuminate_time == ALP_DEFAULT {
            picture
        } else {
            illuminate_time
        };
        if picture < seq.min_picture_time()
            || picture > MAX_PICTURE_TIME_US
            || illuminate > picture
            || synch_delay > MAX_SYNCH_DELAY_US
            || trigger_in_delay > MAX_TRIGGER_IN_DELAY_US
            || synch_pulse_width > picture
        {
            return Err(AlpStatus::ParmInvalid);
        }
        seq.timing = ResolvedTiming {
            illuminate,
            picture,
            synch_delay,
            synch_pulse_width: if synch_pulse_width == ALP_DEFAULT {
                illuminate / 2
            } else {
                synch_pulse_width
            },
            trigger_in_delay,
        };
        Ok(())
    }

    fn seq_inquire(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        inquire_type: i32,
    ) -> DriverResult<i32> {
        self.enter("AlpSeqInquire", Some(device), Some(sequence))?;
        let seq = self.sequence(sequence)?;
        let timing = seq.timing;
        let value = match inquire_type {
            ALP_BITPLANES => seq.bit_planes,
            ALP_PICNUM => seq.pic_num,
            ALP_PICTURE_TIME => timing.picture,
            ALP_ILLUMINATE_TIME | ALP_ON_TIME => timing.illuminate,
            ALP_OFF_TIME => timing.picture - timing.illuminate,
            ALP_SYNCH_DELAY => timing.synch_delay,
            ALP_SYNCH_PULSEWIDTH => timing.synch_pulse_width,
            ALP_TRIGGER_IN_DELAY => timing.trigger_in_delay,
            ALP_MAX_SYNCH_DELAY => MAX_SYNCH_DELAY_US,
            ALP_MAX_TRIGGER_IN_DELAY => MAX_TRIGGER_IN_DELAY_US,
            ALP_MIN_PICTURE_TIME => seq.min_picture_time(),
            ALP_MIN_ILLUMINATE_TIME => MIN_PICTURE_TIME_PER_PLANE_US / 2,
            ALP_MAX_PICTURE_TIME => MAX_PICTURE_TIME_US,
            code if SEQUENCE_CONTROLS.contains(&code) => seq.control(code),
            _ => return Err(AlpStatus::ParmInvalid),
        };
        Ok(value)
    }

    fn seq_put(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        pic_offset: i32,
        pic_load: i32,
        data: &[u8],
    ) -> DriverResult {
        self.enter("AlpSeqPut", Some(device), Some(sequence))?;
        self.check_put(sequence)?;
        let geometry = self.geometry().ok_or(AlpStatus::NotConfigured)?;
        let seq = self.sequence_mut(sequence)?;
        let (offset, load) = picture_range(pic_offset, pic_load, seq.pic_num)?;
        let frame_bytes = geometry.frame_bytes(seq.data_format());
        if data.len() < load * frame_bytes {
            return Err(AlpStatus::AddrInvalid);
        }
        for (slot, chunk) in seq.frames[offset..offset + load]
            .iter_mut()
            .zip(data.chunks(frame_bytes))
        {
            *slot = chunk.to_vec();
        }
        Ok(())
    }

    fn seq_put_ex(
        &mut self,
        device: DeviceId,
        sequence: SequenceId,
        line_put: &AlpLinePut,
        data: &[u8],
    ) -> DriverResult {
        self.enter("AlpSeqPutEx", Some(device), Some(sequence))?;
        self.check_put(sequence)?;
        let geometry = self.geometry().ok_or(AlpStatus::NotConfigured)?;
        let field = |v| i32::try_from(v).map_err(|_| AlpStatus::ParmInvalid);
        if field(line_put.transfer_mode)? != ALP_PUT_LINES {
            return Err(AlpStatus::ParmInvalid);
        }
        let height = i32::try_from(geometry.height).map_err(|_| AlpStatus::ParmInvalid)?;
        let line_offset = field(line_put.line_offset)?;
        let line_load = field(line_put.line_load)?;
        let lines = if line_load == ALP_DEFAULT {
            height - line_offset
        } else {
            line_load
        };
        if line_offset < 0 || lines <= 0 || line_offset + lines > height {
            return Err(AlpStatus::ParmInvalid);
        }
        let seq = self.sequence_mut(sequence)?;
        let (offset, load) = picture_range(
            field(line_put.pic_offset)?,
            field(line_put.pic_load)?,
            seq.pic_num,
        )?;
        let format = seq.data_format();
        let row_bytes = geometry.row_bytes(format);
        let frame_bytes = geometry.frame_bytes(format);
        let section = usize::try_from(lines).map_err(|_| AlpStatus::ParmInvalid)? * row_bytes;
        let start = usize::try_from(line_offset).map_err(|_| AlpStatus::ParmInvalid)? * row_bytes;
        if data.len() < load * section {
            return Err(AlpStatus::AddrInvalid);
        }
        for (frame, chunk) in seq.frames[offset..offset + load]
            .iter_mut()
            .zip(data.chunks(section))
        {
            frame.resize(frame_bytes, 0);
            frame[start..start + section].copy_from_slice(chunk);
        }
        Ok(())
    }

    fn seq_free(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        self.enter("AlpSeqFree", Some(device), Some(sequence))?;
        self.sequence(sequence)?;
        if self.is_displaying(sequence) {
            return Err(AlpStatus::NotIdle);
        }
        self.sequences.remove(&sequence);
        Ok(())
    }

    fn proj_control(&mut self, device: DeviceId, control_type: i32, value: i32) -> DriverResult {
        self.enter("AlpProjControl", Some(device), None)?;
        if control_type == ALP_PROJ_RESET_QUEUE {
            return Ok(());
        }
        if !PROJECTION_CONTROLS.contains(&control_type) {
            return Err(AlpStatus::ParmInvalid);
        }
        if control_type == ALP_PROJ_MODE && !matches!(value, ALP_MASTER | ALP_SLAVE) {
            return Err(AlpStatus::ParmInvalid);
        }
        self.proj_controls.insert(control_type, value);
        Ok(())
    }

    fn proj_control_ex(
        &mut self,
        device: DeviceId,
        control_type: i32,
        user_struct: UserStruct<'_>,
    ) -> DriverResult {
        self.enter("AlpProjControlEx", Some(device), None)?;
        let accepted = match (control_type, user_struct) {
            (ALP_FLUT_WRITE_9BIT | ALP_FLUT_WRITE_18BIT, UserStruct::FlutWrite(flut)) => {
                flut.offset >= 0
                    && flut.size >= 0
                    && usize::try_from(flut.offset + flut.size)
                        .is_ok_and(|end| end <= flut.frame_numbers.len())
            }
            (ALP_X_SHEAR, UserStruct::ShearTable(table)) => {
                table.shift_distance.iter().all(|d| (0..=511).contains(d))
            }
            (ALP_DMD_MASK_WRITE, UserStruct::DmdMask(mask)) => {
                mask.row_offset >= 0 && mask.row_count >= 0
            }
            _ => false,
        };
        if !accepted {
            return Err(AlpStatus::ParmInvalid);
        }
        self.user_structs.push((control_type, user_struct.kind()));
        Ok(())
    }

    fn proj_inquire(&mut self, device: DeviceId, inquire_type: i32) -> DriverResult<i32> {
        self.enter("AlpProjInquire", Some(device), None)?;
        let value = match inquire_type {
            ALP_PROJ_STATE => {
                if self.projection.is_some() {
                    ALP_PROJ_ACTIVE
                } else {
                    ALP_PROJ_IDLE
                }
            }
            ALP_PROJ_QUEUE_ID => i32::try_from(self.completed_runs).unwrap_or(i32::MAX),
            ALP_PROJ_QUEUE_MAX_AVAIL => 32,
            ALP_PROJ_QUEUE_AVAIL => 32 - i32::from(self.projection.is_some()),
            ALP_FLUT_MAX_ENTRIES9 => 4096,
            code => self
                .proj_controls
                .get(&code)
                .copied()
                .ok_or(AlpStatus::ParmInvalid)?,
        };
        Ok(value)
    }

    fn proj_inquire_ex(
        &mut self,
        device: DeviceId,
        inquire_type: i32,
    ) -> DriverResult<AlpProjProgress> {
        self.enter("AlpProjInquireEx", Some(device), None)?;
        if inquire_type != ALP_PROJ_PROGRESS {
            return Err(AlpStatus::ParmInvalid);
        }
        let mut progress = AlpProjProgress {
            current_queue_id: self.completed_runs.into(),
            ..AlpProjProgress::default()
        };
        match self.projection {
            None => progress.flags = ALP_FLAG_QUEUE_IDLE.into(),
            Some(Projection {
                sequence,
                looping,
                frames,
                ..
            }) => {
                let seq = self.sequence(sequence)?;
                let frames = u32::try_from(frames).unwrap_or(0);
                progress.sequence_id = sequence.0.into();
                progress.sequence_counter = u32::from(!looping).into();
                progress.frame_counter = frames.into();
                progress.frames_per_sub_sequence = frames.into();
                progress.picture_time = u32::try_from(seq.timing.picture).unwrap_or(0).into();
                if looping {
                    progress.flags = ALP_FLAG_SEQUENCE_INDEFINITE.into();
                    progress.sequence_counter_underflow = 1;
                }
            }
        }
        Ok(progress)
    }

    fn proj_start(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        self.start(device, sequence, false)
    }

    fn proj_start_cont(&mut self, device: DeviceId, sequence: SequenceId) -> DriverResult {
        self.start(device, sequence, true)
    }

    fn proj_halt(&mut self, device: DeviceId) -> DriverResult {
        self.enter("AlpProjHalt", Some(device), None)?;
        self.projection = None;
        Ok(())
    }

    fn proj_wait(&mut self, device: DeviceId) -> DriverResult {
        self.enter("AlpProjWait", Some(device), None)?;
        let Some(projection) = self.projection else {
            return Ok(());
        };
        // A looping run never completes; the simulator refuses to block.
        if projection.looping {
            return Err(AlpStatus::NotIdle);
        }
        let seq = self.sequence(projection.sequence)?;
        let repeats = u64::try_from(projection.repeats).unwrap_or(1);
        let frames = u64::try_from(projection.frames).unwrap_or(0);
        let picture = u64::try_from(seq.timing.picture).unwrap_or(0);
        self.elapsed_us += repeats * frames * picture;
        self.completed_runs += 1;
        self.projection = None;
        Ok(())
    }
}
