//! Device handle lifecycle against the simulated controller.

use alp4::codes::*;
use alp4::{
    Alp4, AlpDynSynchOutGate, AlpError, AlpShearTable, AlpStatus, DataFormat, DisplayGeometry,
    DmdType, HandleState, LinePut, SequenceId, SequenceTiming, UserStruct,
};
use alp4_test_helpers::sim::DEFAULT_PICTURE_TIME_US;
use alp4_test_helpers::{SimulatedAlp, must, must_err};

fn tiny() -> Alp4<SimulatedAlp> {
    must(Alp4::initialize(SimulatedAlp::tiny(32, 8), None))
}

#[test]
fn initialize_reports_geometry_of_known_dmd() {
    let dmd = must(Alp4::initialize(
        SimulatedAlp::new().with_dmd_type(DmdType::WxgaS450),
        None,
    ));
    assert_eq!(dmd.geometry(), DisplayGeometry::new(1280, 800));
    assert_eq!(dmd.state(), HandleState::Idle);
}

#[test]
fn initialize_by_serial_number() {
    let dmd = must(Alp4::initialize(SimulatedAlp::new().with_serial(4711), Some(4711)));
    assert_eq!(dmd.dmd_type(), DmdType::Xga07A);
}

#[test]
fn missing_device_is_unavailable() {
    let err = must_err(Alp4::initialize(SimulatedAlp::new(), Some(999)));
    assert!(matches!(
        err,
        AlpError::DeviceUnavailable {
            device_number: 999,
            status: AlpStatus::NotOnline
        }
    ));
}

#[test]
fn unknown_dmd_falls_back_to_display_size() {
    let sim = SimulatedAlp::new()
        .with_dmd_type(DmdType::Other(42))
        .with_display(DisplayGeometry::new(912, 1140));
    let dmd = must(Alp4::initialize(sim, None));
    assert_eq!(dmd.dmd_type(), DmdType::Other(42));
    assert_eq!(dmd.geometry(), DisplayGeometry::new(912, 1140));
}

#[test]
fn unknown_dmd_without_display_size_is_unsupported() {
    let mut sim = SimulatedAlp::new().with_dmd_type(DmdType::Other(42));
    let err = must_err(Alp4::initialize(&mut sim, None));
    assert!(matches!(err, AlpError::UnsupportedDmdType { code: 42 }));
    assert!(!sim.is_allocated(), "device must be released again");
}

#[test]
fn sequence_calls_without_allocation_fail() {
    let mut dmd = tiny();
    assert!(matches!(
        must_err(dmd.upload_images(None, &[], 0, 0)),
        AlpError::NoSequence
    ));
    assert!(matches!(
        must_err(dmd.set_timing(None, &SequenceTiming::default())),
        AlpError::NoSequence
    ));
    assert!(matches!(must_err(dmd.run(None, false)), AlpError::NoSequence));
    assert!(matches!(must_err(dmd.free_sequence(None)), AlpError::NoSequence));
    assert!(matches!(
        must_err(dmd.seq_inquire(ALP_PICNUM, None)),
        AlpError::NoSequence
    ));
}

#[test]
fn foreign_sequence_ids_are_rejected_before_the_driver() {
    let mut dmd = tiny();
    must(dmd.allocate_sequence(1, 1));
    dmd.driver_mut().clear_calls();

    let err = must_err(dmd.seq_control(ALP_SEQ_REPEAT, 2, Some(SequenceId(77))));
    assert!(matches!(err, AlpError::UnknownSequence(SequenceId(77))));
    assert!(dmd.driver().calls().is_empty());
}

#[test]
fn last_sequence_is_the_default() {
    let mut dmd = tiny();
    let first = must(dmd.allocate_sequence(1, 1));
    let second = must(dmd.allocate_sequence(3, 8));
    assert_eq!(dmd.last_sequence(), Some(second));
    assert_eq!(must(dmd.seq_inquire(ALP_PICNUM, None)), 3);
    assert_eq!(must(dmd.seq_inquire(ALP_BITPLANES, Some(first))), 1);

    must(dmd.free_sequence(None));
    assert_eq!(dmd.last_sequence(), None);
    assert_eq!(dmd.sequences(), vec![first]);
    assert!(matches!(must_err(dmd.seq_inquire(ALP_PICNUM, None)), AlpError::NoSequence));
}

#[test]
fn default_timing_is_thirty_hertz() {
    let mut dmd = tiny();
    must(dmd.allocate_sequence(2, 1));
    must(dmd.set_timing(None, &SequenceTiming::default()));
    let picture_time = must(dmd.seq_inquire(ALP_PICTURE_TIME, None));
    assert!((picture_time - DEFAULT_PICTURE_TIME_US).abs() <= 1);
    assert_eq!(picture_time, 33_333);
}

#[test]
fn rejected_timing_is_reported() {
    let mut dmd = tiny();
    let seq = must(dmd.allocate_sequence(1, 8));
    let timing = SequenceTiming::with_picture_time(1_000).illumination(5_000);
    let err = must_err(dmd.set_timing(None, &timing));
    assert!(matches!(
        err,
        AlpError::InvalidTiming { sequence, status: AlpStatus::ParmInvalid } if sequence == seq
    ));
}

#[test]
fn single_run_then_wait() {
    let mut dmd = tiny();
    let seq = must(dmd.allocate_sequence(4, 1));
    must(dmd.set_timing(None, &SequenceTiming::with_picture_time(10_000)));
    must(dmd.run(None, false));
    assert_eq!(dmd.state(), HandleState::Running { sequence: seq, looping: false });
    assert_eq!(must(dmd.proj_inquire(ALP_PROJ_STATE)), ALP_PROJ_ACTIVE);

    must(dmd.wait());
    assert_eq!(dmd.state(), HandleState::Idle);
    assert_eq!(dmd.driver().elapsed_us(), 40_000);
    assert_eq!(dmd.driver().completed_runs(), 1);
}

#[test]
fn waiting_on_a_loop_is_refused() {
    let mut dmd = tiny();
    must(dmd.allocate_sequence(1, 1));
    must(dmd.run(None, true));
    dmd.driver_mut().clear_calls();

    let err = must_err(dmd.wait());
    assert!(matches!(err, AlpError::InvalidState(_)));
    assert_eq!(dmd.driver().call_count("AlpProjWait"), 0);

    must(dmd.halt());
    assert_eq!(dmd.state(), HandleState::Idle);
    assert!(dmd.driver().running().is_none());
}

#[test]
fn running_sequence_accepts_control_changes() {
    let mut dmd = tiny();
    let seq = must(dmd.allocate_sequence(2, 1));
    must(dmd.run(Some(seq), true));

    must(dmd.seq_control(ALP_SEQ_REPEAT, 3, None));
    must(dmd.seq_control(ALP_DATA_FORMAT, ALP_DATA_BINARY_TOPDOWN, None));
    assert_eq!(must(dmd.seq_inquire(ALP_SEQ_REPEAT, None)), 3);
    assert_eq!(
        dmd.sequence_info(seq).map(|info| info.data_format),
        Some(DataFormat::BinaryTopDown)
    );
    assert_eq!(dmd.state(), HandleState::Running { sequence: seq, looping: true });
}

#[test]
fn halt_projection_stops_only_the_display() {
    let mut dmd = tiny();
    let seq = must(dmd.allocate_sequence(1, 1));
    must(dmd.run(Some(seq), true));
    must(dmd.halt_projection());
    assert_eq!(dmd.driver().running(), None);
    assert_eq!(dmd.sequences(), vec![seq]);
}

#[test]
fn free_while_running_is_forwarded() {
    let mut dmd = tiny();
    must(dmd.allocate_sequence(1, 1));
    must(dmd.run(None, true));
    let err = must_err(dmd.free());
    assert_eq!(err.status(), Some(AlpStatus::NotIdle));
    assert!(dmd.state() != HandleState::Freed);

    must(dmd.halt());
    must(dmd.free());
    assert_eq!(dmd.state(), HandleState::Freed);
}

#[test]
fn everything_fails_after_free() {
    let mut dmd = tiny();
    let seq = must(dmd.allocate_sequence(1, 1));
    must(dmd.free());
    assert!(dmd.sequences().is_empty());

    let gate = AlpDynSynchOutGate::default();
    let shear = AlpShearTable::default();
    let results = [
        dmd.free(),
        dmd.allocate_sequence(1, 1).map(drop),
        dmd.upload_images(Some(seq), &[0; 256], 0, 0),
        dmd.upload_images_partial(Some(seq), &[0; 32], LinePut::lines(0, 0, 1)),
        dmd.upload_bit_plane(Some(seq), &[0; 256], 0, 0),
        dmd.set_timing(Some(seq), &SequenceTiming::default()),
        dmd.seq_control(ALP_SEQ_REPEAT, 1, Some(seq)),
        dmd.seq_inquire(ALP_PICNUM, Some(seq)).map(drop),
        dmd.dev_inquire(ALP_DEV_STATE).map(drop),
        dmd.dev_control(ALP_TRIGGER_EDGE, ALP_EDGE_FALLING),
        dmd.dev_control_ex(ALP_DEV_DYN_SYNCH_OUT1_GATE, &gate),
        dmd.proj_inquire(ALP_PROJ_STATE).map(drop),
        dmd.proj_inquire_ex(ALP_PROJ_PROGRESS).map(drop),
        dmd.proj_control(ALP_PROJ_MODE, ALP_MASTER),
        dmd.proj_control_ex(ALP_X_SHEAR, UserStruct::ShearTable(&shear)),
        dmd.device_state().map(drop),
        dmd.projection_state().map(drop),
        dmd.available_memory().map(drop),
        dmd.serial_number().map(drop),
        dmd.temperatures().map(drop),
        dmd.run(Some(seq), false),
        dmd.wait(),
        dmd.halt(),
        dmd.halt_projection(),
        dmd.free_sequence(Some(seq)),
    ];
    for result in results {
        assert!(matches!(result, Err(AlpError::DeviceFreed)), "{result:?}");
    }
}

#[test]
fn typed_readers() {
    let mut dmd = must(Alp4::initialize(
        SimulatedAlp::tiny(32, 8)
            .with_serial(2301)
            .with_memory(1_000)
            .with_temperatures(50 * 256, 45 * 256 + 128, 30 * 256),
        None,
    ));
    assert_eq!(must(dmd.serial_number()), 2301);
    must(dmd.allocate_sequence(100, 2));
    assert_eq!(must(dmd.available_memory()), 800);
    assert_eq!(must(dmd.device_state()), alp4::DeviceState::Idle);
    assert_eq!(must(dmd.projection_state()), alp4::ProjectionState::Idle);

    let temps = must(dmd.temperatures());
    assert!((temps.ddc_fpga - 50.0).abs() < f32::EPSILON);
    assert!((temps.apps_fpga - 45.5).abs() < f32::EPSILON);
    assert!((temps.pcb - 30.0).abs() < f32::EPSILON);
}

#[test]
fn allocation_beyond_memory_fails() {
    let mut dmd = must(Alp4::initialize(SimulatedAlp::tiny(32, 8).with_memory(10), None));
    let err = must_err(dmd.allocate_sequence(11, 1));
    assert!(matches!(
        err,
        AlpError::AllocationFailed {
            bit_depth: 1,
            picture_count: 11,
            status: AlpStatus::MemoryFull
        }
    ));
    assert!(dmd.sequences().is_empty());
}

#[test]
fn bad_allocation_arguments_never_reach_the_driver() {
    let mut dmd = tiny();
    dmd.driver_mut().clear_calls();
    assert!(matches!(
        must_err(dmd.allocate_sequence(1, 0)),
        AlpError::InvalidArgument { name: "bit_depth", .. }
    ));
    assert!(matches!(
        must_err(dmd.allocate_sequence(1, 9)),
        AlpError::InvalidArgument { name: "bit_depth", .. }
    ));
    assert!(matches!(
        must_err(dmd.allocate_sequence(0, 1)),
        AlpError::InvalidArgument { name: "picture_count", .. }
    ));
    assert_eq!(dmd.driver().call_count("AlpSeqAlloc"), 0);
}
