//! Behavior of the simulated controller through the driver trait.

use alp4_api::codes::*;
use alp4_api::{
    AlpDriver, AlpDynSynchOutGate, AlpStatus, DeviceId, FlutWrite, SequenceId, TimingParams,
    UserStruct,
};
use alp4_test_helpers::{SimulatedAlp, must, must_err, must_some};

fn allocated() -> (SimulatedAlp, DeviceId) {
    let mut sim = SimulatedAlp::new();
    let dev = must(sim.dev_alloc(ALP_DEFAULT, ALP_DEFAULT));
    (sim, dev)
}

#[test]
fn test_xga_board_reports_its_geometry() {
    let (mut sim, dev) = allocated();
    assert_eq!(sim.dev_inquire(dev, ALP_DEV_DMDTYPE), Ok(ALP_DMDTYPE_XGA_07A));
    assert_eq!(sim.dev_inquire(dev, ALP_DEV_DISPLAY_WIDTH), Ok(1024));
    assert_eq!(sim.dev_inquire(dev, ALP_DEV_DISPLAY_HEIGHT), Ok(768));
}

#[test]
fn test_unknown_device_number_is_offline() {
    let mut sim = SimulatedAlp::new().with_serial(777);
    assert_eq!(sim.dev_alloc(778, ALP_DEFAULT), Err(AlpStatus::NotOnline));
    assert_eq!(sim.dev_alloc(777, ALP_DEFAULT), Ok(DeviceId(1)));
}

#[test]
fn test_calls_on_a_stale_device_are_refused() {
    let (mut sim, dev) = allocated();
    must(sim.dev_free(dev));
    assert_eq!(sim.dev_halt(dev), Err(AlpStatus::NotAvailable));
    assert!(!sim.is_allocated());
}

#[test]
fn test_free_while_projecting_is_not_idle() {
    let (mut sim, dev) = allocated();
    let seq = must(sim.seq_alloc(dev, 1, 1));
    must(sim.proj_start_cont(dev, seq));
    assert_eq!(sim.dev_free(dev), Err(AlpStatus::NotIdle));
    assert_eq!(sim.seq_free(dev, seq), Err(AlpStatus::NotIdle));
    must(sim.dev_halt(dev));
    must(sim.seq_free(dev, seq));
    must(sim.dev_free(dev));
}

#[test]
fn test_memory_accounting() {
    let (mut sim, dev) = allocated();
    let before = must(sim.dev_inquire(dev, ALP_AVAIL_MEMORY));
    let seq = must(sim.seq_alloc(dev, 4, 10));
    assert_eq!(sim.dev_inquire(dev, ALP_AVAIL_MEMORY), Ok(before - 40));
    must(sim.seq_free(dev, seq));
    assert_eq!(sim.dev_inquire(dev, ALP_AVAIL_MEMORY), Ok(before));
}

#[test]
fn test_illumination_only_derives_picture_time() {
    let (mut sim, dev) = allocated();
    let seq = must(sim.seq_alloc(dev, 1, 1));
    let timing = TimingParams {
        illuminate_time: 5000,
        ..TimingParams::default()
    };
    must(sim.seq_timing(dev, seq, timing));
    assert_eq!(sim.seq_inquire(dev, seq, ALP_PICTURE_TIME), Ok(5000));
    assert_eq!(sim.seq_inquire(dev, seq, ALP_OFF_TIME), Ok(0));
}

#[test]
fn test_projection_progress() {
    let (mut sim, dev) = allocated();
    let seq = must(sim.seq_alloc(dev, 1, 5));
    let idle = must(sim.proj_inquire_ex(dev, ALP_PROJ_PROGRESS));
    assert!(idle.has_flag(ALP_FLAG_QUEUE_IDLE));

    must(sim.proj_start_cont(dev, seq));
    let running = must(sim.proj_inquire_ex(dev, ALP_PROJ_PROGRESS));
    assert_eq!(running.sequence_id, 1);
    assert_eq!(running.frames_per_sub_sequence, 5);
    assert!(running.has_flag(ALP_FLAG_SEQUENCE_INDEFINITE));
    assert_eq!(sim.proj_inquire(dev, ALP_PROJ_STATE), Ok(ALP_PROJ_ACTIVE));
    assert_eq!(must_some(sim.running(), "projection"), (SequenceId(1), true));
}

#[test]
fn test_user_structs_are_type_checked() {
    let (mut sim, dev) = allocated();
    let gate = must_some(
        AlpDynSynchOutGate::from_pattern(&[true, false], true),
        "gate",
    );
    must(sim.dev_control_ex(dev, ALP_DEV_DYN_SYNCH_OUT1_GATE, UserStruct::SynchOutGate(&gate)));
    let err = must_err(sim.proj_control_ex(dev, ALP_X_SHEAR, UserStruct::SynchOutGate(&gate)));
    assert_eq!(err, AlpStatus::ParmInvalid);

    let flut = must_some(FlutWrite::from_frames(0, &[0, 2, 1]), "flut");
    must(sim.proj_control_ex(dev, ALP_FLUT_WRITE_9BIT, UserStruct::FlutWrite(&flut)));
    assert_eq!(
        sim.user_structs(),
        &[
            (ALP_DEV_DYN_SYNCH_OUT1_GATE, "tAlpDynSynchOutGate"),
            (ALP_FLUT_WRITE_9BIT, "tFlutWrite"),
        ]
    );
}
