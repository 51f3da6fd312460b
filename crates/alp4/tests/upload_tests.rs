//! Image and bit-plane uploads.

use alp4::codes::*;
use alp4::{Alp4, AlpError, AlpStatus, DataFormat, LinePut};
use alp4_test_helpers::{SimulatedAlp, must, must_err, must_some};

const WIDTH: u32 = 24;
const HEIGHT: u32 = 6;
const FRAME: usize = (WIDTH * HEIGHT) as usize;

fn dmd() -> Alp4<SimulatedAlp> {
    must(Alp4::initialize(SimulatedAlp::tiny(WIDTH, HEIGHT), None))
}

fn gradient() -> Vec<u8> {
    (0..FRAME).map(|i| (i * 7 % 256) as u8).collect()
}

#[test]
fn whole_sequence_upload() {
    let mut dmd = dmd();
    let seq = must(dmd.allocate_sequence(3, 8));
    let data: Vec<u8> = (0..3 * FRAME).map(|i| (i % 251) as u8).collect();
    must(dmd.upload_images(None, &data, 0, 0));

    for (index, expected) in data.chunks(FRAME).enumerate() {
        assert_eq!(dmd.driver().frame(seq, index), Some(expected));
    }
}

#[test]
fn buffer_length_must_match_the_pictures() {
    let mut dmd = dmd();
    must(dmd.allocate_sequence(3, 8));
    dmd.driver_mut().clear_calls();

    let err = must_err(dmd.upload_images(None, &vec![0; 2 * FRAME], 0, 0));
    assert!(matches!(
        err,
        AlpError::BufferLength { expected, actual } if expected == 3 * FRAME && actual == 2 * FRAME
    ));
    let err = must_err(dmd.upload_images(None, &vec![0; FRAME + 1], 2, 1));
    assert!(matches!(err, AlpError::BufferLength { .. }));
    assert_eq!(dmd.driver().call_count("AlpSeqPut"), 0);

    must(dmd.upload_images(None, &vec![0; 2 * FRAME], 1, 0));
}

#[test]
fn picture_range_must_fit_the_sequence() {
    let mut dmd = dmd();
    must(dmd.allocate_sequence(2, 8));
    assert!(matches!(
        must_err(dmd.upload_images(None, &vec![0; FRAME], 2, 1)),
        AlpError::InvalidArgument { name: "picture_offset", .. }
    ));
    assert!(matches!(
        must_err(dmd.upload_images(None, &vec![0; 2 * FRAME], 1, 2)),
        AlpError::InvalidArgument { name: "picture_count", .. }
    ));
}

#[test]
fn binary_format_shrinks_the_frame() {
    let mut dmd = dmd();
    let seq = must(dmd.allocate_sequence(2, 1));
    must(dmd.seq_control(ALP_DATA_FORMAT, ALP_DATA_BINARY_TOPDOWN, None));
    assert_eq!(
        dmd.sequence_info(seq).map(|info| info.data_format),
        Some(DataFormat::BinaryTopDown)
    );

    let err = must_err(dmd.upload_images(None, &vec![0; 2 * FRAME], 0, 0));
    assert!(matches!(err, AlpError::BufferLength { expected, .. } if expected == 2 * FRAME / 8));
    must(dmd.upload_images(None, &vec![0xF0; 2 * FRAME / 8], 0, 0));
}

#[test]
fn upload_into_displayed_locked_sequence_fails() {
    let mut dmd = dmd();
    let seq = must(dmd.allocate_sequence(1, 8));
    must(dmd.upload_images(None, &gradient(), 0, 0));
    must(dmd.run(None, true));

    let err = must_err(dmd.upload_images(None, &gradient(), 0, 0));
    assert!(matches!(
        err,
        AlpError::TransferFailed { sequence, status: AlpStatus::SeqInUse } if sequence == seq
    ));
    assert!(err.status().is_some());
}

#[test]
fn bit_plane_upload_matches_manual_extraction() {
    let mut dmd = dmd();
    let seq = must(dmd.allocate_sequence(8, 1));
    must(dmd.seq_control(ALP_DATA_FORMAT, ALP_DATA_BINARY_TOPDOWN, Some(seq)));

    let pixels = gradient();
    for bit in 0..8u8 {
        must(dmd.upload_bit_plane(Some(seq), &pixels, bit, u32::from(bit)));
    }
    for bit in 0..8u8 {
        let frame = must_some(dmd.driver().frame(seq, usize::from(bit)), "plane uploaded");
        let mut expected = vec![0u8; FRAME / 8];
        for (i, px) in pixels.iter().enumerate() {
            expected[i / 8] |= ((px >> bit) & 1) << (7 - i % 8);
        }
        assert_eq!(frame, expected.as_slice(), "bit {bit}");
    }
}

#[test]
fn bit_plane_needs_binary_format() {
    let mut dmd = dmd();
    must(dmd.allocate_sequence(1, 1));
    let err = must_err(dmd.upload_bit_plane(None, &gradient(), 0, 0));
    assert!(matches!(err, AlpError::InvalidState(_)));
}

#[test]
fn bit_plane_rejects_bad_input() {
    let mut dmd = dmd();
    must(dmd.allocate_sequence(1, 1));
    must(dmd.seq_control(ALP_DATA_FORMAT, ALP_DATA_BINARY_BOTTOMUP, None));
    assert!(matches!(
        must_err(dmd.upload_bit_plane(None, &gradient(), 8, 0)),
        AlpError::InvalidArgument { name: "bit", .. }
    ));
    assert!(matches!(
        must_err(dmd.upload_bit_plane(None, &[0; 10], 0, 0)),
        AlpError::BufferLength { actual: 10, .. }
    ));
}

#[test]
fn partial_upload_writes_the_row_band() {
    let mut dmd = dmd();
    let seq = must(dmd.allocate_sequence(1, 8));
    must(dmd.upload_images(None, &vec![0; FRAME], 0, 0));

    let rows = vec![0xAA; 2 * WIDTH as usize];
    must(dmd.upload_images_partial(None, &rows, LinePut::lines(0, 3, 2)));

    let frame = must_some(dmd.driver().frame(seq, 0), "frame uploaded");
    let row = WIDTH as usize;
    assert!(frame[..3 * row].iter().all(|b| *b == 0));
    assert!(frame[3 * row..5 * row].iter().all(|b| *b == 0xAA));
    assert!(frame[5 * row..].iter().all(|b| *b == 0));
}

#[test]
fn partial_upload_to_the_last_row() {
    let mut dmd = dmd();
    must(dmd.allocate_sequence(2, 8));
    let section = LinePut {
        picture_offset: 0,
        picture_count: 0,
        line_offset: 4,
        line_count: 0,
    };
    let err = must_err(dmd.upload_images_partial(None, &[0; 4], section));
    assert!(matches!(
        err,
        AlpError::BufferLength { expected, .. } if expected == 2 * 2 * WIDTH as usize
    ));
    must(dmd.upload_images_partial(None, &vec![1; 2 * 2 * WIDTH as usize], section));
}
