//! Bit-plane extraction against hand-computed planes and a bitwise reference.

use alp4_bitplane::{BitPlaneError, extract, extract_all, extract_rows, pack, packed_len, unpack};
use insta::assert_snapshot;
use proptest::prelude::*;

fn manual_plane(pixels: &[u8], bit: u8) -> Vec<u8> {
    let mut out = vec![0u8; pixels.len().div_ceil(8)];
    for (ind, &px) in pixels.iter().enumerate() {
        let value = (px >> bit) & 1;
        out[ind / 8] |= value << (7 - ind % 8);
    }
    out
}

fn gradient_8x8() -> Vec<u8> {
    (0u8..64).map(|i| i * 4).collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn known_8x8_image_matches_manual_extraction() -> Result<(), BitPlaneError> {
    let image = gradient_8x8();
    for bit in 0..8 {
        assert_eq!(extract(&image, bit)?, manual_plane(&image, bit), "bit {bit}");
    }
    Ok(())
}

#[test]
fn known_8x8_image_planes() -> Result<(), BitPlaneError> {
    let image = gradient_8x8();
    // i * 4 never sets the two low bits.
    assert_eq!(extract(&image, 0)?, vec![0; 8]);
    assert_eq!(extract(&image, 1)?, vec![0; 8]);
    assert_snapshot!(hex(&extract(&image, 2)?), @"55 55 55 55 55 55 55 55");
    assert_snapshot!(hex(&extract(&image, 7)?), @"00 00 00 00 ff ff ff ff");
    Ok(())
}

#[test]
fn checkerboard_alternates_rows() -> Result<(), BitPlaneError> {
    let image: Vec<u8> = (0..64)
        .map(|i| if (i / 8 + i % 8) % 2 == 0 { 0xFF } else { 0x00 })
        .collect();
    assert_snapshot!(hex(&extract_rows(&image, 8, 5)?), @"aa 55 aa 55 aa 55 aa 55");
    Ok(())
}

#[test]
fn extract_all_orders_planes_from_lsb() -> Result<(), BitPlaneError> {
    let image = gradient_8x8();
    let planes = extract_all(&image);
    assert_eq!(planes.len(), 8);
    for (bit, plane) in (0u8..).zip(&planes) {
        assert_eq!(plane, &extract(&image, bit)?);
    }
    Ok(())
}

proptest! {
    #[test]
    fn extraction_matches_reference(
        pixels in prop::collection::vec(any::<u8>(), 0..512),
        bit in 0u8..8,
    ) {
        let plane = extract(&pixels, bit);
        prop_assert_eq!(plane, Ok(manual_plane(&pixels, bit)));
    }

    #[test]
    fn unpack_recovers_the_bit(
        pixels in prop::collection::vec(any::<u8>(), 0..512),
        bit in 0u8..8,
    ) {
        let plane = extract(&pixels, bit).unwrap_or_default();
        prop_assert_eq!(plane.len(), packed_len(pixels.len()));
        let bits = unpack(&plane, pixels.len());
        let expected: Vec<u8> = pixels.iter().map(|px| (px >> bit) & 1).collect();
        prop_assert_eq!(bits, Ok(expected));
    }

    #[test]
    fn planes_reassemble_the_image(pixels in prop::collection::vec(any::<u8>(), 1..256)) {
        let planes = extract_all(&pixels);
        let mut rebuilt = vec![0u8; pixels.len()];
        for (bit, plane) in (0u8..).zip(&planes) {
            let bits = unpack(plane, pixels.len()).unwrap_or_default();
            for (px, b) in rebuilt.iter_mut().zip(bits) {
                *px |= b << bit;
            }
        }
        prop_assert_eq!(rebuilt, pixels);
    }

    #[test]
    fn pack_agrees_with_extract(values in prop::collection::vec(0u8..2, 0..300)) {
        prop_assert_eq!(Ok(pack(&values)), extract(&values, 0));
    }
}
