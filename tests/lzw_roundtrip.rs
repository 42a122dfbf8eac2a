//! LZW round-trip tests against the `weezl` reference decoder.
//!
//! Verifies that decoding the image data section of an encoded frame
//! reproduces exactly the palette indices the quantizer assigned.

mod support;

use gifkit::color;
use gifkit::gif::quantize::NeuQuant;
use gifkit::gif::Encoder;
use support::synthetic;
use weezl::{decode::Decoder, BitOrder};

/// Extract and unwrap the image data section of a single-frame GIF with no
/// NETSCAPE block: header (6) + LSD (7) + GCT (768) + GCE (8) + image
/// descriptor (10).
fn image_data(bytes: &[u8]) -> (u8, Vec<u8>) {
    let mut pos = 6 + 7 + 768 + 8 + 10;
    let min_code_size = bytes[pos];
    pos += 1;
    let mut raw = Vec::new();
    loop {
        let len = bytes[pos] as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        raw.extend_from_slice(&bytes[pos..pos + len]);
        pos += len;
    }
    (min_code_size, raw)
}

fn encode_single(frame: &[u8], width: u16, height: u16, quality: u32) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::new(), width, height).unwrap();
    encoder.set_quality(quality);
    encoder.add_frame(frame).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_image_data_matches_independent_quantizer_mapping() {
    let frame = synthetic::gradient_rgba(16, 16);
    let bytes = encode_single(&frame, 16, 16, 10);

    let (min_code_size, raw) = image_data(&bytes);
    assert_eq!(min_code_size, 8);
    let decoded = Decoder::new(BitOrder::Lsb, min_code_size)
        .decode(&raw)
        .expect("weezl rejected stream");

    // Quantizer training is deterministic, so running it again over the same
    // RGB planes must reproduce the encoder's pixel mapping exactly.
    let mut rgb = Vec::new();
    color::extract_rgb(&frame, &mut rgb);
    let quant = NeuQuant::new(&rgb, 10);
    let expected: Vec<u8> = rgb
        .chunks_exact(3)
        .map(|p| quant.lookup(p[0], p[1], p[2]))
        .collect();

    assert_eq!(decoded, expected);
}

#[test]
fn test_noisy_frame_roundtrips() {
    let frame = synthetic::random_rgba(20, 15, 99);
    let bytes = encode_single(&frame, 20, 15, 1);

    let (min_code_size, raw) = image_data(&bytes);
    let decoded = Decoder::new(BitOrder::Lsb, min_code_size).decode(&raw).unwrap();
    assert_eq!(decoded.len(), 20 * 15);
}

#[test]
fn test_solid_frame_decodes_to_one_index() {
    let frame = synthetic::solid_rgba(32, 32, 200, 200, 0, 255);
    let bytes = encode_single(&frame, 32, 32, 10);

    let (min_code_size, raw) = image_data(&bytes);
    let decoded = Decoder::new(BitOrder::Lsb, min_code_size).decode(&raw).unwrap();
    assert_eq!(decoded.len(), 1024);
    let first = decoded[0];
    assert!(decoded.iter().all(|&i| i == first));
}

#[test]
fn test_checkerboard_uses_two_indices() {
    let frame = synthetic::checkerboard_rgba(16, 16, [0, 0, 0], [255, 255, 255]);
    let bytes = encode_single(&frame, 16, 16, 1);

    let (min_code_size, raw) = image_data(&bytes);
    let decoded = Decoder::new(BitOrder::Lsb, min_code_size).decode(&raw).unwrap();

    let mut seen = std::collections::BTreeSet::new();
    for &index in &decoded {
        seen.insert(index);
    }
    assert_eq!(seen.len(), 2, "checkerboard should map to two indices");
    assert_ne!(decoded[0], decoded[1]);
    assert_eq!(decoded[0], decoded[2]);
}
