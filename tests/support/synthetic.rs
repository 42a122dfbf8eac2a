//! Synthetic test frame generation.
//!
//! Generates deterministic RGBA frames for controlled testing of the GIF
//! encoder. All functions produce reproducible output suitable for
//! regression testing.

#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generate a solid color RGBA frame.
pub fn solid_rgba(width: u16, height: u16, r: u8, g: u8, b: u8, a: u8) -> Vec<u8> {
    let pixel_count = width as usize * height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    for _ in 0..pixel_count {
        pixels.extend_from_slice(&[r, g, b, a]);
    }
    pixels
}

/// Generate an opaque RGB gradient frame (red horizontal, green vertical,
/// blue diagonal).
pub fn gradient_rgba(width: u16, height: u16) -> Vec<u8> {
    let (w, h) = (width as u32, height as u32);
    let mut pixels = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let r = ((x * 255) / w.max(1)) as u8;
            let g = ((y * 255) / h.max(1)) as u8;
            let b = (((x + y) * 127) / (w + h).max(1)) as u8;
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    pixels
}

/// Generate a two-color checkerboard frame.
pub fn checkerboard_rgba(width: u16, height: u16, a: [u8; 3], b: [u8; 3]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let c = if (x + y) % 2 == 0 { a } else { b };
            pixels.extend_from_slice(&[c[0], c[1], c[2], 255]);
        }
    }
    pixels
}

/// Generate a frame where every odd pixel is fully transparent.
pub fn alpha_holes_rgba(width: u16, height: u16) -> Vec<u8> {
    let pixel_count = width as usize * height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    for i in 0..pixel_count {
        let alpha = if i % 2 == 0 { 255 } else { 0 };
        pixels.extend_from_slice(&[(i * 37 % 256) as u8, (i * 11 % 256) as u8, 90, alpha]);
    }
    pixels
}

/// Generate a seeded random RGBA frame with full alpha.
pub fn random_rgba(width: u16, height: u16, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixel_count = width as usize * height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    for _ in 0..pixel_count {
        pixels.extend_from_slice(&[rng.gen(), rng.gen(), rng.gen(), 255]);
    }
    pixels
}
