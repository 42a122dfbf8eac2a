//! Color plane extraction and distance helpers.

/// Extract the RGB planes of an RGBA frame into `rgb`, dropping alpha.
///
/// The output buffer is cleared first so callers can reuse its allocation
/// across frames. `rgba` must hold whole 4-byte pixels.
pub fn extract_rgb(rgba: &[u8], rgb: &mut Vec<u8>) {
    debug_assert_eq!(rgba.len() % 4, 0);
    rgb.clear();
    rgb.reserve(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }
}

/// Squared Euclidean distance between two RGB colors.
///
/// Used to pick the palette entry closest to a requested transparent color.
#[inline]
pub fn distance_squared(r1: u8, g1: u8, b1: u8, r2: u8, g2: u8, b2: u8) -> u32 {
    let dr = r1 as i32 - r2 as i32;
    let dg = g1 as i32 - g2 as i32;
    let db = b1 as i32 - b2 as i32;
    (dr * dr + dg * dg + db * db) as u32
}
