//! Animated GIF89a encoder.
//!
//! Frames are accepted one at a time as raw RGBA bytes. Each frame is
//! quantized to a 256-entry palette with [`quantize::NeuQuant`], the pixels
//! are mapped to palette indices, and the indices are LZW-compressed into the
//! GIF89a bitstream together with the structural blocks (logical screen
//! descriptor, color tables, NETSCAPE looping extension, per-frame graphic
//! control and image descriptor).

pub mod quantize;

mod lzw;

use std::io::Write;

use crate::buffer::ByteBuffer;
use crate::color;
use crate::error::{Error, Result};

use self::lzw::LzwEncoder;
use self::quantize::NeuQuant;

// GIF block introducers and labels.
const EXTENSION_INTRODUCER: u8 = 0x21;
const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
const APPLICATION_EXTENSION_LABEL: u8 = 0xFF;
const IMAGE_SEPARATOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

/// Color table size field in packed bytes: 2^(7+1) = 256 entries, always
/// written as a full table for bit-exact output.
const PALETTE_SIZE_FIELD: u8 = 7;

/// Bits per palette index handed to the LZW compressor.
const COLOR_DEPTH: u8 = 8;

/// Animation loop policy, written as a NETSCAPE 2.0 application extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop forever (loop count 0 on the wire).
    Infinite,
    /// Loop a fixed number of times.
    Finite(u16),
}

impl Repeat {
    fn loop_count(self) -> u16 {
        match self {
            Repeat::Infinite => 0,
            Repeat::Finite(count) => count,
        }
    }
}

/// Options for one-shot animation encoding.
#[derive(Debug, Clone)]
pub struct GifOptions {
    /// Delay between frames in milliseconds (stored as hundredths of a
    /// second, rounded).
    pub delay_ms: u32,
    /// Loop policy; `None` plays the animation once and writes no NETSCAPE
    /// block.
    pub repeat: Option<Repeat>,
    /// Quantizer sampling factor (1-30). 1 scans every pixel; larger values
    /// are faster and coarser.
    pub quality: u32,
    /// Disposal method override (3-bit GIF disposal code).
    pub dispose: Option<u8>,
    /// Color to render transparent, as `0xRRGGBB`.
    pub transparent: Option<u32>,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            repeat: None,
            quality: 10,
            dispose: None,
            transparent: None,
        }
    }
}

impl GifOptions {
    /// Preset for a standard looping animation (infinite repeat, 100 ms
    /// delay).
    pub fn animation() -> Self {
        Self {
            repeat: Some(Repeat::Infinite),
            ..Self::default()
        }
    }
}

/// Encode RGBA frames as an animated GIF with default options.
///
/// Each frame must be `4 * width * height` bytes of R,G,B,A pixels in
/// row-major order. Returns the complete GIF89a byte stream.
pub fn encode(frames: &[&[u8]], width: u16, height: u16) -> Result<Vec<u8>> {
    encode_with_options(frames, width, height, &GifOptions::default())
}

/// Encode RGBA frames as an animated GIF with custom options.
pub fn encode_with_options(
    frames: &[&[u8]],
    width: u16,
    height: u16,
    options: &GifOptions,
) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new(), width, height)?;
    encoder.set_delay(options.delay_ms);
    encoder.set_quality(options.quality);
    encoder.set_transparent(options.transparent);
    if let Some(repeat) = options.repeat {
        encoder.set_repeat(repeat);
    }
    if let Some(code) = options.dispose {
        encoder.set_dispose(code);
    }
    for frame in frames {
        encoder.add_frame(frame)?;
    }
    encoder.finish()
}

/// Streaming animated GIF encoder over an arbitrary byte sink.
///
/// Every [`add_frame`] call quantizes, compresses, and frames one RGBA image
/// and flushes the staged bytes to the sink; the first call also starts the
/// stream by writing the `"GIF89a"` header and screen structures. [`finish`]
/// writes the trailer and returns the sink. Consuming `self` in [`finish`]
/// makes use-after-finish unrepresentable.
///
/// A single encoder is single-threaded by contract: all work runs to
/// completion inside the caller's `add_frame` invocation.
///
/// [`add_frame`]: Self::add_frame
/// [`finish`]: Self::finish
pub struct Encoder<W: Write> {
    sink: W,
    width: u16,
    height: u16,
    /// Frame delay in hundredths of a second.
    delay: u16,
    dispose: Option<u8>,
    repeat: Option<Repeat>,
    transparent: Option<u32>,
    transparent_index: u8,
    sample: u32,
    first_frame: bool,
    out: ByteBuffer,
    rgb: Vec<u8>,
    indexed: Vec<u8>,
    palette: [u8; 768],
    used_entry: [bool; 256],
    lzw: LzwEncoder,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder for a `width` x `height` canvas. Nothing is written
    /// until the first frame arrives.
    ///
    /// Dimensions must be non-zero; the `u16` parameters bound them at
    /// 65535 as the format requires.
    pub fn new(sink: W, width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            sink,
            width,
            height,
            delay: 0,
            dispose: None,
            repeat: None,
            transparent: None,
            transparent_index: 0,
            sample: 10,
            first_frame: true,
            out: ByteBuffer::new(),
            rgb: Vec::new(),
            indexed: Vec::new(),
            palette: [0; 768],
            used_entry: [false; 256],
            lzw: LzwEncoder::new(),
        })
    }

    /// Set the delay before the next frame, in milliseconds (rounded to
    /// hundredths of a second).
    pub fn set_delay(&mut self, ms: u32) {
        self.delay = ((u64::from(ms) + 5) / 10).min(u64::from(u16::MAX)) as u16;
    }

    /// Set the delay from a frame rate in frames per second. Overwrites any
    /// previous [`set_delay`](Self::set_delay).
    pub fn set_framerate(&mut self, fps: f64) {
        if fps > 0.0 {
            self.delay = (100.0 / fps).round() as u16;
        }
    }

    /// Override the per-frame disposal method (3-bit GIF disposal code;
    /// higher bits are masked). Without an override, frames with a
    /// transparent color use restore-to-background, all others unspecified.
    pub fn set_dispose(&mut self, code: u8) {
        self.dispose = Some(code & 7);
    }

    /// Set the loop policy. Takes effect only before the first frame is
    /// added; without a call, the animation plays once and no NETSCAPE block
    /// is written.
    pub fn set_repeat(&mut self, repeat: Repeat) {
        self.repeat = Some(repeat);
    }

    /// Choose a color to render transparent (`0xRRGGBB`), or `None` to
    /// disable transparency for subsequent frames.
    ///
    /// The color itself need not appear in the frame: the closest used
    /// palette entry becomes the transparent index, and every input pixel
    /// with alpha 0 is rewritten to it.
    pub fn set_transparent(&mut self, color: Option<u32>) {
        self.transparent = color.map(|c| c & 0x00FF_FFFF);
    }

    /// Set quantization quality as the NeuQuant sampling factor, clamped to
    /// `1..=30`. 1 scans every pixel of every frame.
    pub fn set_quality(&mut self, quality: u32) {
        self.sample = quality.clamp(1, 30);
    }

    /// Quantize, compress, and write one RGBA frame.
    ///
    /// `rgba` must be exactly `4 * width * height` bytes. The first frame
    /// starts the stream: it emits the `"GIF89a"` header, the logical screen
    /// descriptor, the global color table, and the NETSCAPE extension if a
    /// repeat policy is set. Later frames carry their palette as a local
    /// color table instead.
    pub fn add_frame(&mut self, rgba: &[u8]) -> Result<()> {
        let expected = 4 * self.width as usize * self.height as usize;
        if rgba.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: rgba.len(),
            });
        }

        self.analyze(rgba);

        if self.first_frame {
            self.out.write_bytes(b"GIF89a");
            self.write_logical_screen_descriptor();
            self.write_color_table();
            if let Some(repeat) = self.repeat {
                self.write_netscape_ext(repeat);
            }
        }
        self.write_graphic_control_ext();
        self.write_image_descriptor();
        if !self.first_frame {
            self.write_color_table();
        }
        self.lzw.encode(&self.indexed, COLOR_DEPTH, &mut self.out);

        self.first_frame = false;
        self.flush()
    }

    /// Write the trailer, flush, and return the sink.
    ///
    /// If no frame was ever added, the stream was never started and the sink
    /// receives a single zero-byte write instead of a trailer.
    pub fn finish(mut self) -> Result<W> {
        if !self.first_frame {
            self.out.write_byte(TRAILER);
        }
        self.sink.write_all(self.out.as_slice())?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Train the quantizer on this frame, map every pixel to a palette
    /// index, and resolve the transparent index.
    fn analyze(&mut self, rgba: &[u8]) {
        color::extract_rgb(rgba, &mut self.rgb);

        let quant = NeuQuant::new(&self.rgb, self.sample);
        self.palette = quant.color_map();

        let pixel_count = self.rgb.len() / 3;
        self.indexed.clear();
        self.indexed.reserve(pixel_count);
        self.used_entry = [false; 256];
        for pixel in self.rgb.chunks_exact(3) {
            let index = quant.lookup(pixel[0], pixel[1], pixel[2]);
            self.used_entry[index as usize] = true;
            self.indexed.push(index);
        }

        if let Some(transparent) = self.transparent {
            self.transparent_index = self.find_closest(transparent);
            for (k, pixel) in rgba.chunks_exact(4).enumerate() {
                if pixel[3] == 0 {
                    self.indexed[k] = self.transparent_index;
                }
            }
        }
    }

    /// Index of the used palette entry closest to `color` by squared RGB
    /// distance.
    fn find_closest(&self, color: u32) -> u8 {
        let r = (color >> 16) as u8;
        let g = (color >> 8) as u8;
        let b = color as u8;

        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (index, used) in self.used_entry.iter().enumerate() {
            if !used {
                continue;
            }
            let dist = color::distance_squared(
                r,
                g,
                b,
                self.palette[3 * index],
                self.palette[3 * index + 1],
                self.palette[3 * index + 2],
            );
            if dist < best_dist {
                best_dist = dist;
                best = index;
            }
        }
        best as u8
    }

    fn write_logical_screen_descriptor(&mut self) {
        self.out.write_u16_le(self.width);
        self.out.write_u16_le(self.height);
        // GCT flag, color resolution 7, sort flag 0, 256-entry table.
        self.out.write_byte(0x80 | 0x70 | PALETTE_SIZE_FIELD);
        self.out.write_byte(0); // background color index
        self.out.write_byte(0); // pixel aspect ratio
    }

    /// Write the palette as a full 256-entry table (768 bytes, zero-padded
    /// by construction).
    fn write_color_table(&mut self) {
        self.out.write_bytes(&self.palette);
    }

    fn write_netscape_ext(&mut self, repeat: Repeat) {
        self.out.write_byte(EXTENSION_INTRODUCER);
        self.out.write_byte(APPLICATION_EXTENSION_LABEL);
        self.out.write_byte(11);
        self.out.write_bytes(b"NETSCAPE2.0");
        self.out.write_byte(3); // sub-block length
        self.out.write_byte(1); // loop sub-block id
        self.out.write_u16_le(repeat.loop_count());
        self.out.write_byte(0); // block terminator
    }

    fn write_graphic_control_ext(&mut self) {
        self.out.write_byte(EXTENSION_INTRODUCER);
        self.out.write_byte(GRAPHIC_CONTROL_LABEL);
        self.out.write_byte(4); // block size

        let (transparency_flag, default_dispose) = if self.transparent.is_some() {
            (1u8, 2u8) // restore to background so holes show through
        } else {
            (0, 0)
        };
        let dispose = self.dispose.unwrap_or(default_dispose);
        self.out.write_byte((dispose << 2) | transparency_flag);

        self.out.write_u16_le(self.delay);
        let transparent_index = if self.transparent.is_some() {
            self.transparent_index
        } else {
            0
        };
        self.out.write_byte(transparent_index);
        self.out.write_byte(0); // block terminator
    }

    fn write_image_descriptor(&mut self) {
        self.out.write_byte(IMAGE_SEPARATOR);
        self.out.write_u16_le(0); // left
        self.out.write_u16_le(0); // top; frames always cover the canvas
        self.out.write_u16_le(self.width);
        self.out.write_u16_le(self.height);
        if self.first_frame {
            self.out.write_byte(0); // use the global color table
        } else {
            self.out.write_byte(0x80 | PALETTE_SIZE_FIELD); // local table follows
        }
    }

    /// Hand the staged bytes to the sink. The only point where the encoder
    /// yields control.
    fn flush(&mut self) -> Result<()> {
        self.sink.write_all(self.out.as_slice())?;
        self.out.reset();
        Ok(())
    }
}
