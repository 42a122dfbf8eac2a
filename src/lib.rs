//! # gifkit
//!
//! An animated GIF89a encoder with no runtime dependencies.
//!
//! This library converts sequences of truecolor RGBA frames into compliant
//! GIF89a byte streams. Each frame is color-quantized to a 256-entry palette
//! with the NeuQuant neural-network quantizer and compressed with the
//! GIF-flavored LZW algorithm.
//!
//! ## Features
//!
//! - **Zero runtime dependencies by default**
//! - **NeuQuant quantization** producing a per-frame 256-color palette
//! - **GIF-flavored LZW** with adaptive code widths and sub-block framing
//! - NETSCAPE 2.0 looping, per-frame delay, disposal, and transparency
//!
//! ## Example
//!
//! ```rust
//! use gifkit::gif::{Encoder, Repeat};
//!
//! // Two 2x1 RGBA frames.
//! let frame_a = [255, 0, 0, 255, 0, 255, 0, 255];
//! let frame_b = [0, 0, 255, 255, 255, 255, 255, 255];
//!
//! let mut encoder = Encoder::new(Vec::new(), 2, 1).unwrap();
//! encoder.set_repeat(Repeat::Infinite);
//! encoder.set_delay(100);
//! encoder.add_frame(&frame_a).unwrap();
//! encoder.add_frame(&frame_b).unwrap();
//! let bytes = encoder.finish().unwrap();
//! assert!(bytes.starts_with(b"GIF89a"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod color;
pub mod error;
pub mod gif;

pub use error::{Error, Result};
pub use gif::{Encoder, GifOptions, Repeat};
