//! GIF-flavored LZW compression.
//!
//! Open-addressed double hashing on the prefix-code / next-character pair,
//! with an XOR first probe and a relative-prime secondary probe. Codes grow
//! from 9 to 12 bits; when the dictionary fills, a CLEAR code resets it
//! mid-stream. Output bytes are staged into 254-byte packets and written as
//! GIF data sub-blocks.

use crate::buffer::ByteBuffer;

/// Maximum code width in bits.
const BITS: i32 = 12;

/// Dictionary slots (prime, about 80% occupancy at 4096 codes).
const HASH_SIZE: usize = 5003;

const MASKS: [i32; 17] = [
    0x0000, 0x0001, 0x0003, 0x0007, 0x000F, 0x001F, 0x003F, 0x007F, 0x00FF, 0x01FF, 0x03FF, 0x07FF,
    0x0FFF, 0x1FFF, 0x3FFF, 0x7FFF, 0xFFFF,
];

/// GIF LZW compressor.
///
/// The dictionary tables are allocated once and reset per
/// [`encode`](Self::encode) call, so one instance can compress every frame
/// of an animation.
pub(crate) struct LzwEncoder {
    /// `-1` marks an empty slot; otherwise the composite key
    /// `(next_char << 12) + prefix_code`.
    hashes: Vec<i32>,
    codes: Vec<i32>,
    packet: [u8; 256],
    packet_len: usize,
    cur_acc: i32,
    cur_bits: i32,
    init_bits: i32,
    n_bits: i32,
    max_code: i32,
    clear_code: i32,
    eof_code: i32,
    free_ent: i32,
    clear_flag: bool,
}

fn max_code_for(n_bits: i32) -> i32 {
    (1 << n_bits) - 1
}

impl LzwEncoder {
    pub(crate) fn new() -> Self {
        Self {
            hashes: vec![-1; HASH_SIZE],
            codes: vec![0; HASH_SIZE],
            packet: [0; 256],
            packet_len: 0,
            cur_acc: 0,
            cur_bits: 0,
            init_bits: 0,
            n_bits: 0,
            max_code: 0,
            clear_code: 0,
            eof_code: 0,
            free_ent: 0,
            clear_flag: false,
        }
    }

    /// Compress `pixels` into `out` as a GIF image data section: one initial
    /// code size byte, the compressed sub-blocks, and the zero terminator.
    pub(crate) fn encode(&mut self, pixels: &[u8], color_depth: u8, out: &mut ByteBuffer) {
        let init_code_size = color_depth.max(2);
        out.write_byte(init_code_size);
        self.compress(i32::from(init_code_size) + 1, pixels, out);
        out.write_byte(0);
    }

    fn compress(&mut self, init_bits: i32, pixels: &[u8], out: &mut ByteBuffer) {
        self.init_bits = init_bits;
        self.clear_flag = false;
        self.n_bits = init_bits;
        self.max_code = max_code_for(self.n_bits);
        self.clear_code = 1 << (init_bits - 1);
        self.eof_code = self.clear_code + 1;
        self.free_ent = self.clear_code + 2;
        self.cur_acc = 0;
        self.cur_bits = 0;
        self.packet_len = 0;

        // First XOR probe spreads the 8-bit character across the table.
        let mut hshift = 0;
        let mut fcode = HASH_SIZE as i32;
        while fcode < 65536 {
            hshift += 1;
            fcode *= 2;
        }
        let hshift = 8 - hshift;

        self.hashes.fill(-1);

        let mut iter = pixels.iter().copied();
        let Some(first) = iter.next() else {
            self.output(self.clear_code, out);
            self.output(self.eof_code, out);
            return;
        };
        let mut ent = i32::from(first);

        self.output(self.clear_code, out);

        'next_pixel: for c in iter {
            let c = i32::from(c);
            let fcode = (c << BITS) + ent;
            let mut i = ((c << hshift) ^ ent) as usize;

            if self.hashes[i] == fcode {
                ent = self.codes[i];
                continue;
            }
            if self.hashes[i] >= 0 {
                // Secondary probe, distance relatively prime to the table size.
                let disp = if i == 0 { 1 } else { HASH_SIZE - i };
                loop {
                    i = if i >= disp { i - disp } else { i + HASH_SIZE - disp };
                    if self.hashes[i] == fcode {
                        ent = self.codes[i];
                        continue 'next_pixel;
                    }
                    if self.hashes[i] < 0 {
                        break;
                    }
                }
            }

            self.output(ent, out);
            ent = c;
            if self.free_ent < 1 << BITS {
                self.codes[i] = self.free_ent;
                self.free_ent += 1;
                self.hashes[i] = fcode;
            } else {
                self.clear_table(out);
            }
        }

        self.output(ent, out);
        self.output(self.eof_code, out);
    }

    /// Emit one code at the current width, growing the width after the
    /// first code that overflows it. After the EOF code, drain the
    /// accumulator and flush the final packet.
    fn output(&mut self, code: i32, out: &mut ByteBuffer) {
        self.cur_acc &= MASKS[self.cur_bits as usize];
        if self.cur_bits > 0 {
            self.cur_acc |= code << self.cur_bits;
        } else {
            self.cur_acc = code;
        }
        self.cur_bits += self.n_bits;

        while self.cur_bits >= 8 {
            self.packet_byte((self.cur_acc & 0xFF) as u8, out);
            self.cur_acc >>= 8;
            self.cur_bits -= 8;
        }

        if self.free_ent > self.max_code || self.clear_flag {
            if self.clear_flag {
                self.n_bits = self.init_bits;
                self.max_code = max_code_for(self.n_bits);
                self.clear_flag = false;
            } else {
                self.n_bits += 1;
                self.max_code = if self.n_bits == BITS {
                    1 << BITS
                } else {
                    max_code_for(self.n_bits)
                };
            }
        }

        if code == self.eof_code {
            while self.cur_bits > 0 {
                self.packet_byte((self.cur_acc & 0xFF) as u8, out);
                self.cur_acc >>= 8;
                self.cur_bits -= 8;
            }
            self.flush_packet(out);
        }
    }

    /// Reset the dictionary and signal the decoder with a CLEAR code.
    fn clear_table(&mut self, out: &mut ByteBuffer) {
        self.hashes.fill(-1);
        self.free_ent = self.clear_code + 2;
        self.clear_flag = true;
        self.output(self.clear_code, out);
    }

    fn packet_byte(&mut self, byte: u8, out: &mut ByteBuffer) {
        self.packet[self.packet_len] = byte;
        self.packet_len += 1;
        if self.packet_len >= 254 {
            self.flush_packet(out);
        }
    }

    fn flush_packet(&mut self, out: &mut ByteBuffer) {
        if self.packet_len > 0 {
            out.write_byte(self.packet_len as u8);
            out.write_bytes(&self.packet[..self.packet_len]);
            self.packet_len = 0;
        }
    }
}
