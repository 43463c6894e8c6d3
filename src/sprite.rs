//! # Sprites
//! Sprites are packed bitmaps read from memory, most significant bit leftmost.
//! - small sprites are 8 pixels wide with one byte per row
//! - large (SUPER-CHIP) sprites are 16x16 with two bytes per row

pub const SMALL_WIDTH: usize = 8;
pub const LARGE_WIDTH: usize = 16;
pub const LARGE_HEIGHT: usize = 16;
/// Bytes read for a 16x16 sprite
pub const LARGE_SIZE: usize = LARGE_HEIGHT * 2;

pub fn small_row(byte: u8) -> [bool; SMALL_WIDTH] {
    let mut row = [false; SMALL_WIDTH];
    for (bit, pixel) in row.iter_mut().enumerate() {
        *pixel = byte & (0x80 >> bit) != 0;
    }
    row
}

pub fn large_row(high: u8, low: u8) -> [bool; LARGE_WIDTH] {
    let word = u16::from_be_bytes([high, low]);
    let mut row = [false; LARGE_WIDTH];
    for (bit, pixel) in row.iter_mut().enumerate() {
        *pixel = word & (0x8000 >> bit) != 0;
    }
    row
}

/// One row per byte
pub fn decode_small(bytes: &[u8]) -> Vec<[bool; SMALL_WIDTH]> {
    bytes.iter().map(|&byte| small_row(byte)).collect()
}

/// One row per pair of bytes; a trailing odd byte is ignored
pub fn decode_large(bytes: &[u8]) -> Vec<[bool; LARGE_WIDTH]> {
    bytes
        .chunks_exact(2)
        .map(|pair| large_row(pair[0], pair[1]))
        .collect()
}
