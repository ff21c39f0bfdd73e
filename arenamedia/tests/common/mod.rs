#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const COL_HEADER_LEN: u32 = 776;
pub const COL_VERSION: u32 = 0xB123;
pub const SET_CHUNK_SIZE: usize = 64 * 64;

/// Write a COL palette whose entry `i` is `(i + seed, i, seed)` at full
/// 8 bit depth.
pub fn write_col(dir: &Path, name: &str, seed: u8) {
    let mut data = Vec::with_capacity(8 + 256 * 3);
    data.extend_from_slice(&COL_HEADER_LEN.to_le_bytes());
    data.extend_from_slice(&COL_VERSION.to_le_bytes());
    for i in 0..256usize {
        data.push((i as u8).wrapping_add(seed));
        data.push(i as u8);
        data.push(seed);
    }
    fs::write(dir.join(name), data).unwrap();
}

/// Write a headered IMG/MNU file filled with one palette index. When
/// `with_palette` is set, appends a 768 byte 6 bit palette whose entry `i`
/// is `(i % 64, (i + 1) % 64, (i + 2) % 64)`.
pub fn write_img(dir: &Path, name: &str, width: u16, height: u16, with_palette: bool, fill: u8) {
    let mut data = Vec::new();
    data.extend_from_slice(&0i16.to_le_bytes());
    data.extend_from_slice(&0i16.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    let flags: u16 = if with_palette { 0x0100 } else { 0 };
    data.extend_from_slice(&flags.to_le_bytes());
    let pixel_count = width as usize * height as usize;
    data.extend_from_slice(&(pixel_count as u16).to_le_bytes());
    data.extend(std::iter::repeat_n(fill, pixel_count));
    if with_palette {
        for i in 0..256usize {
            data.push((i % 64) as u8);
            data.push(((i + 1) % 64) as u8);
            data.push(((i + 2) % 64) as u8);
        }
    }
    fs::write(dir.join(name), data).unwrap();
}

/// Write a SET container of `chunk_count` 64x64 chunks, chunk `c` filled with
/// palette index `c`.
pub fn write_set(dir: &Path, name: &str, chunk_count: u8) {
    let mut data = Vec::with_capacity(chunk_count as usize * SET_CHUNK_SIZE);
    for chunk in 0..chunk_count {
        data.extend(std::iter::repeat_n(chunk, SET_CHUNK_SIZE));
    }
    fs::write(dir.join(name), data).unwrap();
}

/// Write a 2x2 PNG filled with the given RGBA color. The file name gets the
/// `.png` suffix appended, matching the fallback lookup convention.
pub fn write_png(dir: &Path, name: &str, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    img.save(dir.join(format!("{name}.png"))).unwrap();
}

/// The canonical pixel a 6 bit palette entry from `write_img` resolves to.
pub fn vga_entry_argb(index: usize) -> u32 {
    let scale = |c: usize| ((c % 64) as u32 * 255 / 63) & 0xFF;
    let a = if index == 0 { 0 } else { 0xFF };
    a << 24 | scale(index) << 16 | scale(index + 1) << 8 | scale(index + 2)
}

/// The canonical pixel a COL entry from `write_col` resolves to.
pub fn col_entry_argb(index: usize, seed: u8) -> u32 {
    let a: u32 = if index == 0 { 0 } else { 0xFF };
    a << 24
        | ((index as u8).wrapping_add(seed) as u32) << 16
        | (index as u32 & 0xFF) << 8
        | seed as u32
}
