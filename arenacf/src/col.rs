crate::eyre_imports!();
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::path::PathBuf;

use crate::palette::{Color, PALETTE_COLOR_COUNT, Palette};
use crate::utils::io::read_binary;

pub const HEADER_SIZE: usize = 8;
pub const EXPECTED_LEN: u32 = (HEADER_SIZE + PALETTE_COLOR_COUNT * 3) as u32;
pub const EXPECTED_VERSION: u32 = 0xB123;

/// Decode a COL palette container: an 8 byte header followed by 256 RGB byte
/// triplets at full 8 bit depth. Palette index 0 is the transparent slot.
pub fn load_palette(file_path: PathBuf) -> eyre::Result<Palette> {
    let (file_name, data) = read_binary(file_path)?;

    if data.len() != HEADER_SIZE + PALETTE_COLOR_COUNT * 3 {
        bail!(
            "Palette file '{file_name}' has unexpected size {} (wanted {}).",
            data.len(),
            HEADER_SIZE + PALETTE_COLOR_COUNT * 3
        );
    }

    let mut rdr = Cursor::new(data);
    let len = rdr
        .read_u32::<LittleEndian>()
        .wrap_err_with(|| format!("Read palette length header of '{file_name}'"))?;
    let version = rdr
        .read_u32::<LittleEndian>()
        .wrap_err_with(|| format!("Read palette version header of '{file_name}'"))?;

    // The known files all agree on these; a mismatch is worth a line but the
    // color table behind it still decodes.
    if len != EXPECTED_LEN {
        println!("Odd palette length {len} (0x{len:x}) in '{file_name}'.");
    }
    if version != EXPECTED_VERSION {
        println!("Odd palette version 0x{version:x} in '{file_name}'.");
    }

    let mut palette = Palette::default();
    for i in 0..PALETTE_COLOR_COUNT {
        let r = rdr
            .read_u8()
            .wrap_err_with(|| format!("Read palette color {i} of '{file_name}'"))?;
        let g = rdr
            .read_u8()
            .wrap_err_with(|| format!("Read palette color {i} of '{file_name}'"))?;
        let b = rdr
            .read_u8()
            .wrap_err_with(|| format!("Read palette color {i} of '{file_name}'"))?;
        let a = if i == 0 { 0 } else { 255 };
        palette.set(i, Color::new(r, g, b, a));
    }

    Ok(palette)
}
