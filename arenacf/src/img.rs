crate::eyre_imports!();
use byteorder::{LittleEndian, ReadBytesExt};
use getset::CopyGetters;
use glam::IVec2;
use image::{DynamicImage, ImageBuffer};
use std::io::Cursor;
use std::path::PathBuf;

use crate::compression::decode_rle;
use crate::palette::{Color, PALETTE_COLOR_COUNT, Palette};
use crate::utils::color::{argb_pixels_to_rgba_bytes, component_6bit_to_8bit};
use crate::utils::io::read_binary;

pub const HEADER_SIZE: usize = 12;
const PALETTE_APPENDIX_SIZE: usize = PALETTE_COLOR_COUNT * 3;

const FLAG_BUILT_IN_PALETTE: u16 = 0x0100;
const COMPRESSION_MASK: u16 = 0x00FF;

// Headerless image files with fixed, known dimensions. These carry bare
// indexed pixels and never a built-in palette.
const RAW_OVERRIDES: &[(&str, u32, u32)] = &[
    ("ARENARW.IMG", 16, 16),
    ("CITY.IMG", 16, 11),
    ("DITHER.IMG", 16, 50),
    ("DITHER2.IMG", 16, 50),
    ("DUNGEON.IMG", 14, 8),
    ("DZTTAV.IMG", 32, 34),
    ("NOCAMP.IMG", 25, 19),
    ("NOSPELL.IMG", 25, 19),
    ("P1.IMG", 320, 53),
    ("POPTALK.IMG", 320, 77),
    ("S2.IMG", 320, 36),
    ("SLIDER.IMG", 289, 7),
    ("TOWN.IMG", 9, 10),
    ("UPDOWN.IMG", 8, 16),
    ("VILLAGE.IMG", 8, 8),
];

struct Header {
    offset: IVec2,
    width: u32,
    height: u32,
    flags: u16,
    data_len: usize,
}

/// A decoded IMG/MNU single-frame image: direct-color pixels in the canonical
/// ARGB8888 layout, plus the draw offset the header carries.
#[derive(Clone, Debug, CopyGetters)]
pub struct ImgFile {
    #[getset(get_copy = "pub")]
    width: u32,
    #[getset(get_copy = "pub")]
    height: u32,
    #[getset(get_copy = "pub")]
    offset: IVec2,
    pixels: Vec<u32>,
}

impl ImgFile {
    /// Decode an image against the given palette, or against its own built-in
    /// palette when `palette` is `None`.
    pub fn load(file_path: PathBuf, palette: Option<&Palette>) -> eyre::Result<ImgFile> {
        let (file_name, data) = read_binary(file_path)?;

        if let Some(&(_, width, height)) = RAW_OVERRIDES
            .iter()
            .find(|(name, ..)| name.eq_ignore_ascii_case(&file_name))
        {
            let palette = palette
                .ok_or_else(|| eyre!("Raw image '{file_name}' has no built-in palette."))?;
            let pixel_count = (width * height) as usize;
            let Some(indexed) = data.get(..pixel_count) else {
                bail!(
                    "Raw image '{file_name}' is truncated ({} of {pixel_count} bytes).",
                    data.len()
                );
            };
            return Ok(ImgFile {
                width,
                height,
                offset: IVec2::ZERO,
                pixels: palette.apply(indexed),
            });
        }

        let header = read_header(&file_name, &data)?;
        let compression = header.flags & COMPRESSION_MASK;
        let has_built_in_palette = header.flags & FLAG_BUILT_IN_PALETTE != 0;
        let pixel_count = (header.width * header.height) as usize;
        let body = &data[HEADER_SIZE..];

        let indexed: Vec<u8> = match compression {
            0x00 => body
                .get(..pixel_count)
                .ok_or_else(|| {
                    eyre!(
                        "Image '{file_name}' is truncated ({} of {pixel_count} pixel bytes).",
                        body.len()
                    )
                })?
                .to_vec(),
            0x04 => {
                let src = body.get(..header.data_len).ok_or_else(|| {
                    eyre!(
                        "Image '{file_name}' is truncated ({} of {} compressed bytes).",
                        body.len(),
                        header.data_len
                    )
                })?;
                decode_rle(src, pixel_count)
                    .wrap_err_with(|| format!("Decompress image '{file_name}'"))?
            }
            // TODO: deflate-style type 0x08 decoding; a handful of the full
            // screen menu images use it.
            0x08 => bail!("Image '{file_name}' uses compression type 0x08, which is not handled."),
            other => bail!("Unrecognized compression type 0x{other:02x} in image '{file_name}'."),
        };

        let built_in;
        let palette = match palette {
            Some(palette) => palette,
            None => {
                if !has_built_in_palette {
                    bail!("Image '{file_name}' has no built-in palette.");
                }
                built_in = read_palette_appendix(&file_name, &data)?;
                &built_in
            }
        };

        Ok(ImgFile {
            width: header.width,
            height: header.height,
            offset: header.offset,
            pixels: palette.apply(&indexed),
        })
    }

    /// Pull just the embedded palette out of an image file.
    pub fn extract_palette(file_path: PathBuf) -> eyre::Result<Palette> {
        let (file_name, data) = read_binary(file_path)?;
        let header = read_header(&file_name, &data)?;
        if header.flags & FLAG_BUILT_IN_PALETTE == 0 {
            bail!("Image '{file_name}' has no built-in palette to extract.");
        }
        read_palette_appendix(&file_name, &data)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    pub fn to_image(&self) -> eyre::Result<DynamicImage> {
        let img: ImageBuffer<image::Rgba<u8>, _> =
            ImageBuffer::from_vec(self.width, self.height, argb_pixels_to_rgba_bytes(&self.pixels))
                .ok_or(eyre!("Invalid image data"))?;
        Ok(DynamicImage::ImageRgba8(img))
    }
}

fn read_header(file_name: &str, data: &[u8]) -> eyre::Result<Header> {
    if data.len() < HEADER_SIZE {
        bail!(
            "Image '{file_name}' is too short for a header ({} bytes).",
            data.len()
        );
    }
    let strerr_base = format!("Reading header of '{file_name}'");
    let mut rdr = Cursor::new(data);
    let x = rdr
        .read_i16::<LittleEndian>()
        .wrap_err_with(|| format!("{strerr_base}: x offset"))?;
    let y = rdr
        .read_i16::<LittleEndian>()
        .wrap_err_with(|| format!("{strerr_base}: y offset"))?;
    let width = rdr
        .read_u16::<LittleEndian>()
        .wrap_err_with(|| format!("{strerr_base}: width"))?;
    let height = rdr
        .read_u16::<LittleEndian>()
        .wrap_err_with(|| format!("{strerr_base}: height"))?;
    let flags = rdr
        .read_u16::<LittleEndian>()
        .wrap_err_with(|| format!("{strerr_base}: flags"))?;
    let data_len = rdr
        .read_u16::<LittleEndian>()
        .wrap_err_with(|| format!("{strerr_base}: data length"))?;
    Ok(Header {
        offset: IVec2::new(x as i32, y as i32),
        width: width as u32,
        height: height as u32,
        flags,
        data_len: data_len as usize,
    })
}

// The built-in palette sits in the last 768 bytes of the file: 256 RGB
// triplets of 6 bit VGA components. Index 0 is the transparent slot.
fn read_palette_appendix(file_name: &str, data: &[u8]) -> eyre::Result<Palette> {
    if data.len() < HEADER_SIZE + PALETTE_APPENDIX_SIZE {
        bail!(
            "Image '{file_name}' is too short to hold a palette ({} bytes).",
            data.len()
        );
    }
    let raw = &data[data.len() - PALETTE_APPENDIX_SIZE..];

    let mut palette = Palette::default();
    for i in 0..PALETTE_COLOR_COUNT {
        let r = component_6bit_to_8bit(raw[i * 3]);
        let g = component_6bit_to_8bit(raw[i * 3 + 1]);
        let b = component_6bit_to_8bit(raw[i * 3 + 2]);
        let a = if i == 0 { 0 } else { 255 };
        palette.set(i, Color::new(r, g, b, a));
    }
    Ok(palette)
}
