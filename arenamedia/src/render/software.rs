arenacf::eyre_imports!();
use arenacf::utils::color::argb_pixels_to_rgba_bytes;
use image::RgbaImage;
use std::collections::HashMap;

use super::backend::{RenderBackend, TextureId};

/// CPU-only reference backend: keeps every uploaded texture as an RGBA8
/// image buffer. Enough to exercise the whole media layer without a GPU or a
/// window, and handy for dumping decoded assets while debugging.
#[derive(Default)]
pub struct SoftwareRenderer {
    images: HashMap<TextureId, RgbaImage>,
    next_id: u32,
}

impl SoftwareRenderer {
    pub fn new() -> SoftwareRenderer {
        SoftwareRenderer::default()
    }

    pub fn image(&self, id: TextureId) -> Option<&RgbaImage> {
        self.images.get(&id)
    }

    pub fn texture_count(&self) -> usize {
        self.images.len()
    }
}

impl RenderBackend for SoftwareRenderer {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u32],
    ) -> eyre::Result<TextureId> {
        let bytes = argb_pixels_to_rgba_bytes(pixels);
        let img = RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
            eyre!("Pixel buffer does not match the {width}x{height} texture dimensions")
        })?;

        let id = TextureId::new(self.next_id);
        self.next_id += 1;
        self.images.insert(id, img);
        Ok(id)
    }

    fn destroy_texture(&mut self, id: TextureId) {
        self.images.remove(&id);
    }
}
