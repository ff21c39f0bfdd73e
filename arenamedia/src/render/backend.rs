arenacf::eyre_imports!();

/// Opaque handle to a texture living in the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub fn new(raw: u32) -> TextureId {
        TextureId(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// The device side of the media layer: converts canonical ARGB8888 pixel
/// buffers into whatever native format the backend draws from and owns the
/// uploaded copies. The texture cache drives this; nothing else talks to it.
pub trait RenderBackend {
    /// Convert and upload one image. `pixels` is row-major, `width * height`
    /// entries long.
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u32])
    -> eyre::Result<TextureId>;

    /// Release one previously created texture. Unknown ids are ignored.
    fn destroy_texture(&mut self, id: TextureId);
}
