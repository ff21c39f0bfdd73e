arenacf::eyre_imports!();
use std::collections::HashMap;
use std::path::PathBuf;

use arenacf::col;
use arenacf::img::ImgFile;
use arenacf::palette::Palette;
use arenacf::set::{self, SetFile};
use arenacf::utils::color::rgba_bytes_to_argb_pixels;
use strum::IntoEnumIterator;

use crate::logger::{self, LogAbout, LogSev};
use crate::media::format::AssetExtension;
use crate::media::palette_file::PaletteName;
use crate::media::surface::Surface;
use crate::media::texture_file::TextureSequenceName;
use crate::render::backend::{RenderBackend, TextureId};

/// Index of a cached resource inside its arena. Handles are cheap to copy,
/// stay valid for the manager's whole lifetime, and make lookups infallible.
pub trait CacheHandle: Copy {
    fn from_index(index: u32) -> Self;
    fn index(self) -> u32;
}

macro_rules! impl_cache_handle {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl CacheHandle for $name {
            fn from_index(index: u32) -> Self {
                Self(index)
            }
            fn index(self) -> u32 {
                self.0
            }
        }
    };
}

impl_cache_handle!(SurfaceHandle);
impl_cache_handle!(TextureHandle);
impl_cache_handle!(SurfaceSetHandle);
impl_cache_handle!(TextureSetHandle);

// A structured key instead of filename/palette string concatenation, so the
// sentinel can never collide with a real palette file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    filename: String,
    palette: String,
}

impl CacheKey {
    fn new(filename: &str, palette: &str) -> CacheKey {
        CacheKey {
            filename: filename.to_owned(),
            palette: palette.to_owned(),
        }
    }
}

// One memoizing arena per resource kind: key -> handle -> slot. Entries are
// never evicted or replaced.
struct ResourceArena<T, H: CacheHandle> {
    by_key: HashMap<CacheKey, H>,
    items: Vec<T>,
}

impl<T, H: CacheHandle> ResourceArena<T, H> {
    fn new() -> Self {
        Self {
            by_key: HashMap::new(),
            items: Vec::new(),
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<H> {
        self.by_key.get(key).copied()
    }

    fn insert(&mut self, key: CacheKey, item: T) -> H {
        assert!(
            !self.by_key.contains_key(&key),
            "resource '{}{}' is already cached",
            key.filename,
            key.palette
        );
        let handle = H::from_index(self.items.len() as u32);
        self.items.push(item);
        self.by_key.insert(key, handle);
        handle
    }

    fn get(&self, handle: H) -> &T {
        &self.items[handle.index() as usize]
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Owner of every decoded palette, surface and device texture. Resolvers
/// return a cached handle when the (filename, palette) pair was seen before
/// and decode-and-insert inline otherwise; nothing is ever unloaded before
/// the manager itself goes away.
///
/// Single threaded by design: callers needing cross-thread access must wrap
/// the whole manager in their own synchronization.
pub struct TextureManager<R: RenderBackend> {
    renderer: R,
    data_folder: PathBuf,
    fallback_folder: PathBuf,
    palettes: HashMap<String, Palette>,
    surfaces: ResourceArena<Surface, SurfaceHandle>,
    textures: ResourceArena<TextureId, TextureHandle>,
    surface_sets: ResourceArena<Vec<Surface>, SurfaceSetHandle>,
    texture_sets: ResourceArena<Vec<TextureId>, TextureSetHandle>,
    active_palette: String,
}

impl<R: RenderBackend> TextureManager<R> {
    /// Build a manager over the given backend and asset folders, loading and
    /// selecting the default palette so no request ever runs without one.
    pub fn new(renderer: R, data_folder: PathBuf, fallback_folder: PathBuf) -> eyre::Result<Self> {
        logger::one(None, LogSev::Info, LogAbout::TextureManager, "Initializing.");

        let mut manager = Self {
            renderer,
            data_folder,
            fallback_folder,
            palettes: HashMap::new(),
            surfaces: ResourceArena::new(),
            textures: ResourceArena::new(),
            surface_sets: ResourceArena::new(),
            texture_sets: ResourceArena::new(),
            active_palette: String::new(),
        };
        manager.set_palette(PaletteName::Default.filename())?;
        Ok(manager)
    }

    pub fn palette_is_builtin(palette_name: &str) -> bool {
        palette_name == PaletteName::BuiltIn.filename()
    }

    // Decode a palette file and insert it under its own name. Asking twice
    // for the same name is a caller bug, not a runtime condition.
    fn load_palette(&mut self, palette_name: &str) -> eyre::Result<()> {
        assert!(
            !self.palettes.contains_key(palette_name),
            "palette '{palette_name}' is already loaded"
        );

        let path = self.data_folder.join(palette_name);
        let palette = match AssetExtension::of(palette_name) {
            AssetExtension::Col => col::load_palette(path)
                .wrap_err_with(|| format!("Load palette '{palette_name}'"))?,
            AssetExtension::Img | AssetExtension::Mnu => ImgFile::extract_palette(path)
                .wrap_err_with(|| format!("Extract palette from '{palette_name}'"))?,
            AssetExtension::Set | AssetExtension::Other => {
                bail!("Unrecognized palette '{palette_name}'.");
            }
        };

        self.palettes.insert(palette_name.to_owned(), palette);
        logger::one(
            None,
            LogSev::Debug,
            LogAbout::Palettes,
            &format!("Loaded palette '{palette_name}'."),
        );
        Ok(())
    }

    /// Look up or decode a single image.
    ///
    /// `palette_name` of `None` means the active palette, read at call time.
    /// Passing the built-in sentinel decodes against the image's own embedded
    /// palette; the palette table is then keyed by the image's file name.
    pub fn load_surface(
        &mut self,
        filename: &str,
        palette_name: Option<&str>,
    ) -> eyre::Result<SurfaceHandle> {
        let palette_name = palette_name.unwrap_or(&self.active_palette).to_owned();
        let key = CacheKey::new(filename, &palette_name);
        if let Some(handle) = self.surfaces.lookup(&key) {
            return Ok(handle);
        }

        let use_builtin = Self::palette_is_builtin(&palette_name);

        // The palette an image needs is its own file when decoding against
        // the embedded one, the named file otherwise.
        let palette_key = if use_builtin {
            filename
        } else {
            palette_name.as_str()
        };
        if !self.palettes.contains_key(palette_key) {
            self.load_palette(palette_key)?;
        }

        let surface = self.decode_surface(filename, &palette_name, use_builtin)?;
        Ok(self.surfaces.insert(key, surface))
    }

    fn decode_surface(
        &self,
        filename: &str,
        palette_name: &str,
        use_builtin: bool,
    ) -> eyre::Result<Surface> {
        match AssetExtension::of(filename) {
            AssetExtension::Img | AssetExtension::Mnu => {
                // With the built-in palette requested, hand the decoder no
                // palette at all and let it use the embedded one.
                let palette = if use_builtin {
                    None
                } else {
                    Some(
                        self.palettes
                            .get(palette_name)
                            .expect("palette resolved before decode"),
                    )
                };
                let img = ImgFile::load(self.data_folder.join(filename), palette)
                    .wrap_err_with(|| format!("Load image '{filename}'"))?;
                let (width, height) = (img.width(), img.height());
                Ok(Surface::from_argb_pixels(width, height, img.into_pixels()))
            }
            // Anything outside the proprietary family falls back to an
            // externally stored PNG next to the data files.
            _ => self.load_png(filename),
        }
    }

    fn load_png(&self, filename: &str) -> eyre::Result<Surface> {
        let path = self.fallback_folder.join(format!("{filename}.png"));
        let img = image::open(&path)
            .wrap_err_with(|| format!("Could not open texture '{}'", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let pixels = rgba_bytes_to_argb_pixels(img.as_raw());
        Ok(Surface::from_argb_pixels(width, height, pixels))
    }

    /// Look up or create the device texture for a single image. The source
    /// surface is decoded (and cached) first, then converted and uploaded.
    pub fn load_texture(
        &mut self,
        filename: &str,
        palette_name: Option<&str>,
    ) -> eyre::Result<TextureHandle> {
        let palette_name = palette_name.unwrap_or(&self.active_palette).to_owned();
        let key = CacheKey::new(filename, &palette_name);
        if let Some(handle) = self.textures.lookup(&key) {
            return Ok(handle);
        }

        let surface_handle = self.load_surface(filename, Some(&palette_name))?;
        let surface = self.surfaces.get(surface_handle);
        let texture = self
            .renderer
            .create_texture(surface.width(), surface.height(), surface.pixels())
            .wrap_err_with(|| format!("Create device texture for '{filename}'"))?;
        Ok(self.textures.insert(key, texture))
    }

    /// Look up or decode an animation/image-list file into its ordered chunk
    /// surfaces. Sets never carry a built-in palette, so one must be named.
    pub fn load_surface_set(
        &mut self,
        filename: &str,
        palette_name: &str,
    ) -> eyre::Result<SurfaceSetHandle> {
        let key = CacheKey::new(filename, palette_name);
        if let Some(handle) = self.surface_sets.lookup(&key) {
            return Ok(handle);
        }

        let file = self.decode_set(filename, palette_name)?;
        let surfaces = (0..file.count())
            .map(|index| {
                Surface::from_argb_pixels(set::CHUNK_WIDTH, set::CHUNK_HEIGHT, file.chunk(index).to_vec())
            })
            .collect();
        Ok(self.surface_sets.insert(key, surfaces))
    }

    /// Like [`Self::load_surface_set`], but each chunk is converted and
    /// uploaded to the backend instead of kept as a surface.
    pub fn load_texture_set(
        &mut self,
        filename: &str,
        palette_name: &str,
    ) -> eyre::Result<TextureSetHandle> {
        let key = CacheKey::new(filename, palette_name);
        if let Some(handle) = self.texture_sets.lookup(&key) {
            return Ok(handle);
        }

        let file = self.decode_set(filename, palette_name)?;
        let mut textures = Vec::with_capacity(file.count());
        for index in 0..file.count() {
            let texture = self
                .renderer
                .create_texture(set::CHUNK_WIDTH, set::CHUNK_HEIGHT, file.chunk(index))
                .wrap_err_with(|| format!("Create device texture {index} for '{filename}'"))?;
            textures.push(texture);
        }
        Ok(self.texture_sets.insert(key, textures))
    }

    fn decode_set(&mut self, filename: &str, palette_name: &str) -> eyre::Result<SetFile> {
        assert!(
            !Self::palette_is_builtin(palette_name),
            "Image sets (i.e., .SET files) do not have built-in palettes."
        );

        if !self.palettes.contains_key(palette_name) {
            self.load_palette(palette_name)?;
        }

        match AssetExtension::of(filename) {
            AssetExtension::Set => {
                let palette = self
                    .palettes
                    .get(palette_name)
                    .expect("palette resolved before decode");
                SetFile::load(self.data_folder.join(filename), palette)
                    .wrap_err_with(|| format!("Load image set '{filename}'"))
            }
            _ => bail!("Unrecognized image list '{filename}'."),
        }
    }

    /// Make `palette_name` the palette used by requests that don't name one.
    /// Loads it first if this is its first mention. Affects subsequent
    /// requests only; cached entries keep the palette they were decoded with.
    pub fn set_palette(&mut self, palette_name: &str) -> eyre::Result<()> {
        if !self.palettes.contains_key(palette_name) {
            self.load_palette(palette_name)?;
        }
        self.active_palette = palette_name.to_owned();
        Ok(())
    }

    /// Warm the texture cache with every known cinematic sequence. Purely a
    /// convenience; failures are the same ones the per-file resolvers raise.
    pub fn preload_sequences(&mut self) -> eyre::Result<()> {
        logger::one(
            None,
            LogSev::Info,
            LogAbout::TextureManager,
            "Preloading sequences.",
        );

        for sequence in TextureSequenceName::iter() {
            for filename in sequence.filenames() {
                self.load_texture(&filename, None)?;
            }
        }
        Ok(())
    }

    pub fn surface(&self, handle: SurfaceHandle) -> &Surface {
        self.surfaces.get(handle)
    }

    pub fn texture(&self, handle: TextureHandle) -> TextureId {
        *self.textures.get(handle)
    }

    pub fn surface_set(&self, handle: SurfaceSetHandle) -> &[Surface] {
        self.surface_sets.get(handle)
    }

    pub fn texture_set(&self, handle: TextureSetHandle) -> &[TextureId] {
        self.texture_sets.get(handle)
    }

    pub fn active_palette(&self) -> &str {
        &self.active_palette
    }

    pub fn contains_surface(&self, filename: &str, palette_name: Option<&str>) -> bool {
        let palette_name = palette_name.unwrap_or(&self.active_palette);
        self.surfaces
            .lookup(&CacheKey::new(filename, palette_name))
            .is_some()
    }

    pub fn is_palette_loaded(&self, palette_name: &str) -> bool {
        self.palettes.contains_key(palette_name)
    }

    pub fn palette_count(&self) -> usize {
        self.palettes.len()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<R: RenderBackend> Drop for TextureManager<R> {
    // Every device texture goes back to the backend exactly once; surfaces
    // and palettes unwind with the aggregate.
    fn drop(&mut self) {
        for texture in self.textures.iter() {
            self.renderer.destroy_texture(*texture);
        }
        for texture_set in self.texture_sets.iter() {
            for texture in texture_set {
                self.renderer.destroy_texture(*texture);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::software::SoftwareRenderer;
    use std::fs;
    use std::path::Path;

    fn write_default_palette(dir: &Path) {
        let mut data = Vec::new();
        data.extend_from_slice(&776u32.to_le_bytes());
        data.extend_from_slice(&0xB123u32.to_le_bytes());
        for i in 0..256usize {
            data.extend_from_slice(&[i as u8, i as u8, i as u8]);
        }
        fs::write(dir.join("PAL.COL"), data).unwrap();
    }

    fn manager_over(dir: &Path) -> TextureManager<SoftwareRenderer> {
        TextureManager::new(
            SoftwareRenderer::new(),
            dir.to_path_buf(),
            dir.to_path_buf(),
        )
        .unwrap()
    }

    #[test]
    fn construction_selects_the_default_palette() {
        let dir = tempfile::tempdir().unwrap();
        write_default_palette(dir.path());
        let manager = manager_over(dir.path());
        assert_eq!(manager.active_palette(), PaletteName::Default.filename());
        assert!(manager.is_palette_loaded("PAL.COL"));
    }

    #[test]
    #[should_panic(expected = "already loaded")]
    fn double_palette_insertion_is_a_programming_error() {
        let dir = tempfile::tempdir().unwrap();
        write_default_palette(dir.path());
        let mut manager = manager_over(dir.path());
        // Construction already loaded PAL.COL.
        let _ = manager.load_palette("PAL.COL");
    }

    #[test]
    fn builtin_detection_only_matches_the_sentinel() {
        assert!(TextureManager::<SoftwareRenderer>::palette_is_builtin(
            PaletteName::BuiltIn.filename()
        ));
        assert!(!TextureManager::<SoftwareRenderer>::palette_is_builtin(
            "PAL.COL"
        ));
        assert!(!TextureManager::<SoftwareRenderer>::palette_is_builtin(""));
    }
}
