use getset::CopyGetters;

use crate::media::texture_manager::SurfaceHandle;

/// A fully decoded 2D image: direct-color pixels in the canonical ARGB8888
/// layout. Cached masters are immutable; per-use render attributes live on
/// [`SurfaceView`].
#[derive(Clone, Debug, CopyGetters)]
pub struct Surface {
    #[getset(get_copy = "pub")]
    width: u32,
    #[getset(get_copy = "pub")]
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    pub fn from_argb_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Surface {
        assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "pixel buffer does not match {width}x{height}"
        );
        Surface {
            width,
            height,
            pixels,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// A caller-owned view over a cached surface. Transparency key and visibility
/// are per-use draw attributes; setting them on a view never writes through to
/// the cached master, so one caller's choices cannot leak into another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
pub struct SurfaceView {
    #[getset(get_copy = "pub")]
    handle: SurfaceHandle,
    #[getset(get_copy = "pub")]
    transparent_color: Option<u32>,
    #[getset(get_copy = "pub")]
    visible: bool,
}

impl SurfaceView {
    pub fn new(handle: SurfaceHandle) -> SurfaceView {
        SurfaceView {
            handle,
            transparent_color: None,
            visible: true,
        }
    }

    pub fn set_transparent_color(&mut self, argb: u32) {
        self.transparent_color = Some(argb);
    }

    pub fn clear_transparent_color(&mut self) {
        self.transparent_color = None;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::texture_manager::CacheHandle;

    #[test]
    fn pixel_lookup_is_row_major() {
        let surface = Surface::from_argb_pixels(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(surface.pixel(0, 0), 1);
        assert_eq!(surface.pixel(1, 0), 2);
        assert_eq!(surface.pixel(0, 1), 3);
        assert_eq!(surface.pixel(1, 1), 4);
    }

    #[test]
    #[should_panic]
    fn mismatched_buffer_is_rejected() {
        let _ = Surface::from_argb_pixels(2, 2, vec![1, 2, 3]);
    }

    #[test]
    fn views_are_independent() {
        let handle = SurfaceHandle::from_index(0);
        let mut first = SurfaceView::new(handle);
        let second = SurfaceView::new(handle);

        first.set_transparent_color(0xFFFF00FF);
        first.set_visible(false);

        assert_eq!(first.transparent_color(), Some(0xFFFF00FF));
        assert_eq!(second.transparent_color(), None);
        assert!(second.visible());
        assert_eq!(first.handle(), second.handle());
    }
}
