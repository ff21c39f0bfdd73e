use bytemuck::{Pod, Zeroable};
use derive_new::new;

use crate::utils::color::Argb8888;

pub const PALETTE_COLOR_COUNT: usize = 256;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, new)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Canonical 32 bit pixel layout: alpha 0xFF000000, red 0x00FF0000,
    /// green 0x0000FF00, blue 0x000000FF.
    pub fn argb(self) -> u32 {
        Argb8888::new_from_components(self.r, self.g, self.b, self.a).value()
    }
}

/// An ordered table of 256 colors used to translate indexed pixel values into
/// direct colors. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; PALETTE_COLOR_COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [Color::default(); PALETTE_COLOR_COUNT],
        }
    }
}

impl Palette {
    pub fn color(&self, index: u8) -> Color {
        self.colors[index as usize]
    }

    pub fn set(&mut self, index: usize, color: Color) {
        self.colors[index] = color;
    }

    pub fn argb(&self, index: u8) -> u32 {
        self.color(index).argb()
    }

    /// Resolve an indexed pixel buffer into direct-color pixels.
    pub fn apply(&self, indexed: &[u8]) -> Vec<u32> {
        indexed.iter().map(|&index| self.argb(index)).collect()
    }

    pub fn raw_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}
