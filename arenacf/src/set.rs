crate::eyre_imports!();
use std::path::PathBuf;

use crate::palette::Palette;
use crate::utils::io::read_binary;

pub const CHUNK_WIDTH: u32 = 64;
pub const CHUNK_HEIGHT: u32 = 64;
const CHUNK_SIZE: usize = (CHUNK_WIDTH * CHUNK_HEIGHT) as usize;

/// A decoded SET animation/image-list container: a raw concatenation of
/// 64x64 single-byte-indexed chunks, resolved here against an externally
/// supplied palette (SET files never embed one).
#[derive(Clone, Debug)]
pub struct SetFile {
    chunks: Vec<Vec<u32>>,
}

impl SetFile {
    pub fn load(file_path: PathBuf, palette: &Palette) -> eyre::Result<SetFile> {
        let (file_name, data) = read_binary(file_path)?;

        if data.is_empty() || data.len() % CHUNK_SIZE != 0 {
            bail!(
                "Image set '{file_name}' size {} is not a whole number of {CHUNK_SIZE} byte chunks.",
                data.len()
            );
        }

        let chunks: Vec<Vec<u32>> = data
            .chunks_exact(CHUNK_SIZE)
            .map(|indexed| palette.apply(indexed))
            .collect();

        println!("Loaded {} chunks from '{file_name}'.", chunks.len());

        Ok(SetFile { chunks })
    }

    pub fn count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, index: usize) -> &[u32] {
        &self.chunks[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use std::fs;

    fn test_palette() -> Palette {
        let mut palette = Palette::default();
        for i in 1..=255usize {
            palette.set(i, Color::new(i as u8, i as u8, i as u8, 255));
        }
        palette
    }

    #[test]
    fn chunk_count_comes_from_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FOUR.SET");
        let mut data = Vec::new();
        for value in 0..4u8 {
            data.extend(std::iter::repeat_n(value, CHUNK_SIZE));
        }
        fs::write(&path, data).unwrap();

        let set = SetFile::load(path, &test_palette()).unwrap();
        assert_eq!(set.count(), 4);
        for index in 0..set.count() {
            assert_eq!(set.chunk(index).len(), CHUNK_SIZE);
        }
        assert_eq!(set.chunk(0)[0], 0x00000000);
        assert_eq!(set.chunk(3)[0], 0xFF030303);
    }

    #[test]
    fn partial_chunk_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BAD.SET");
        fs::write(&path, vec![0u8; CHUNK_SIZE + 1]).unwrap();
        assert!(SetFile::load(path, &test_palette()).is_err());
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EMPTY.SET");
        fs::write(&path, Vec::<u8>::new()).unwrap();
        assert!(SetFile::load(path, &test_palette()).is_err());
    }
}
