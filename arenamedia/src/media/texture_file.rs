use strum_macros::{Display, EnumIter};

/// Single images referenced by the character-creation and world-map screens.
#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum TextureName {
    CharacterCreation,
    CompassFrame,
    CompassSlider,
    GameWorldInterface,
    LoadSave,
    ParchmentPopup,
    QuillCursor,
    RaceSelect,
    SwordCursor,
    UpDown,
    WorldMap,
}

impl TextureName {
    pub fn filename(self) -> &'static str {
        match self {
            TextureName::CharacterCreation => "STARTGAM.MNU",
            TextureName::CompassFrame => "COMPASS.IMG",
            TextureName::CompassSlider => "SLIDER.IMG",
            TextureName::GameWorldInterface => "P1.IMG",
            TextureName::LoadSave => "LOADSAVE.IMG",
            TextureName::ParchmentPopup => "POPUP.IMG",
            TextureName::QuillCursor => "POINTER.IMG",
            TextureName::RaceSelect => "TAMRIEL.MNU",
            TextureName::SwordCursor => "SWORD_C.IMG",
            TextureName::UpDown => "UPDOWN.IMG",
            TextureName::WorldMap => "TAMRIEL.MNU",
        }
    }
}

/// Cinematic/animation sequences stored as numbered runs of single images.
#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum TextureSequenceName {
    ChaosVision,
    King,
    Mage,
    OpeningScroll,
    Silmane,
}

impl TextureSequenceName {
    /// Expand the logical sequence name into its ordered member filenames.
    pub fn filenames(self) -> Vec<String> {
        match self {
            TextureSequenceName::ChaosVision => numbered("CHAOS", 4),
            TextureSequenceName::King => numbered("KING", 3),
            TextureSequenceName::Mage => numbered("MAGE", 3),
            TextureSequenceName::OpeningScroll => numbered("SCROLL", 3),
            TextureSequenceName::Silmane => numbered("SILMAN", 3),
        }
    }
}

fn numbered(prefix: &str, count: u32) -> Vec<String> {
    (1..=count).map(|n| format!("{prefix}{n:02}.IMG")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::format::AssetExtension;
    use strum::IntoEnumIterator;

    #[test]
    fn every_texture_name_is_a_proprietary_image() {
        for name in TextureName::iter() {
            let extension = AssetExtension::of(name.filename());
            assert!(
                extension == AssetExtension::Img || extension == AssetExtension::Mnu,
                "{name}"
            );
        }
    }

    #[test]
    fn sequences_expand_in_order() {
        assert_eq!(
            TextureSequenceName::OpeningScroll.filenames(),
            ["SCROLL01.IMG", "SCROLL02.IMG", "SCROLL03.IMG"]
        );
    }

    #[test]
    fn no_sequence_is_empty() {
        for sequence in TextureSequenceName::iter() {
            assert!(!sequence.filenames().is_empty());
        }
    }

    #[test]
    fn member_names_fit_dos_conventions() {
        for sequence in TextureSequenceName::iter() {
            for filename in sequence.filenames() {
                let (stem, extension) = filename.rsplit_once('.').unwrap();
                assert!(stem.len() <= 8, "{filename}");
                assert_eq!(extension, "IMG");
            }
        }
    }
}
