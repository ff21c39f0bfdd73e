use strum_macros::{Display, EnumIter};

/// Well-known palette files, plus the reserved sentinel standing for "use the
/// image's own embedded palette".
#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum PaletteName {
    BuiltIn,
    CharSheet,
    Daytime,
    Default,
    Dreary,
}

impl PaletteName {
    pub fn filename(self) -> &'static str {
        match self {
            // Not a real file; never hits the disk.
            PaletteName::BuiltIn => "BuiltIn",
            PaletteName::CharSheet => "CHARSHT.COL",
            PaletteName::Daytime => "DAYTIME.COL",
            PaletteName::Default => "PAL.COL",
            PaletteName::Dreary => "DREARY.COL",
        }
    }
}
