/// Closed set of file-name suffixes the asset loaders understand, classified
/// once at the request boundary so dispatch is an exhaustive match instead of
/// repeated string comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetExtension {
    Col,
    Img,
    Mnu,
    Set,
    Other,
}

impl AssetExtension {
    pub fn of(filename: &str) -> Self {
        let Some((_, extension)) = filename.rsplit_once('.') else {
            return Self::Other;
        };
        match extension.to_ascii_uppercase().as_str() {
            "COL" => Self::Col,
            "IMG" => Self::Img,
            "MNU" => Self::Mnu,
            "SET" => Self::Set,
            _ => Self::Other,
        }
    }
}
