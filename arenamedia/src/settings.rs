arenacf::eyre_imports!();
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "settings.toml";

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub arena_files: ArenaFiles,
    pub textures: Textures,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArenaFiles {
    pub folder: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Textures {
    // Externally stored images used when a proprietary file is absent.
    pub fallback_folder: String,
}

impl Settings {
    pub fn load(folder: &Path) -> eyre::Result<Settings> {
        let path = folder.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Read settings file at '{}'", path.display()))?;
        let settings: Settings = toml::from_str(&contents).wrap_err("Parse settings TOML")?;
        Ok(settings)
    }

    pub fn arena_files_folder(&self) -> PathBuf {
        PathBuf::from(&self.arena_files.folder)
    }

    pub fn fallback_folder(&self) -> PathBuf {
        PathBuf::from(&self.textures.fallback_folder)
    }
}
