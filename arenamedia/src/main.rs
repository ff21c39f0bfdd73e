use std::path::Path;
use std::process::ExitCode;

use arenamedia::logger::{self, LogAbout, LogSev};
use arenamedia::media::palette_file::PaletteName;
use arenamedia::media::surface::SurfaceView;
use arenamedia::media::texture_file::TextureName;
use arenamedia::media::texture_manager::TextureManager;
use arenamedia::render::software::SoftwareRenderer;
use arenamedia::settings::Settings;

arenacf::eyre_imports!();

// ARGB color keys the draw code treats as see-through.
const COLOR_BLACK: u32 = 0xFF000000;
const COLOR_MAGENTA: u32 = 0xFFFF00FF;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            logger::one(
                None,
                LogSev::Error,
                LogAbout::General,
                &format!("{report:?}"),
            );
            ExitCode::FAILURE
        }
    }
}

fn run() -> eyre::Result<()> {
    color_eyre::install()?;

    let settings = Settings::load(Path::new("."))?;
    logger::one(None, LogSev::Info, LogAbout::Settings, "Loaded settings file.");

    let mut manager = TextureManager::new(
        SoftwareRenderer::new(),
        settings.arena_files_folder(),
        settings.fallback_folder(),
    )?;

    manager.preload_sequences()?;
    logger::one(
        None,
        LogSev::Info,
        LogAbout::Startup,
        &format!(
            "Preloaded {} device textures over {} palettes.",
            manager.texture_count(),
            manager.palette_count()
        ),
    );

    // Walk the race-select screen's asset requests as a smoke test: the
    // world-map background against its own palette, the parchment popup and
    // cursor against the active one.
    manager.set_palette(PaletteName::Default.filename())?;
    manager.load_texture(
        TextureName::RaceSelect.filename(),
        Some(PaletteName::BuiltIn.filename()),
    )?;

    let parchment = manager.load_surface(TextureName::ParchmentPopup.filename(), None)?;
    let mut parchment_view = SurfaceView::new(parchment);
    parchment_view.set_transparent_color(COLOR_MAGENTA);

    let cursor = manager.load_surface(TextureName::SwordCursor.filename(), None)?;
    let mut cursor_view = SurfaceView::new(cursor);
    cursor_view.set_transparent_color(COLOR_BLACK);

    let cursor_surface = manager.surface(cursor_view.handle());
    logger::one(
        None,
        LogSev::Info,
        LogAbout::Assets,
        &format!(
            "Race-select assets ready (cursor {}x{}).",
            cursor_surface.width(),
            cursor_surface.height()
        ),
    );

    Ok(())
}
