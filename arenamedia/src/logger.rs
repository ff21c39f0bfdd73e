use pad::PadStr;
use regex::Regex;
use std::sync::OnceLock;
use strum::VariantNames; // For the trait.
use strum_macros::{Display, EnumString, VariantNames}; // For the derive macros.

// Event severity.
#[derive(Display, EnumString, VariantNames, PartialEq)]
pub enum LogSev {
    Debug,
    DebugVerbose,
    Error,
    Info,
    Warn,
}

// Event context.
#[derive(Display, EnumString, VariantNames, PartialEq)]
pub enum LogAbout {
    Assets,
    General,
    Palettes,
    Renderer,
    Settings,
    Startup,
    TextureManager,
}

// Regular expression matched against the About channel name of each event.
// Unset means everything is shown.
const LOG_FILTER_ENV: &str = "ARENAMEDIA_LOG_ABOUT";

fn about_filter() -> &'static Regex {
    static FILTER: OnceLock<Regex> = OnceLock::new();
    FILTER.get_or_init(|| {
        // Fall back to an expression pieced together from the enum's variant
        // names, which matches every channel.
        let all_variants = || LogAbout::VARIANTS.join("|");
        let expr_str = std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| all_variants());
        Regex::new(&expr_str).unwrap_or_else(|_| {
            eprintln!("Invalid {LOG_FILTER_ENV} expression '{expr_str}', showing everything.");
            Regex::new(&all_variants()).expect("variant names form a valid expression")
        })
    })
}

fn can_show_msg(_severity: &LogSev, about: &LogAbout) -> bool {
    about_filter().is_match(&about.to_string())
}

#[track_caller]
pub fn one(
    show_caller_location_override: Option<bool>,
    severity: LogSev,
    about: LogAbout,
    msg: &str,
) {
    if !can_show_msg(&severity, &about) {
        return;
    }

    // Default, for now.
    let show_caller_location = show_caller_location_override.unwrap_or(true);

    let mut location_str = String::new();
    if show_caller_location {
        let caller_location = std::panic::Location::caller();
        let msg = format!("{}:{}", caller_location.file(), caller_location.line());

        let pad_width = 46;
        let mut cut_left_chr_amount = msg.len().saturating_sub(pad_width);
        if cut_left_chr_amount != 0 {
            cut_left_chr_amount += 2;
            location_str += "..";
        }
        location_str += &msg[cut_left_chr_amount..msg.len()];
        location_str = location_str.with_exact_width(pad_width);
    }

    let about_msg = format!("[{about}]").pad_to_width(18);
    let full_msg = format!("<d>{{ {location_str} }}</d> <b>{about_msg}</b> {msg}");

    match severity {
        LogSev::Debug | LogSev::DebugVerbose => {
            paris::log!("<bright-magenta><bold><info></bold></> {full_msg}")
        }
        LogSev::Error => paris::log!("<red><bold><cross></bold></> {full_msg}"),
        LogSev::Info => paris::log!("<cyan><bold><info></bold></> {full_msg}"),
        LogSev::Warn => paris::log!("<yellow><bold><warn></bold></> {full_msg}"),
    }
}
