//! GOLFIN startup flow simulator for desktop.
//!
//! Runs the flow in an `embedded-graphics-simulator` window: the bootstrap
//! plays Logo → Loading → Splash on its own, after which the keyboard stands
//! in for taps (see [`keymap`]).
//!
//! ```text
//! simulator [--config golfin.toml] [--locale table.csv] [--language ja] [--scale 2] [--journal]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod buttons;
mod keymap;
mod render;
mod timing;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use golfin_screen_flow::{AnyScreen, App, Control, FlowConfig, Localizer, ScreenRegistry};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::buttons::Buttons;
use crate::keymap::Key;
use crate::render::{SCREEN_HEIGHT, SCREEN_WIDTH, draw_flow, draw_journal};
use crate::timing::{FRAME_TIME, MAX_FRAME_DELTA};

/// Localization table used when `--locale` is not given.
const BUNDLED_TABLE: &str = include_str!("../assets/localization.csv");

#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Desktop simulator for the GOLFIN startup flow")]
#[command(version)]
struct Args {
    /// Flow configuration file (TOML). Defaults apply when it does not exist.
    #[arg(long, default_value = "golfin.toml")]
    config: PathBuf,

    /// Localization table (CSV). The bundled table is used when omitted.
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Language to start in, e.g. `ja`.
    #[arg(long)]
    language: Option<String>,

    /// Window pixel scale.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Show the journal overlay from the start.
    #[arg(long)]
    journal: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Simulator failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();
}

fn build_app(args: &Args) -> Result<App, Box<dyn Error>> {
    let config = FlowConfig::load(&args.config)?;
    let default_language = config.locale.default_language.clone();

    let mut locale = match &args.locale {
        Some(path) => Localizer::load(path, &default_language)?,
        None => Localizer::from_csv(BUNDLED_TABLE, &default_language)?,
    };
    if let Some(language) = &args.language {
        locale.set_language(language);
    }

    Ok(App::new(config, locale))
}

/// Whether the current screen would hear `control` right now.
fn is_listening(
    app: &App,
    control: Control,
) -> bool {
    app.current()
        .and_then(|id| app.screens().get(id))
        .is_some_and(|screen| screen.is_interactive() && screen.bindings().contains(control))
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut app = build_app(args)?;

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(args.scale.max(1)).build();
    let mut window = Window::new("GOLFIN", &output_settings);

    display.clear(Rgb565::BLACK).ok();
    window.update(&display);

    app.start();
    info!(language = app.locale().current_language(), "Simulator started");

    let mut buttons = Buttons::new();
    let mut show_journal = args.journal;
    let mut shown = app.current();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).min(MAX_FRAME_DELTA);
        last_frame = frame_start;

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keymap::map(keycode) {
                        Some(Key::Control(control)) if is_listening(&app, control) => buttons.press_down(control),
                        Some(Key::ToggleJournal) => {
                            show_journal = !show_journal;
                            debug!(show_journal, "Journal overlay toggled");
                        }
                        Some(Key::Quit) => return Ok(()),
                        Some(Key::Control(_)) | None => {}
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(Key::Control(control)) = keymap::map(keycode)
                        && buttons.release(control)
                    {
                        app.press(control);
                    }
                }
                _ => {}
            }
        }

        app.tick(dt);
        buttons.update(dt);

        // A held button belongs to the screen it was pressed on.
        if app.current() != shown {
            shown = app.current();
            buttons.release_all();
        }

        draw_flow(&mut display, &app, &buttons);
        if show_journal {
            draw_journal(&mut display, &app);
        }
        window.update(&display);

        let busy = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(busy) {
            thread::sleep(remaining);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use golfin_screen_flow::TextLookup;

    #[test]
    fn test_bundled_table_parses() {
        let locale = Localizer::from_csv(BUNDLED_TABLE, "en").unwrap();
        assert_eq!(locale.available_languages(), ["en", "ja", "es"]);
        assert_eq!(locale.text("splash_start"), "START");
    }

    #[test]
    fn test_bundled_table_covers_default_tips() {
        let locale = Localizer::from_csv(BUNDLED_TABLE, "en").unwrap();
        for key in FlowConfig::default().tips.keys {
            assert!(!locale.text(&key).starts_with('['), "Missing tip {key}");
        }
    }

    #[test]
    fn test_bundled_table_formats_tip_counter() {
        let mut locale = Localizer::from_csv(BUNDLED_TABLE, "en").unwrap();
        assert_eq!(locale.format("tip_counter", &[&2, &8]), "TIP 2/8");
        locale.set_language("es");
        assert_eq!(locale.format("tip_counter", &[&2, &8]), "CONSEJO 2/8");
        assert_eq!(locale.text("settings_off"), "NO");
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["simulator"]);
        assert_eq!(args.config, PathBuf::from("golfin.toml"));
        assert_eq!(args.scale, 2);
        assert!(args.locale.is_none());
        assert!(!args.journal);
    }

    #[test]
    fn test_build_app_with_missing_config_uses_defaults() {
        let args = Args::parse_from(["simulator", "--config", "/nonexistent/golfin.toml", "--language", "es"]);
        let app = build_app(&args).unwrap();
        assert_eq!(app.config(), &FlowConfig::default());
        assert_eq!(app.locale().current_language(), "es");
    }

    #[test]
    fn test_nothing_listens_before_start() {
        let args = Args::parse_from(["simulator", "--config", "/nonexistent/golfin.toml"]);
        let app = build_app(&args).unwrap();
        assert!(!is_listening(&app, Control::Start));
    }
}
