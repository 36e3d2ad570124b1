//! Drawing the flow onto the simulator display.
//!
//! Every screen that is not hidden is drawn with its colors blended toward
//! black by its opacity, which is how the crossfade shows up on a panel with
//! no alpha channel.
//!
//! # Layout (320x240)
//!
//! ```text
//! Loading                               Splash / Home / Settings
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │         NOW LOADING          │      │ GOLFIN                 [SET] │
//! │ ┌──────────────────────────┐ │      │                              │
//! │ │ PRO TIP                  │ │      │        ┌──────────┐          │
//! │ │ Keep your club bag full  │ │      │        │  START   │          │
//! │ │         TAP FOR NEXT TIP │ │      │        └──────────┘          │
//! │ └──────────────────────────┘ │      │                              │
//! │ ██████████▌                  │      ├───────┬───────┬───────┬──────┤
//! │ 133.50 / 267 MB              │      │ HOME  │ SHOP  │ PLAY  │ PROF │
//! └──────────────────────────────┘      └───────┴───────┴───────┴──────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use embedded_graphics_simulator::SimulatorDisplay;
use golfin_screen_flow::colors::{BLACK, GOLD, WHITE, with_opacity};
use golfin_screen_flow::journal::Journal;
use golfin_screen_flow::localization::highlight::Span;
use golfin_screen_flow::screens::{LoadingScreen, SettingsScreen};
use golfin_screen_flow::widgets::PressFeedback;
use golfin_screen_flow::{AnyScreen, App, Control, Localizer, ScreenId, Visibility};
use heapless::String;
use profont::PROFONT_24_POINT;

use crate::buttons::Buttons;

pub const SCREEN_WIDTH: u32 = 320;
pub const SCREEN_HEIGHT: u32 = 240;

const CENTER_X: i32 = SCREEN_WIDTH as i32 / 2;
const CHAR_WIDTH: i32 = 6;
const LINE_HEIGHT: i32 = 12;

const GRAY: Rgb888 = Rgb888::new(0x60, 0x60, 0x60);
const PANEL: Rgb888 = Rgb888::new(0x18, 0x30, 0x20);
const ORANGE: Rgb888 = Rgb888::new(0xFF, 0xA0, 0x20);
const GREEN: Rgb888 = Rgb888::new(0x40, 0xE0, 0x60);

const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();
const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();
const RIGHT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Top)
    .build();

// Loading
const TIP_CARD: Rectangle = Rectangle::new(Point::new(16, 48), Size::new(288, 104));
const TIP_TEXT_COLUMNS: usize = 44;
const BAR: Rectangle = Rectangle::new(Point::new(16, 176), Size::new(288, 12));

// Splash
const START_BUTTON: Rectangle = Rectangle::new(Point::new(70, 130), Size::new(180, 34));
const CREATE_BUTTON: Rectangle = Rectangle::new(Point::new(70, 176), Size::new(180, 34));

// Home
const GEAR_BUTTON: Rectangle = Rectangle::new(Point::new(272, 6), Size::new(42, 22));
const NAV_Y: i32 = 200;
const NAV_WIDTH: u32 = SCREEN_WIDTH / 4;
const NAV_ITEMS: [(Control, &str); 4] = [
    (Control::NavHome, "nav_home"),
    (Control::NavShop, "nav_shop"),
    (Control::NavPlay, "nav_play"),
    (Control::NavProfile, "nav_profile"),
];

// Settings
const BACK_BUTTON: Rectangle = Rectangle::new(Point::new(6, 6), Size::new(30, 22));
const ROW_START_Y: i32 = 48;
const ROW_HEIGHT: i32 = 36;

// Journal overlay
const JOURNAL_AREA: Rectangle = Rectangle::new(Point::new(0, 120), Size::new(SCREEN_WIDTH, 120));
const JOURNAL_LINES: usize = 8;

/// Color for a screen drawn at `opacity`.
#[inline]
fn rgb(
    color: Rgb888,
    opacity: f32,
) -> Rgb565 {
    Rgb565::from(with_opacity(color, opacity))
}

fn label<'a>(
    screen: &'a dyn AnyScreen,
    key: &str,
) -> &'a str {
    screen.labels().and_then(|labels| labels.text(key)).unwrap_or_default()
}

/// Draw every visible or fading screen.
pub fn draw_flow(
    display: &mut SimulatorDisplay<Rgb565>,
    app: &App,
    buttons: &Buttons,
) {
    display.clear(Rgb565::BLACK).ok();

    let screens = app.screens();
    for screen in screens.iter() {
        if screen.visibility() == Visibility::Hidden {
            continue;
        }
        let opacity = screen.opacity();

        match screen.id() {
            ScreenId::Logo => draw_logo(display, opacity),
            ScreenId::Loading => {
                if let Some(loading) = screens.loading() {
                    draw_loading(display, screen, loading.hooks(), app.locale(), buttons, opacity);
                }
            }
            ScreenId::Splash => draw_splash(display, screen, buttons, opacity),
            ScreenId::Home => draw_home(display, screen, buttons, opacity),
            ScreenId::Settings => {
                if let Some(settings) = screens.settings() {
                    let language = app.locale().current_language();
                    draw_settings(display, screen, settings.hooks(), language, buttons, opacity);
                }
            }
        }
    }
}

fn draw_logo(
    display: &mut SimulatorDisplay<Rgb565>,
    opacity: f32,
) {
    let style = MonoTextStyle::new(&PROFONT_24_POINT, rgb(GOLD, opacity));
    Text::with_text_style("GOLFIN", Point::new(CENTER_X, 120), style, CENTERED)
        .draw(display)
        .ok();
}

fn draw_loading(
    display: &mut SimulatorDisplay<Rgb565>,
    screen: &dyn AnyScreen,
    loading: &LoadingScreen,
    locale: &Localizer,
    buttons: &Buttons,
    opacity: f32,
) {
    let title = MonoTextStyle::new(&FONT_10X20, rgb(WHITE, opacity));
    Text::with_text_style(label(screen, "loading_now"), Point::new(CENTER_X, 26), title, CENTERED)
        .draw(display)
        .ok();

    // Tip card
    let card_feedback = buttons.get(Control::TipCard);
    let card = scaled(TIP_CARD, card_feedback);
    card.into_styled(PrimitiveStyle::with_stroke(rgb(card_feedback.tint(GOLD), opacity), 1))
        .draw(display)
        .ok();

    let header = MonoTextStyle::new(&FONT_6X10, rgb(GOLD, opacity));
    Text::with_text_style(label(screen, "tip_header"), card.top_left + Point::new(8, 8), header, LEFT_TOP)
        .draw(display)
        .ok();

    let carousel = loading.carousel();
    if !carousel.is_empty() {
        let counter = locale.format("tip_counter", &[&(carousel.index() + 1), &carousel.len()]);
        let counter_position = card.top_left + Point::new(card.size.width as i32 - 8, 8);
        Text::with_text_style(&counter, counter_position, header, RIGHT_TOP)
            .draw(display)
            .ok();
    }

    draw_rich_text(
        display,
        &carousel.spans(),
        card.top_left + Point::new(8, 28),
        TIP_TEXT_COLUMNS,
        opacity * carousel.opacity(),
    );

    let hint = MonoTextStyle::new(&FONT_6X10, rgb(GRAY, opacity));
    let hint_position = card.top_left + Point::new(card.size.width as i32 - 8, card.size.height as i32 - 16);
    Text::with_text_style(label(screen, "tip_next"), hint_position, hint, RIGHT_TOP)
        .draw(display)
        .ok();

    // Progress bar
    let bar = loading.bar();
    BAR.into_styled(PrimitiveStyle::with_stroke(rgb(GRAY, opacity), 1))
        .draw(display)
        .ok();
    let fill_width = (bar.fill() * BAR.size.width as f32).round() as u32;
    if fill_width > 0 {
        Rectangle::new(BAR.top_left, Size::new(fill_width, BAR.size.height))
            .into_styled(PrimitiveStyle::with_fill(rgb(bar.color(), opacity)))
            .draw(display)
            .ok();
    }
    if bar.glow_visible() {
        let x = BAR.top_left.x + bar.glow_offset(BAR.size.width);
        Line::new(Point::new(x, BAR.top_left.y - 2), Point::new(x, BAR.top_left.y + BAR.size.height as i32 + 1))
            .into_styled(PrimitiveStyle::with_stroke(rgb(WHITE, opacity), 2))
            .draw(display)
            .ok();
    }

    let download = MonoTextStyle::new(&FONT_6X10, rgb(WHITE, opacity));
    Text::with_text_style(
        &loading.download_label(),
        Point::new(BAR.top_left.x, BAR.top_left.y + 20),
        download,
        LEFT_TOP,
    )
    .draw(display)
    .ok();
}

fn draw_splash(
    display: &mut SimulatorDisplay<Rgb565>,
    screen: &dyn AnyScreen,
    buttons: &Buttons,
    opacity: f32,
) {
    let style = MonoTextStyle::new(&PROFONT_24_POINT, rgb(GOLD, opacity));
    Text::with_text_style("GOLFIN", Point::new(CENTER_X, 70), style, CENTERED)
        .draw(display)
        .ok();

    draw_button(display, START_BUTTON, label(screen, "splash_start"), buttons.get(Control::Start), GOLD, opacity);
    draw_button(
        display,
        CREATE_BUTTON,
        label(screen, "splash_create_account"),
        buttons.get(Control::CreateAccount),
        GRAY,
        opacity,
    );
}

fn draw_home(
    display: &mut SimulatorDisplay<Rgb565>,
    screen: &dyn AnyScreen,
    buttons: &Buttons,
    opacity: f32,
) {
    let title = MonoTextStyle::new(&FONT_10X20, rgb(GOLD, opacity));
    Text::with_text_style("GOLFIN", Point::new(8, 8), title, LEFT_TOP)
        .draw(display)
        .ok();
    draw_button(display, GEAR_BUTTON, "SET", buttons.get(Control::Settings), GRAY, opacity);

    Rectangle::new(Point::new(16, 48), Size::new(SCREEN_WIDTH - 32, 136))
        .into_styled(PrimitiveStyle::with_fill(rgb(PANEL, opacity)))
        .draw(display)
        .ok();

    for (i, (control, key)) in NAV_ITEMS.into_iter().enumerate() {
        let area = Rectangle::new(Point::new(i as i32 * NAV_WIDTH as i32, NAV_Y), Size::new(NAV_WIDTH, 40));
        // Home is the tab being shown; it has no listener.
        let fill = if control == Control::NavHome { GOLD } else { GRAY };
        draw_button(display, area, label(screen, key), buttons.get(control), fill, opacity);
    }
}

fn draw_settings(
    display: &mut SimulatorDisplay<Rgb565>,
    screen: &dyn AnyScreen,
    settings: &SettingsScreen,
    language: &str,
    buttons: &Buttons,
    opacity: f32,
) {
    draw_button(display, BACK_BUTTON, "<", buttons.get(Control::Back), GRAY, opacity);

    let title = MonoTextStyle::new(&FONT_10X20, rgb(WHITE, opacity));
    Text::with_text_style(label(screen, "settings_title"), Point::new(CENTER_X, 17), title, CENTERED)
        .draw(display)
        .ok();

    let toggles = [
        (Control::SoundToggle, "settings_sound", settings.sound()),
        (Control::MusicToggle, "settings_music", settings.music()),
        (Control::NotificationsToggle, "settings_notifications", settings.notifications()),
    ];
    for (row, (control, key, on)) in toggles.into_iter().enumerate() {
        let y = ROW_START_Y + row as i32 * ROW_HEIGHT;
        draw_row_label(display, label(screen, key), y, opacity);
        let fill = if on { GOLD } else { GRAY };
        let area = Rectangle::new(Point::new(244, y), Size::new(60, 24));
        let state = settings.state_text(control).unwrap_or_default();
        draw_button(display, area, state, buttons.get(control), fill, opacity);
    }

    let y = ROW_START_Y + 3 * ROW_HEIGHT;
    draw_row_label(display, label(screen, "settings_language"), y, opacity);
    let mut code: String<8> = String::new();
    for c in language.chars().take(8) {
        let _ = code.push(c.to_ascii_uppercase());
    }
    let area = Rectangle::new(Point::new(244, y), Size::new(60, 24));
    draw_button(display, area, &code, buttons.get(Control::Language), GOLD, opacity);
}

fn draw_row_label(
    display: &mut SimulatorDisplay<Rgb565>,
    text: &str,
    y: i32,
    opacity: f32,
) {
    let style = MonoTextStyle::new(&FONT_6X10, rgb(WHITE, opacity));
    Text::with_text_style(text, Point::new(16, y + 7), style, LEFT_TOP)
        .draw(display)
        .ok();
}

/// Black on light fills, white on dark ones (BT.601 luminance).
fn label_color_for(fill: Rgb888) -> Rgb888 {
    let luma = (299 * u32::from(fill.r()) + 587 * u32::from(fill.g()) + 114 * u32::from(fill.b())) / 1000;
    if luma < 128 { WHITE } else { BLACK }
}

/// `area` shrunk around its center by the press feedback.
fn scaled(
    area: Rectangle,
    feedback: &PressFeedback,
) -> Rectangle {
    let scale = feedback.scale();
    let size = Size::new(
        (area.size.width as f32 * scale).round() as u32,
        (area.size.height as f32 * scale).round() as u32,
    );
    Rectangle::with_center(area.center(), size)
}

fn draw_button(
    display: &mut SimulatorDisplay<Rgb565>,
    area: Rectangle,
    text: &str,
    feedback: &PressFeedback,
    fill: Rgb888,
    opacity: f32,
) {
    let area = scaled(area, feedback);
    area.into_styled(PrimitiveStyle::with_fill(rgb(feedback.tint(fill), opacity)))
        .draw(display)
        .ok();

    let style = MonoTextStyle::new(&FONT_6X10, rgb(label_color_for(fill), opacity));
    Text::with_text_style(text, area.center(), style, CENTERED)
        .draw(display)
        .ok();
}

/// Word-wrapped highlight spans. Highlighted runs are drawn in gold.
fn draw_rich_text(
    display: &mut SimulatorDisplay<Rgb565>,
    spans: &[Span<'_>],
    origin: Point,
    max_columns: usize,
    opacity: f32,
) {
    let mut column = 0usize;
    let mut row = 0i32;

    for span in spans {
        let color = if span.highlighted { GOLD } else { WHITE };
        let style = MonoTextStyle::new(&FONT_6X10, rgb(color, opacity));

        for (i, word) in span.text.split(' ').enumerate() {
            if i > 0 {
                column += 1;
            }
            if word.is_empty() {
                continue;
            }

            let length = word.chars().count();
            if column > 0 && column + length > max_columns {
                row += 1;
                column = 0;
            }

            let position = origin + Point::new(column as i32 * CHAR_WIDTH, row * LINE_HEIGHT);
            Text::with_text_style(word, position, style, LEFT_TOP)
                .draw(display)
                .ok();
            column += length;
        }
    }
}

/// Terminal-style overlay with the most recent lifecycle events.
pub fn draw_journal(
    display: &mut SimulatorDisplay<Rgb565>,
    app: &App,
) {
    JOURNAL_AREA
        .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
        .draw(display)
        .ok();
    let top = JOURNAL_AREA.top_left.y;
    Line::new(Point::new(0, top), Point::new(SCREEN_WIDTH as i32 - 1, top))
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::from(GRAY), 1))
        .draw(display)
        .ok();

    let header_style = MonoTextStyle::new(&FONT_6X10, Rgb565::from(GREEN));
    let mut header: String<64> = String::new();
    let current = app.current().map_or("none", ScreenId::name);
    let _ = write!(
        header,
        "JOURNAL  {current}  {:.1}s  {}",
        app.elapsed().as_secs_f32(),
        app.locale().current_language()
    );
    Text::with_text_style(&header, Point::new(4, top + 4), header_style, LEFT_TOP)
        .draw(display)
        .ok();

    draw_journal_lines(display, app.journal(), top + 18);
}

fn draw_journal_lines(
    display: &mut SimulatorDisplay<Rgb565>,
    journal: &Journal,
    start_y: i32,
) {
    let prompt_style = MonoTextStyle::new(&FONT_6X10, Rgb565::from(GREEN));
    let text_style = MonoTextStyle::new(&FONT_6X10, Rgb565::from(ORANGE));

    let skip = journal.len().saturating_sub(JOURNAL_LINES);
    for (i, line) in journal.lines().skip(skip).enumerate() {
        let y = start_y + i as i32 * LINE_HEIGHT;
        Text::with_text_style(">", Point::new(4, y), prompt_style, LEFT_TOP)
            .draw(display)
            .ok();
        Text::with_text_style(&line, Point::new(16, y), text_style, LEFT_TOP)
            .draw(display)
            .ok();
    }
}
