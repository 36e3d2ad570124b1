//! Keyboard mapping for the simulator window.
//!
//! | Key         | Action                             |
//! |-------------|------------------------------------|
//! | A           | Splash START                       |
//! | C           | Splash CREATE ACCOUNT              |
//! | G           | Home settings (gear) button        |
//! | Q / W / E / R | Home nav: home / shop / play / profile |
//! | B           | Settings back arrow                |
//! | M / N / O   | Sound / music / notifications      |
//! | L           | Next language                      |
//! | T           | Loading tip card                   |
//! | J           | Toggle the journal overlay         |
//! | X           | Quit                               |
//!
//! Controls click on key release, so holding a key shows the pressed look.

use embedded_graphics_simulator::sdl2::Keycode;
use golfin_screen_flow::Control;

/// What a key does, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Control(Control),
    ToggleJournal,
    Quit,
}

pub fn map(keycode: Keycode) -> Option<Key> {
    let control = match keycode {
        Keycode::A => Control::Start,
        Keycode::C => Control::CreateAccount,
        Keycode::G => Control::Settings,
        Keycode::Q => Control::NavHome,
        Keycode::W => Control::NavShop,
        Keycode::E => Control::NavPlay,
        Keycode::R => Control::NavProfile,
        Keycode::B => Control::Back,
        Keycode::M => Control::SoundToggle,
        Keycode::N => Control::MusicToggle,
        Keycode::O => Control::NotificationsToggle,
        Keycode::L => Control::Language,
        Keycode::T => Control::TipCard,
        Keycode::J => return Some(Key::ToggleJournal),
        Keycode::X => return Some(Key::Quit),
        _ => return None,
    };
    Some(Key::Control(control))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_control_has_a_key() {
        let keys = [
            Keycode::A,
            Keycode::C,
            Keycode::G,
            Keycode::Q,
            Keycode::W,
            Keycode::E,
            Keycode::R,
            Keycode::B,
            Keycode::M,
            Keycode::N,
            Keycode::O,
            Keycode::L,
            Keycode::T,
        ];
        let mapped: Vec<_> = keys
            .into_iter()
            .filter_map(|k| match map(k) {
                Some(Key::Control(c)) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(mapped, Control::ALL.to_vec());
    }

    #[test]
    fn test_non_control_keys() {
        assert_eq!(map(Keycode::Z), None);
        assert_eq!(map(Keycode::J), Some(Key::ToggleJournal));
        assert_eq!(map(Keycode::X), Some(Key::Quit));
    }
}
