//! Color constants for the GOLFIN flow.
//!
//! Colors are kept as `Rgb888` so they round-trip exactly to the `#RRGGBB`
//! strings used by highlight markup. Hosts drawing to an RGB565 panel convert
//! with `Rgb565::from(color)`.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Target of every fade.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Default text color.
pub const WHITE: Rgb888 = Rgb888::WHITE;

// =============================================================================
// Brand Colors
// =============================================================================

/// Gold used for `{gold}...{/gold}` highlights in tips and labels (#C8B830).
pub const GOLD: Rgb888 = Rgb888::new(0xC8, 0xB8, 0x30);

/// Loading bar fill at 0% (#2080E0).
pub const BAR_START: Rgb888 = Rgb888::new(0x20, 0x80, 0xE0);

/// Loading bar fill at 100% (#40A0FF).
pub const BAR_END: Rgb888 = Rgb888::new(0x40, 0xA0, 0xFF);

// =============================================================================
// Color Helpers
// =============================================================================

/// Linear interpolation between two colors, per channel.
pub fn lerp_rgb888(
    from: Rgb888,
    to: Rgb888,
    t: f32,
) -> Rgb888 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| -> u8 {
        let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb888::new(channel(from.r(), to.r()), channel(from.g(), to.g()), channel(from.b(), to.b()))
}

/// Multiply each channel by `factor` (used for pressed-state tinting).
pub fn scale_rgb888(
    color: Rgb888,
    factor: f32,
) -> Rgb888 {
    lerp_rgb888(BLACK, color, factor)
}

/// Apply screen opacity by blending toward black.
#[inline]
pub fn with_opacity(
    color: Rgb888,
    opacity: f32,
) -> Rgb888 {
    lerp_rgb888(BLACK, color, opacity)
}

/// Uppercase `RRGGBB` hex string for markup.
pub fn hex(color: Rgb888) -> heapless::String<6> {
    use core::fmt::Write;

    let mut out = heapless::String::new();
    let _ = write!(out, "{:02X}{:02X}{:02X}", color.r(), color.g(), color.b());
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_hex() {
        assert_eq!(hex(GOLD).as_str(), "C8B830");
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb888(BAR_START, BAR_END, 0.0), BAR_START);
        assert_eq!(lerp_rgb888(BAR_START, BAR_END, 1.0), BAR_END);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp_rgb888(BLACK, WHITE, 0.5);
        assert_eq!(mid, Rgb888::new(128, 128, 128));
    }

    #[test]
    fn test_with_opacity_zero_is_black() {
        assert_eq!(with_opacity(GOLD, 0.0), BLACK);
        assert_eq!(with_opacity(GOLD, 1.0), GOLD);
    }

    #[test]
    fn test_scale_tint() {
        let tinted = scale_rgb888(Rgb888::new(200, 100, 0), 0.85);
        assert_eq!(tinted, Rgb888::new(170, 85, 0));
    }
}
