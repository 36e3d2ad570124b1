//! Inline highlight markup.
//!
//! Localized strings mark emphasized words as `{gold}word{/gold}`. Renderers
//! either consume [`spans`] directly or ask for [`rich_text`], which swaps the
//! tags for `<color=#RRGGBB>` / `</color>` rich-text tags.

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::hex;

/// Opening highlight tag.
pub const OPEN_TAG: &str = "{gold}";

/// Closing highlight tag.
pub const CLOSE_TAG: &str = "{/gold}";

/// A run of text that is either highlighted or plain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Split marked-up text into spans. Empty runs are omitted.
///
/// An opening tag without a closing tag highlights to the end of the text.
/// A stray closing tag is dropped.
pub fn spans(input: &str) -> Vec<Span<'_>> {
    let mut out = Vec::new();
    let mut rest = input;
    let mut highlighted = false;

    loop {
        let tag = if highlighted { CLOSE_TAG } else { OPEN_TAG };
        let next_open = rest.find(OPEN_TAG);
        let next_close = rest.find(CLOSE_TAG);

        // A stray closing tag outside a highlight is removed.
        if !highlighted
            && let Some(close) = next_close
            && next_open.is_none_or(|open| close < open)
        {
            push_span(&mut out, &rest[..close], false);
            rest = &rest[close + CLOSE_TAG.len()..];
            continue;
        }

        match rest.find(tag) {
            Some(pos) => {
                push_span(&mut out, &rest[..pos], highlighted);
                rest = &rest[pos + tag.len()..];
                highlighted = !highlighted;
            }
            None => {
                push_span(&mut out, rest, highlighted);
                break;
            }
        }
    }

    out
}

fn push_span<'a>(
    out: &mut Vec<Span<'a>>,
    text: &'a str,
    highlighted: bool,
) {
    if !text.is_empty() {
        out.push(Span { text, highlighted });
    }
}

/// Replace highlight tags with rich-text color tags.
pub fn rich_text(
    input: &str,
    color: Rgb888,
) -> String {
    let open = format!("<color=#{}>", hex(color));
    input.replace(OPEN_TAG, &open).replace(CLOSE_TAG, "</color>")
}

/// Remove highlight tags, keeping the text.
pub fn plain(input: &str) -> String { input.replace(OPEN_TAG, "").replace(CLOSE_TAG, "") }

// =============================================================================
// Unit Tests
// =============================================================================
