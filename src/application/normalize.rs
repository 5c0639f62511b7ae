//! Rewrite Windows `tree /F` ASCII art into the Unicode connectors the parser reads.

use std::borrow::Cow;

use tracing::instrument;

/// ASCII sequence and its canonical replacement, applied in order.
pub const ASCII_DECORATIONS: [(&str, &str); 3] =
    [("+---", "├──"), ("\\---", "└──"), ("|   ", "│   ")];

/// Normalize line endings and ASCII tree decoration.
///
/// Canonical input passes through unchanged.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn normalize_decorations(text: &str) -> String {
    let mut out: Cow<'_, str> = if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    };
    for (ascii, unicode) in ASCII_DECORATIONS {
        if out.contains(ascii) {
            out = Cow::Owned(out.replace(ascii, unicode));
        }
    }
    out.into_owned()
}
