//! Discord reply helpers

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Clamp reply text to the Discord message limit (UTF-8 safe).
///
/// Oversized text is cut at a character boundary and marked with an
/// ellipsis line so a truncated roster listing is recognizable as such.
pub fn truncate_for_message(text: &str) -> String {
    const MARKER: &str = "\n…";
    if text.len() <= MESSAGE_LIMIT {
        return text.to_string();
    }

    let budget = MESSAGE_LIMIT - MARKER.len();
    let mut cut = budget;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    // Prefer cutting at the last complete line
    let cut = text[..cut].rfind('\n').unwrap_or(cut);
    format!("{}{MARKER}", &text[..cut])
}
