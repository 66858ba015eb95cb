//! Display-width text helpers for labels.

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marker appended to truncated labels.
pub const ELLIPSIS: char = '…';

/// Display width of `text` in terminal columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` to at most `max_width` columns, ending with an ellipsis
/// when anything was cut. Grapheme clusters are never split.
pub fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(text) <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut out = String::with_capacity(text.len().min(max_width * 4));
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme);
        if used + width > budget {
            break;
        }
        out.push_str(grapheme);
        used += width;
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Label for an answer option: `A` to `Z`, then 1-based numbers.
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}
