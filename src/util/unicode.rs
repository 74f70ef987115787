use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Keep the first `max_chars` grapheme clusters of `s`, appending `ellipsis`
/// only when something was cut. Emoji and combining marks are never split.
pub fn truncate_chars(s: &str, max_chars: usize, ellipsis: &str) -> String {
    let mut graphemes = s.graphemes(true);
    let head: String = graphemes.by_ref().take(max_chars).collect();
    if graphemes.next().is_some() {
        format!("{}{}", head, ellipsis)
    } else {
        head
    }
}

/// Pad `s` with trailing spaces to `width` terminal cells.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

/// Right-align `s` within `width` terminal cells.
pub fn pad_left_to_width(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}
