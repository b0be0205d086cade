//! Shared text formatting helpers.

/// Wraps highlighted character ranges of `text` in square brackets.
///
/// Ranges are `(start, end)` character indices with exclusive end, as produced
/// by the fuzzy matcher. Ranges past the end of `text` are clipped.
///
/// # Example
///
/// ```rust
/// use contactbook::ui::helpers::highlight;
///
/// assert_eq!(highlight("Grace Hopper", &[(0, 2), (6, 7)]), "[Gr]ace [H]opper");
/// ```
#[must_use]
pub fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());
        out.extend(&chars[pos..start]);
        if end > start {
            out.push('[');
            out.extend(&chars[start..end]);
            out.push(']');
        }
        pos = end;
    }
    out.extend(&chars[pos..]);
    out
}

/// Pads or truncates `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text}{}", " ".repeat(width - count))
    } else if width <= 3 {
        text.chars().take(width).collect()
    } else {
        let mut cut: String = text.chars().take(width - 3).collect();
        cut.push_str("...");
        cut
    }
}
