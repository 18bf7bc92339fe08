use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `s` in terminal cells. Tabs count as 4.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Cut `s` down to at most `max_cells`, ending with `…` when anything was
/// dropped. Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Right-pad `s` with spaces to `cells` columns
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let w = display_width(s);
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(w)));
    out
}

/// Byte offset of the grapheme boundary after `offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(offset + g.len())
}

/// Byte offset of the grapheme boundary before `offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(offset - g.len())
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" { 4 } else { UnicodeWidthStr::width(g) }
}
