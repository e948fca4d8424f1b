//! Size-bounded chunking with layered separators
//!
//! A section that fits in one chunk passes through untouched. An oversize
//! section is cut into windows of at most `chunk_size` characters, each
//! window preferring the largest boundary available inside it: paragraph
//! break, then line break, then space, then a hard character cut. The next
//! window starts `chunk_overlap` characters before the previous cut so
//! consecutive chunks share exactly that much context.
//!
//! All arithmetic is in characters, not bytes.

/// Separator ladder, largest boundary first
const SEPARATORS: &[&[char]] = &[&['\n', '\n'], &['\n'], &[' ']];

/// Splits text into pieces of at most `chunk_size` characters
///
/// `chunk_overlap` must be smaller than `chunk_size` (enforced at
/// configuration load). Interior cut points always leave the following
/// piece starting exactly `chunk_overlap` characters before the cut.
pub fn split_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    debug_assert!(chunk_overlap < chunk_size);

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut start = 0;

    loop {
        let window_end = (start + chunk_size).min(chars.len());
        let end = if window_end < chars.len() {
            find_cut(&chars, start, window_end, chunk_overlap)
        } else {
            window_end
        };

        pieces.push(chars[start..end].iter().collect());

        if end == chars.len() {
            break;
        }
        start = end - chunk_overlap;
    }

    pieces
}

/// Picks the best cut position in `(start, window_end]`
///
/// Tries each separator tier in order and accepts the rightmost occurrence
/// whose cut still advances past the overlap (otherwise the next window
/// would not make progress). Falls back to a hard cut at the window end.
fn find_cut(chars: &[char], start: usize, window_end: usize, overlap: usize) -> usize {
    for separator in SEPARATORS {
        if let Some(cut) = last_separator_cut(chars, start, window_end, separator) {
            if cut - start > overlap {
                return cut;
            }
        }
    }
    window_end
}

/// Rightmost position in `(start, window_end]` immediately after `separator`
fn last_separator_cut(
    chars: &[char],
    start: usize,
    window_end: usize,
    separator: &[char],
) -> Option<usize> {
    let width = separator.len();
    let mut cut = window_end;
    while cut > start + width {
        if &chars[cut - width..cut] == separator {
            return Some(cut);
        }
        cut -= 1;
    }
    None
}
