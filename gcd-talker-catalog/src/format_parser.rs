//! Classifier for the GCD `publishing_format` column.
//!
//! The column is free text ("Standard US comic; 32 pages", "limited series",
//! "Trade paperback collecting #1-6", ...). The host wants a short format label,
//! so the text is scanned for the first whole-word hit from a fixed vocabulary.

/// One step of a vocabulary entry.
#[derive(Debug)]
enum Piece {
    /// Literal text, compared ASCII case-insensitively.
    Text(&'static str),
    /// Optional single separator: any whitespace, plus the listed characters.
    Gap(&'static [char]),
    /// Matches whatever follows (the rest of a word like "collected").
    Rest,
}

#[derive(Debug)]
struct Entry {
    pieces: &'static [Piece],
    /// Fixed label, or `None` to title-case the matched text.
    label: Option<&'static str>,
}

const NO_EXTRA: &[char] = &[];
const HYPHEN: &[char] = &['-'];

/// Vocabulary, in priority order for hits starting at the same position.
const VOCABULARY: &[Entry] = &[
    Entry { pieces: &[Piece::Text("annual")], label: None },
    Entry { pieces: &[Piece::Text("album")], label: None },
    Entry { pieces: &[Piece::Text("anthology")], label: None },
    Entry { pieces: &[Piece::Text("collection")], label: Some("Collection") },
    Entry { pieces: &[Piece::Text("collect"), Piece::Rest], label: Some("Collection") },
    Entry { pieces: &[Piece::Text("graphic novel")], label: None },
    Entry { pieces: &[Piece::Text("hardcover")], label: None },
    Entry { pieces: &[Piece::Text("limited series")], label: None },
    Entry {
        pieces: &[Piece::Text("one"), Piece::Gap(HYPHEN), Piece::Text("shot")],
        label: None,
    },
    Entry { pieces: &[Piece::Text("preview")], label: None },
    Entry { pieces: &[Piece::Text("special")], label: None },
    Entry {
        pieces: &[Piece::Text("trade paper"), Piece::Gap(NO_EXTRA), Piece::Text("back")],
        label: None,
    },
    Entry {
        pieces: &[Piece::Text("web"), Piece::Gap(NO_EXTRA), Piece::Text("comic")],
        label: None,
    },
    Entry {
        pieces: &[Piece::Text("mini"), Piece::Gap(HYPHEN), Piece::Text("series")],
        label: None,
    },
];

/// Classify a publishing format string.
///
/// Returns the leftmost whole-word vocabulary hit, title-cased; any word
/// starting with "collect" yields `Collection`.
///
/// ```
/// use gcd_talker_catalog::match_format;
///
/// assert_eq!(match_format("limited series"), Some("Limited Series".to_string()));
/// assert_eq!(match_format("TPB collecting #1-6"), Some("Collection".to_string()));
/// assert_eq!(match_format("one shot"), Some("One Shot".to_string()));
/// assert_eq!(match_format("was ongoing"), None);
/// ```
pub fn match_format(format: &str) -> Option<String> {
    let chars: Vec<char> = format.chars().collect();

    for start in 0..chars.len() {
        if !is_boundary(&chars, start) {
            continue;
        }
        for entry in VOCABULARY {
            if let Some(end) = match_pieces(&chars, start, entry.pieces) {
                return Some(match entry.label {
                    Some(label) => label.to_string(),
                    None => title_case(&chars[start..end]),
                });
            }
        }
    }
    None
}

/// Try to match `pieces` at `pos`, requiring a word boundary at the end.
/// Optional gaps are tried greedily first.
fn match_pieces(chars: &[char], pos: usize, pieces: &[Piece]) -> Option<usize> {
    let Some((first, rest)) = pieces.split_first() else {
        return is_boundary(chars, pos).then_some(pos);
    };

    match first {
        Piece::Text(text) => {
            let mut cursor = pos;
            for expected in text.chars() {
                let actual = chars.get(cursor)?;
                let same = if expected == ' ' {
                    actual.is_whitespace()
                } else {
                    actual.to_ascii_lowercase() == expected
                };
                if !same {
                    return None;
                }
                cursor += 1;
            }
            match_pieces(chars, cursor, rest)
        }
        Piece::Gap(extra) => {
            let consumed = chars
                .get(pos)
                .is_some_and(|c| c.is_whitespace() || extra.contains(c));
            if consumed {
                if let Some(end) = match_pieces(chars, pos + 1, rest) {
                    return Some(end);
                }
            }
            match_pieces(chars, pos, rest)
        }
        // The remainder of a word always ends at some boundary.
        Piece::Rest => Some(chars.len()),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_boundary(chars: &[char], pos: usize) -> bool {
    let before = pos
        .checked_sub(1)
        .and_then(|i| chars.get(i))
        .is_some_and(|c| is_word_char(*c));
    let after = chars.get(pos).is_some_and(|c| is_word_char(*c));
    before != after
}

/// Upper-case the first letter of each alphabetic run, lower-case the rest.
fn title_case(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut prev_alpha = false;
    for &c in chars {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
