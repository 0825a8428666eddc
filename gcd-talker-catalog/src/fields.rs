//! Parsers for GCD free-text columns: key dates, prices, character and genre lists.

/// Day/month/year parts of a GCD key date. Unknown parts are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDate {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Parse a GCD `key_date` (`YYYY-MM-DD`, `00` for unknown parts).
///
/// ```
/// use gcd_talker_catalog::parse_key_date;
///
/// let d = parse_key_date("1963-03-00");
/// assert_eq!(d.year, Some(1963));
/// assert_eq!(d.month, Some(3));
/// assert_eq!(d.day, None);
/// ```
pub fn parse_key_date(key_date: &str) -> KeyDate {
    let mut parts = key_date.trim().split('-');
    let year = parts
        .next()
        .and_then(|p| p.trim().parse::<i32>().ok())
        .filter(|y| *y > 0);
    let month = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m));
    let day = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|d| (1..=31).contains(d));
    KeyDate { day, month, year }
}

/// Pick the price in the preferred currency from a GCD price list.
///
/// Prices read `0.10 USD; 0.12 CAD`. The last entry ending with `currency`
/// (case-insensitive) wins, matching how the list is scanned in order.
pub fn parse_price(price: &str, currency: &str) -> Option<f64> {
    let currency = currency.trim().to_lowercase();
    let mut found = None;
    for entry in price.split(';') {
        let entry = entry.trim();
        if entry.is_empty() || !entry.to_lowercase().ends_with(&currency) {
            continue;
        }
        if let Some(value) = leading_number(entry) {
            found = Some(value);
        }
    }
    found
}

/// Parse the first token containing a digit, keeping only digits and dots.
fn leading_number(entry: &str) -> Option<f64> {
    let token = entry
        .split_whitespace()
        .find(|t| t.bytes().any(|b| b.is_ascii_digit()))?;
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Split a GCD character list on `;`, ignoring separators inside `[...]`
/// (team member lists use them: `X-Men [Cyclops; Marvel Girl]`).
pub fn split_characters(characters: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;

    for ch in characters.chars() {
        match ch {
            '[' => {
                depth += 1;
                current.push(ch);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ';' if depth == 0 => {
                push_trimmed(&mut result, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_trimmed(&mut result, &current);
    result
}

/// Split a `;`-separated genre list and capitalize each entry.
pub fn split_genres(genres: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for genre in genres.split(';') {
        let genre = capitalize(genre.trim());
        if !genre.is_empty() && !result.contains(&genre) {
            result.push(genre);
        }
    }
    result
}

fn push_trimmed(out: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !out.iter().any(|v| v == value) {
        out.push(value.to_string());
    }
}

/// First character upper-case, the rest lower-case.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
