pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod display;
pub(crate) mod info;
pub(crate) mod lookup;
pub(crate) mod request;

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max).collect()
    }
}
