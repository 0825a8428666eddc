use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gcd_talker_lib::talker::{ABOUT, ATTRIBUTION, ID, LOGO_URL, NAME, WEBSITE};

/// Show the data source description and attribution.
pub(crate) fn run_info() {
    log::info!(
        "{} {}",
        NAME.if_supports_color(Stdout, |t| t.bold()),
        format!("({ID})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Website: {}", WEBSITE.if_supports_color(Stdout, |t| t.cyan()));
    log::info!("  Logo:    {}", LOGO_URL);
    crate::log_blank();
    log::info!("{}", strip_tags(ABOUT));
    log::info!("{}", strip_tags(ATTRIBUTION));
}

/// Drop HTML tags, keeping the text between them.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::strip_tags;

    #[test]
    fn strips_links() {
        assert_eq!(
            strip_tags("Data from <a href='https://www.comics.org/'>GCD</a> (CC)"),
            "Data from GCD (CC)"
        );
    }
}
