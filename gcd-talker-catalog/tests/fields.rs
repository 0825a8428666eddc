use gcd_talker_catalog::*;

#[test]
fn full_key_date() {
    let d = parse_key_date("1986-02-15");
    assert_eq!(d, KeyDate { day: Some(15), month: Some(2), year: Some(1986) });
}

#[test]
fn key_date_unknown_parts() {
    let d = parse_key_date("1986-00-00");
    assert_eq!(d, KeyDate { day: None, month: None, year: Some(1986) });
    assert_eq!(parse_key_date("1986").year, Some(1986));
    assert_eq!(parse_key_date(""), KeyDate::default());
    assert_eq!(parse_key_date("garbage"), KeyDate::default());
}

#[test]
fn price_in_preferred_currency() {
    assert_eq!(parse_price("0.75 USD; 1.00 CAD", "USD"), Some(0.75));
    assert_eq!(parse_price("0.75 USD; 1.00 CAD", "cad"), Some(1.0));
    assert_eq!(parse_price("0.75 USD; 1.00 CAD", "EUR"), None);
}

#[test]
fn price_last_matching_entry_wins() {
    assert_eq!(parse_price("0.75 USD; 0.95 USD", "USD"), Some(0.95));
}

#[test]
fn price_without_number() {
    assert_eq!(parse_price("free USD", "USD"), None);
    assert_eq!(parse_price("", "USD"), None);
}

#[test]
fn characters_respect_brackets() {
    let chars = split_characters("X-Men [Cyclops; Marvel Girl]; Magneto; Magneto");
    assert_eq!(chars, vec!["X-Men [Cyclops; Marvel Girl]", "Magneto"]);
}

#[test]
fn characters_empty() {
    assert!(split_characters("").is_empty());
    assert!(split_characters(" ; ").is_empty());
}

#[test]
fn genres_capitalized_and_deduped() {
    let genres = split_genres("superhero; SCIENCE FICTION;superhero");
    assert_eq!(genres, vec!["Superhero", "Science fiction"]);
}

#[test]
fn add_credit_dedups() {
    let mut md = ComicMetadata::default();
    md.add_credit("Stan Lee", "script");
    md.add_credit("stan lee", "Script");
    md.add_credit("Stan Lee", "editing");
    md.add_credit("  ", "pencils");
    assert_eq!(md.credits.len(), 2);
    assert_eq!(md.credits[0].person, "Stan Lee");
    assert!(!md.credits[0].primary);
}

#[test]
fn empty_metadata() {
    let mut md = ComicMetadata::default();
    assert!(md.is_empty());
    md.title = Some("x".to_string());
    assert!(!md.is_empty());
}
