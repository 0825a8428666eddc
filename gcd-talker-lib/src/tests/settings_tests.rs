use super::*;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = TalkerSettings::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(settings, TalkerSettings::default());
    assert_eq!(settings.currency, "USD");
    assert!(settings.db_file.is_none());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "nn_is_issue_one = true\ndb_file = \"/data/gcd.db\"\n").unwrap();

    let settings = TalkerSettings::load_from(&path).unwrap();
    assert!(settings.nn_is_issue_one);
    assert!(!settings.combine_notes);
    assert_eq!(settings.db_file, Some(PathBuf::from("/data/gcd.db")));
    assert_eq!(settings.currency, "USD");
}

#[test]
fn test_malformed_file_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "nn_is_issue_one = \"maybe\"").unwrap();
    let err = TalkerSettings::load_from(&path).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let settings = TalkerSettings {
        db_file: Some(PathBuf::from("/tmp/gcd.db")),
        prefer_story_titles: true,
        currency: "GBP".to_string(),
        ..Default::default()
    };
    save_settings(&path, &settings).unwrap();
    assert_eq!(TalkerSettings::load_from(&path).unwrap(), settings);
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn test_set_setting_preserves_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "currency = \"CAD\"\nextra = 5\n").unwrap();

    set_setting(&path, "combine_notes", "true").unwrap();
    set_setting(&path, "db_file", "/srv/gcd.db").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("extra = 5"));
    let settings = TalkerSettings::load_from(&path).unwrap();
    assert!(settings.combine_notes);
    assert_eq!(settings.currency, "CAD");
    assert_eq!(settings.db_file, Some(PathBuf::from("/srv/gcd.db")));

    set_setting(&path, "db_file", "").unwrap();
    assert!(TalkerSettings::load_from(&path).unwrap().db_file.is_none());
}

#[test]
fn test_set_setting_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    let err = set_setting(&path, "colour", "blue").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    let err = set_setting(&path, "nn_is_issue_one", "yes").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(!path.exists());
}

#[test]
fn test_cli_override_wins() {
    let mut settings = TalkerSettings {
        db_file: Some(PathBuf::from("/from/file.db")),
        ..Default::default()
    };
    settings.resolve_db_file(Some(PathBuf::from("/from/cli.db")));
    assert_eq!(settings.db_file, Some(PathBuf::from("/from/cli.db")));
}

#[test]
fn test_every_key_is_settable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    for key in SETTING_KEYS {
        let value = match *key {
            "db_file" => "/x.db",
            "currency" => "EUR",
            _ => "true",
        };
        set_setting(&path, key, value).unwrap();
    }
    let settings = TalkerSettings::load_from(&path).unwrap();
    assert!(settings.download_tag_covers);
    assert_eq!(settings.currency, "EUR");
}
