mod common;

use common::{FakeCovers, fixture_db, settings_for};
use gcd_talker_db::Connection;
use gcd_talker_lib::*;

fn talker(dir: &tempfile::TempDir) -> GcdTalker {
    GcdTalker::new(settings_for(&fixture_db(dir.path())))
}

fn series_ids(series: &[gcd_talker_catalog::ComicSeries]) -> Vec<&str> {
    series.iter().map(|s| s.id.as_str()).collect()
}

fn issue_ids(issues: &[gcd_talker_catalog::ComicMetadata]) -> Vec<&str> {
    issues.iter().filter_map(|i| i.issue_id.as_deref()).collect()
}

// ── Status ──────────────────────────────────────────────────────────────────

#[test]
fn check_status_of_fixture_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let status = talker.check_status(None);
    assert!(status.ok, "{}", status.message);

    let missing = dir.path().join("missing.db");
    let status = talker.check_status(Some(&missing));
    assert!(!status.ok);
    assert_eq!(status.message, "DB path does not exist");
}

#[test]
fn missing_database_is_path_error() {
    let dir = tempfile::tempdir().unwrap();
    let talker = GcdTalker::new(settings_for(&dir.path().join("missing.db")));
    let err = talker.search_for_series(&SeriesQuery::new("Batman")).unwrap_err();
    assert_eq!(err.code(), 3);
}

// ── Search ──────────────────────────────────────────────────────────────────

#[test]
fn search_ranks_exact_matches_first() {
    let dir = tempfile::tempdir().unwrap();
    let found = talker(&dir)
        .search_for_series(&SeriesQuery::new("batman"))
        .unwrap();
    assert_eq!(series_ids(&found), vec!["1", "7", "2", "4", "6"]);
    assert_eq!(found[0].publisher.as_deref(), Some("DC"));
    assert_eq!(found[0].start_year, Some(1940));
}

#[test]
fn literal_search_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let found = talker
        .search_for_series(&SeriesQuery::new("Batman").literal())
        .unwrap();
    assert_eq!(series_ids(&found), vec!["1", "7"]);
    assert!(talker
        .search_for_series(&SeriesQuery::new("batman").literal())
        .unwrap()
        .is_empty());
}

#[test]
fn search_filters_by_year() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let found = talker
        .search_for_series(&SeriesQuery::new("batman").with_year(2010))
        .unwrap();
    assert_eq!(series_ids(&found), vec!["1", "4"]);
    assert!(talker
        .search_for_series(&SeriesQuery::new("batman").with_year(2012))
        .unwrap()
        .is_empty());
}

#[test]
fn search_filters_by_issue_number() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(dir.path());

    let talker = GcdTalker::new(settings_for(&db));
    let found = talker
        .search_for_series(&SeriesQuery::new("batman").with_issue_number("2"))
        .unwrap();
    assert_eq!(series_ids(&found), vec!["1"]);

    let found = talker
        .search_for_series(&SeriesQuery::new("batman").with_issue_number("1"))
        .unwrap();
    assert_eq!(series_ids(&found), vec!["1", "2", "4"]);

    let settings = TalkerSettings {
        nn_is_issue_one: true,
        ..settings_for(&db)
    };
    let found = GcdTalker::new(settings)
        .search_for_series(&SeriesQuery::new("batman").with_issue_number("1"))
        .unwrap();
    assert_eq!(series_ids(&found), vec!["1", "2", "4", "6"]);
}

#[test]
fn blank_search_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = talker(&dir)
        .search_for_series(&SeriesQuery::new("  "))
        .unwrap_err();
    assert!(matches!(err, TalkerError::InvalidInput(_)));
    assert_eq!(err.code(), 2);
}

#[test]
fn search_without_matches_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(talker(&dir)
        .search_for_series(&SeriesQuery::new("Sandman"))
        .unwrap()
        .is_empty());
}

// ── Series ──────────────────────────────────────────────────────────────────

#[test]
fn fetch_series_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let series = talker.fetch_series("2").unwrap().unwrap();
    assert_eq!(series.name, "Batman Adventures");
    assert_eq!(series.format.as_deref(), Some("Limited Series"));
    assert_eq!(
        series.description.as_deref(),
        Some("Notes for Batman Adventures. ")
    );
    assert_eq!(series.count_of_issues, Some(36));

    assert!(talker.fetch_series("999").unwrap().is_none());
    assert_eq!(talker.fetch_series("two").unwrap_err().code(), 2);
}

// ── Issues ──────────────────────────────────────────────────────────────────

#[test]
fn fetch_comic_data_by_issue_id() {
    let dir = tempfile::tempdir().unwrap();
    let md = talker(&dir)
        .fetch_comic_data(Some("100"), None, None)
        .unwrap()
        .unwrap();

    assert_eq!(md.issue_id.as_deref(), Some("100"));
    assert_eq!(md.series_id.as_deref(), Some("1"));
    assert_eq!(md.series.as_deref(), Some("Batman"));
    assert_eq!(md.publisher.as_deref(), Some("DC"));
    assert_eq!(md.issue.as_deref(), Some("1"));
    assert_eq!(md.title.as_deref(), Some("The Legend of the Batman"));
    assert_eq!((md.day, md.month, md.year), (Some(25), Some(4), Some(1940)));
    assert_eq!(md.price, Some(0.10));
    assert_eq!(md.volume, Some(1));
    assert_eq!(md.issue_count, Some(713));
    assert_eq!(md.identifier, None);
    assert_eq!(md.imprint, None);
    assert_eq!(md.country.as_deref(), Some("United States"));
    assert_eq!(md.language.as_deref(), Some("en"));
    assert_eq!(md.web_links, vec!["https://www.comics.org/issue/100"]);
    assert!(md.characters.contains("Robin [Dick Grayson]"));
    assert!(md.genres.contains("Superhero"));

    let credits: Vec<(&str, &str)> = md
        .credits
        .iter()
        .map(|c| (c.person.as_str(), c.role.as_str()))
        .collect();
    assert_eq!(
        credits,
        vec![
            ("Bob Kane", "Editing"),
            ("Bill Finger", "script"),
            ("Bob Kane", "pencils"),
        ]
    );
    assert_eq!(
        md.description.as_deref(),
        Some("The Legend of the Batman: Origin retold.\r\n\r\n")
    );
}

#[test]
fn fetch_comic_data_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let first = talker.fetch_comic_data(Some("100"), None, None).unwrap();
    let second = talker.fetch_comic_data(Some("100"), None, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fetch_comic_data_by_series_and_number() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let md = talker
        .fetch_comic_data(None, Some("1"), Some("2"))
        .unwrap()
        .unwrap();
    assert_eq!(md.issue_id.as_deref(), Some("101"));
    assert_eq!(md.title.as_deref(), Some("Wanted: Santa Claus"));

    assert!(talker
        .fetch_comic_data(None, Some("1"), Some("99"))
        .unwrap()
        .is_none());
}

#[test]
fn unnumbered_issue_as_issue_one() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(dir.path());

    let plain = GcdTalker::new(settings_for(&db));
    assert!(plain
        .fetch_comic_data(None, Some("6"), Some("1"))
        .unwrap()
        .is_none());

    let settings = TalkerSettings {
        nn_is_issue_one: true,
        replace_nn_with_one: true,
        ..settings_for(&db)
    };
    let md = GcdTalker::new(settings)
        .fetch_comic_data(None, Some("6"), Some("1"))
        .unwrap()
        .unwrap();
    assert_eq!(md.issue_id.as_deref(), Some("600"));
    assert_eq!(md.issue.as_deref(), Some("1"));
    assert_eq!(md.imprint.as_deref(), Some("Vertigo"));
    assert_eq!(md.format.as_deref(), Some("Trade Paperback"));
}

#[test]
fn fetch_comic_data_requires_ids() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    for (issue, series, number) in [
        (None, None, None),
        (None, Some("1"), None),
        (None, None, Some("1")),
        (Some(" "), None, None),
    ] {
        let err = talker.fetch_comic_data(issue, series, number).unwrap_err();
        assert_eq!(err.code(), 2, "{issue:?} {series:?} {number:?}");
    }
}

#[test]
fn unknown_issue_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(talker(&dir)
        .fetch_comic_data(Some("999"), None, None)
        .unwrap()
        .is_none());
}

#[test]
fn issues_in_series() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let issues = talker.fetch_issues_in_series("1").unwrap().unwrap();
    assert_eq!(issue_ids(&issues), vec!["100", "101"]);
    assert_eq!(issues[1].issue.as_deref(), Some("2"));
    assert_eq!(issues[1].title.as_deref(), Some("Wanted: Santa Claus"));
    assert_eq!(issues[1].series.as_deref(), Some("Batman"));

    assert!(talker.fetch_issues_in_series("7").unwrap().unwrap().is_empty());
    assert!(talker.fetch_issues_in_series("999").unwrap().is_none());
}

#[test]
fn issues_by_number_and_year() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let ids: Vec<String> = ["1", "2", "4"].iter().map(|s| s.to_string()).collect();

    let found = talker
        .fetch_issues_by_series_issue_num_and_year(&ids, "1", Some(1992))
        .unwrap();
    assert_eq!(issue_ids(&found), vec!["200"]);

    let found = talker
        .fetch_issues_by_series_issue_num_and_year(&ids, "1", None)
        .unwrap();
    assert_eq!(issue_ids(&found), vec!["100", "200", "400"]);
    assert_eq!(found[2].title.as_deref(), Some("Batman Reborn"));
}

#[test]
fn issues_by_number_skips_unknown_series() {
    let dir = tempfile::tempdir().unwrap();
    let ids = vec!["999".to_string(), "1".to_string()];
    let found = talker(&dir)
        .fetch_issues_by_series_issue_num_and_year(&ids, "1", None)
        .unwrap();
    assert_eq!(issue_ids(&found), vec!["100"]);
}

#[test]
fn issues_by_number_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let talker = talker(&dir);
    let ids = vec!["1".to_string()];
    assert_eq!(
        talker
            .fetch_issues_by_series_issue_num_and_year(&ids, " ", None)
            .unwrap_err()
            .code(),
        2
    );
    let bad = vec!["abc".to_string()];
    assert_eq!(
        talker
            .fetch_issues_by_series_issue_num_and_year(&bad, "1", None)
            .unwrap_err()
            .code(),
        2
    );
}

// ── Covers ──────────────────────────────────────────────────────────────────

#[test]
fn gui_covers_attached_to_issue_and_series() {
    let dir = tempfile::tempdir().unwrap();
    let settings = TalkerSettings {
        download_gui_covers: true,
        ..settings_for(&fixture_db(dir.path()))
    };
    let (covers, calls) = FakeCovers::new();
    let talker = GcdTalker::new(settings).with_cover_source(Box::new(covers));

    let md = talker
        .fetch_comic_data(Some("100"), None, None)
        .unwrap()
        .unwrap();
    assert_eq!(md.cover_image.as_deref(), Some("https://covers.test/100.jpg"));
    assert_eq!(md.alternate_images, vec!["https://covers.test/100-b.jpg"]);

    let series = talker.fetch_series("1").unwrap().unwrap();
    assert_eq!(series.image_url.as_deref(), Some("https://covers.test/100.jpg"));
    assert!(calls.get() >= 2);
}

#[test]
fn covers_not_fetched_unless_requested() {
    let dir = tempfile::tempdir().unwrap();
    let (covers, calls) = FakeCovers::new();
    let talker = talker(&dir).with_cover_source(Box::new(covers));
    let md = talker
        .fetch_comic_data(Some("100"), None, None)
        .unwrap()
        .unwrap();
    assert_eq!(md.cover_image, None);
    assert_eq!(calls.get(), 0);
}

#[test]
fn cover_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let settings = TalkerSettings {
        download_gui_covers: true,
        ..settings_for(&fixture_db(dir.path()))
    };
    let (covers, calls) = FakeCovers::failing();
    let talker = GcdTalker::new(settings).with_cover_source(Box::new(covers));
    let md = talker
        .fetch_comic_data(Some("100"), None, None)
        .unwrap()
        .unwrap();
    assert_eq!(md.cover_image, None);
    assert!(calls.get() >= 1);
}

#[test]
fn tag_covers_for_every_match() {
    let dir = tempfile::tempdir().unwrap();
    let settings = TalkerSettings {
        download_tag_covers: true,
        ..settings_for(&fixture_db(dir.path()))
    };
    let (covers, calls) = FakeCovers::new();
    let talker = GcdTalker::new(settings).with_cover_source(Box::new(covers));
    let ids: Vec<String> = vec!["1".to_string(), "2".to_string()];
    let found = talker
        .fetch_issues_by_series_issue_num_and_year(&ids, "1", None)
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|md| md.cover_image.is_some()));
    assert_eq!(calls.get(), 2);
}

// ── Cache ───────────────────────────────────────────────────────────────────

#[test]
fn cached_issue_is_reused() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(dir.path());
    let talker = GcdTalker::new(settings_for(&db)).with_cache(MetadataCache::open_memory().unwrap());

    let first = talker.fetch_comic_data(Some("101"), None, None).unwrap();
    let stats = talker.cache().unwrap().stats().unwrap();
    assert_eq!(stats, CacheStats { series: 1, issues: 1 });

    let conn = Connection::open(&db).unwrap();
    conn.execute("UPDATE gcd_issue SET title = 'Changed' WHERE id = 101", [])
        .unwrap();
    drop(conn);

    let second = talker.fetch_comic_data(Some("101"), None, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cached_issue_without_covers_is_refetched_for_gui() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture_db(dir.path());
    let cache = MetadataCache::open_memory().unwrap();

    let mut talker = GcdTalker::new(settings_for(&db)).with_cache(cache);
    talker.fetch_comic_data(Some("100"), None, None).unwrap();

    let (covers, calls) = FakeCovers::new();
    talker = talker.with_cover_source(Box::new(covers));
    talker.apply_settings(TalkerSettings {
        download_gui_covers: true,
        ..settings_for(&db)
    });
    let md = talker
        .fetch_comic_data(Some("100"), None, None)
        .unwrap()
        .unwrap();
    assert_eq!(md.cover_image.as_deref(), Some("https://covers.test/100.jpg"));
    let after_refetch = calls.get();
    assert!(after_refetch >= 1);

    // Now complete with covers, so served from the cache.
    talker.fetch_comic_data(Some("100"), None, None).unwrap();
    assert_eq!(calls.get(), after_refetch);
}
