use super::*;

fn series(id: i64, name: &str) -> GcdSeries {
    GcdSeries {
        id,
        name: name.to_string(),
        year_began: Some(1940),
        ..Default::default()
    }
}

#[test]
fn test_series_round_trip() {
    let cache = MetadataCache::open_memory().unwrap();
    assert!(cache.get_series(1).unwrap().is_none());

    cache.add_series(&series(1, "Batman"), true).unwrap();
    let cached = cache.get_series(1).unwrap().unwrap();
    assert!(cached.complete);
    assert_eq!(cached.data.name, "Batman");
}

#[test]
fn test_replacing_an_entry() {
    let cache = MetadataCache::open_memory().unwrap();
    cache.add_series(&series(1, "Batman"), false).unwrap();
    let mut updated = series(1, "Batman");
    updated.image = Some("https://example.com/1.jpg".to_string());
    updated.cover_downloaded = true;
    cache.add_series(&updated, true).unwrap();

    let cached = cache.get_series(1).unwrap().unwrap();
    assert!(cached.complete);
    assert!(cached.data.cover_downloaded);
    assert_eq!(cache.stats().unwrap().series, 1);
}

#[test]
fn test_issue_round_trip() {
    let cache = MetadataCache::open_memory().unwrap();
    let issue = GcdIssue {
        id: 100,
        series_id: 1,
        number: "1".to_string(),
        characters: vec!["Batman".to_string()],
        ..Default::default()
    };
    cache.add_issue(&issue, true).unwrap();
    let cached = cache.get_issue(100).unwrap().unwrap();
    assert_eq!(cached.data, issue);
    assert!(cache.get_issue(101).unwrap().is_none());
}

#[test]
fn test_purge_removes_old_entries() {
    let cache = MetadataCache::open_memory().unwrap();
    cache.add_series(&series(1, "Batman"), true).unwrap();
    assert_eq!(
        cache
            .purge_older_than(Utc::now() - Duration::days(CACHE_TTL_DAYS))
            .unwrap(),
        0
    );
    assert_eq!(
        cache.purge_older_than(Utc::now() + Duration::days(1)).unwrap(),
        1
    );
    assert!(cache.get_series(1).unwrap().is_none());
}

#[test]
fn test_clear() {
    let cache = MetadataCache::open_memory().unwrap();
    cache.add_series(&series(1, "Batman"), true).unwrap();
    cache
        .add_issue(
            &GcdIssue {
                id: 100,
                series_id: 1,
                number: "1".to_string(),
                ..Default::default()
            },
            true,
        )
        .unwrap();
    assert_eq!(cache.stats().unwrap(), CacheStats { series: 1, issues: 1 });
    cache.clear().unwrap();
    assert_eq!(cache.stats().unwrap(), CacheStats::default());
}

#[test]
fn test_corrupt_entry_is_a_miss() {
    let cache = MetadataCache::open_memory().unwrap();
    cache
        .conn
        .execute(
            "INSERT INTO series (id, source, data, complete, timestamp) VALUES ('5', 'gcd', '{nope', 1, ?1)",
            params![Utc::now().timestamp()],
        )
        .unwrap();
    assert!(cache.get_series(5).unwrap().is_none());
}

#[test]
fn test_on_disk_cache_persists() {
    let dir = tempfile::tempdir().unwrap();
    {
        let cache = MetadataCache::open(dir.path()).unwrap();
        assert_eq!(cache.path(), Some(dir.path().join("cache.db").as_path()));
        cache.add_series(&series(3, "Detective Comics"), true).unwrap();
    }
    let cache = MetadataCache::open(dir.path()).unwrap();
    assert_eq!(
        cache.get_series(3).unwrap().unwrap().data.name,
        "Detective Comics"
    );
}

#[test]
fn test_version_mismatch_wipes_cache() {
    let dir = tempfile::tempdir().unwrap();
    {
        let cache = MetadataCache::open(dir.path()).unwrap();
        cache.add_series(&series(3, "Detective Comics"), true).unwrap();
        cache
            .conn
            .execute("UPDATE cache_version SET version = 0", [])
            .unwrap();
    }
    let cache = MetadataCache::open(dir.path()).unwrap();
    assert!(cache.get_series(3).unwrap().is_none());
}
