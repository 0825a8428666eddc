#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gcd_talker_db::operations::*;
use gcd_talker_db::{Connection, create_fixture_schema};
use gcd_talker_lib::TalkerSettings;
use gcd_talker_scraper::{CoverSource, IssueCovers, ScrapeError};

/// Write a small GCD dump to `dir` and return its path.
pub fn fixture_db(dir: &Path) -> PathBuf {
    let path = dir.join("gcd.db");
    let conn = Connection::open(&path).unwrap();
    create_fixture_schema(&conn).unwrap();

    insert_country(&conn, 1, "us", "United States").unwrap();
    insert_language(&conn, 1, "en", "English").unwrap();
    insert_publisher(&conn, 1, "DC").unwrap();
    insert_publisher(&conn, 2, "Marvel").unwrap();
    insert_indicia_publisher(&conn, 1, "National Periodical Publications", Some(1), Some(1))
        .unwrap();
    insert_brand(&conn, 1, "Vertigo", 10, "Vertigo").unwrap();

    let series = [
        (1, "Batman", 1940, Some(2011), 713, "", 1, Some(100)),
        (2, "Batman Adventures", 1992, Some(1995), 36, "limited series", 1, Some(200)),
        (3, "Detective Comics", 1937, None, 27, "", 1, Some(300)),
        (4, "Batman and Robin", 2009, Some(2011), 26, "mini-series", 1, Some(400)),
        (5, "The Amazing Spider-Man", 1963, Some(1998), 441, "", 2, Some(500)),
        (6, "Batman: Year One", 1988, Some(1988), 1, "trade paperback", 1, Some(600)),
        (7, "Batman", 2016, None, 150, "", 1, None),
    ];
    for (id, name, began, ended, count, format, publisher, first) in series {
        insert_series(
            &conn,
            &SeriesRow {
                id,
                name: name.to_string(),
                notes: Some(format!("Notes for {name}. ")),
                year_began: Some(began),
                year_ended: ended,
                issue_count: Some(count),
                publishing_format: Some(format.to_string()),
                publisher_id: Some(publisher),
                language_id: Some(1),
                first_issue_id: first,
                ..Default::default()
            },
        )
        .unwrap();
    }

    let issues = [
        (100, 1, "1", "1940-04-25", 1, ""),
        (101, 1, "2", "1940-06-00", 2, ""),
        (200, 2, "1", "1992-10-00", 1, ""),
        (300, 3, "27", "1939-05-00", 27, ""),
        (400, 4, "1", "2009-08-00", 1, "Batman Reborn"),
        (500, 5, "1", "1963-03-00", 1, ""),
        (600, 6, "[nn]", "1988-00-00", 1, ""),
    ];
    for (id, series_id, number, key_date, sort_code, title) in issues {
        insert_issue(
            &conn,
            &IssueRow {
                id,
                series_id,
                number: number.to_string(),
                key_date: key_date.to_string(),
                sort_code,
                title: title.to_string(),
                indicia_publisher_id: Some(1),
                brand_id: (id == 600).then_some(1),
                ..Default::default()
            },
        )
        .unwrap();
    }
    conn.execute(
        "UPDATE gcd_issue SET volume = '1', price = '0.10 USD; 0.12 CAD',
                notes = 'First issue.', valid_isbn = ''
         WHERE id = 100",
        [],
    )
    .unwrap();

    insert_story(
        &conn,
        &StoryRow {
            id: 1000,
            issue_id: 100,
            sequence_number: 1,
            title: "The Legend of the Batman".to_string(),
            characters: "Batman [Bruce Wayne]; Robin [Dick Grayson]".to_string(),
            genre: "superhero".to_string(),
            synopsis: "Origin retold.".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    insert_story(
        &conn,
        &StoryRow {
            id: 1010,
            issue_id: 101,
            sequence_number: 1,
            title: "Wanted: Santa Claus".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    insert_credit_type(&conn, 1, "script").unwrap();
    insert_credit_type(&conn, 2, "pencils").unwrap();
    insert_creator(&conn, 1, "Bill Finger").unwrap();
    insert_creator(&conn, 2, "Bob Kane").unwrap();
    insert_story_credit(&conn, 1, 1000, 1, 1).unwrap();
    insert_story_credit(&conn, 2, 1000, 2, 2).unwrap();
    insert_issue_credit(&conn, 1, 100, 2, "Editing").unwrap();

    path
}

pub fn settings_for(db: &Path) -> TalkerSettings {
    TalkerSettings {
        db_file: Some(db.to_path_buf()),
        ..Default::default()
    }
}

/// Cover source answering from issue ids, counting lookups.
pub struct FakeCovers {
    pub calls: Rc<Cell<usize>>,
    pub fail: bool,
}

impl FakeCovers {
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: Rc::clone(&calls),
                fail: false,
            },
            calls,
        )
    }

    pub fn failing() -> (Self, Rc<Cell<usize>>) {
        let (mut covers, calls) = Self::new();
        covers.fail = true;
        (covers, calls)
    }
}

impl CoverSource for FakeCovers {
    fn issue_covers(&self, issue_id: i64) -> Result<IssueCovers, ScrapeError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(ScrapeError::Challenge(issue_id));
        }
        Ok(IssueCovers {
            cover: Some(format!("https://covers.test/{issue_id}.jpg")),
            variants: vec![format!("https://covers.test/{issue_id}-b.jpg")],
        })
    }
}
