use cursor_trail_config::{CursorPoint, CursorState, EditorRange, PositionDatabase, ScrollState};

fn selection(anchor: (usize, usize), head: (usize, usize)) -> CursorState {
    CursorState {
        cursor: Some(EditorRange {
            from: CursorPoint::new(anchor.0, anchor.1),
            to: CursorPoint::new(head.0, head.1),
        }),
        scroll_state: Some(ScrollState {
            top: 120.0,
            left: 0.0,
        }),
    }
}

#[test]
fn test_reads_camel_case_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cursor-position-history.json");
    let json = r#"{
        "Daily/2024-01-01.md": {
            "cursor": {"from": {"ch": 3, "line": 10}, "to": {"ch": 8, "line": 10}},
            "scrollState": {"top": 240, "left": 0}
        },
        "Inbox.md": {"scrollState": {"top": 0, "left": 0}}
    }"#;
    std::fs::write(&path, json).unwrap();

    let db = PositionDatabase::load(&path).unwrap();
    assert_eq!(db.len(), 2);

    let daily = db.get("Daily/2024-01-01.md").unwrap();
    let cursor = daily.cursor.unwrap();
    assert_eq!(cursor.from, CursorPoint::new(10, 3));
    assert_eq!(cursor.to, CursorPoint::new(10, 8));
    assert_eq!(daily.scroll_state.unwrap().top, 240.0);

    assert!(db.get("Inbox.md").unwrap().cursor.is_none());
}

#[test]
fn test_rename_and_delete_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    let mut db = PositionDatabase::new();
    db.insert("a.md", selection((1, 0), (1, 4)));
    db.insert("b.md", selection((7, 2), (9, 0)));
    db.insert("c.md", selection((0, 0), (0, 0)));
    db.save_if_changed(&path).unwrap();

    db.rename("a.md", "archive/a.md");
    db.remove("c.md");
    assert!(db.save_if_changed(&path).unwrap());

    let reopened = PositionDatabase::load(&path).unwrap();
    let files: Vec<&str> = reopened.files().collect();
    assert_eq!(files, vec!["archive/a.md", "b.md"]);
    assert_eq!(reopened.get("archive/a.md"), Some(&selection((1, 0), (1, 4))));
}

#[test]
fn test_unchanged_database_is_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    let mut db = PositionDatabase::new();
    db.insert("a.md", selection((2, 0), (2, 0)));
    assert!(db.save_if_changed(&path).unwrap());

    // Replace the file behind the database's back; an unchanged database must
    // not touch it.
    std::fs::write(&path, "{}").unwrap();
    assert!(!db.save_if_changed(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}
