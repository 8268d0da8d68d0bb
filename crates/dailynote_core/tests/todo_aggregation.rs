use chrono::NaiveDate;
use dailynote_core::{aggregate, extract_undone, AggregateError, Note, TodoItem};
use std::fs;
use std::path::Path;

fn note(dir: &Path, date: &str, content: &[u8]) -> Note {
    let path = dir.join(format!("{date}.md"));
    fs::write(&path, content).unwrap();
    Note::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), path)
}

fn texts(items: &[TodoItem]) -> Vec<&str> {
    items.iter().map(TodoItem::as_str).collect()
}

#[test]
fn extract_undone_returns_unchecked_items_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let note = note(
        dir.path(),
        "2024-03-05",
        b"# 2024-03-05\n\n## Tasks\n- [ ] buy milk\n- [x] done thing\n- [ ] call bob\n",
    );

    let todos = extract_undone(&note).unwrap();
    assert_eq!(texts(&todos), vec!["buy milk", "call bob"]);
}

#[test]
fn aggregate_dedups_by_first_occurrence() {
    let dir = tempfile::tempdir().unwrap();
    let notes = vec![
        note(dir.path(), "2024-03-01", b"- [ ] b\n- [ ] a\n"),
        note(dir.path(), "2024-03-02", b"- [ ] c\n- [ ] a\n- [x] d\n"),
        note(dir.path(), "2024-03-03", b"- [ ] d\n- [ ] b\n- [ ] c\n"),
    ];

    let todos = aggregate(&notes).unwrap();
    assert_eq!(texts(&todos), vec!["b", "a", "c", "d"]);
}

#[test]
fn aggregate_treats_whitespace_variants_as_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let notes = vec![note(dir.path(), "2024-03-01", b"- [ ] a\n- [ ] a \n- [ ] a\n")];

    let todos = aggregate(&notes).unwrap();
    assert_eq!(texts(&todos), vec!["a", "a "]);
}

#[test]
fn aggregate_of_no_notes_is_empty() {
    assert!(aggregate(&[]).unwrap().is_empty());
}

#[test]
fn aggregate_fails_on_non_utf8_note() {
    let dir = tempfile::tempdir().unwrap();
    let notes = vec![
        note(dir.path(), "2024-03-01", b"- [ ] fine\n"),
        note(dir.path(), "2024-03-02", &[0xff, 0xfe, b'\n']),
    ];

    let err = aggregate(&notes).unwrap_err();
    match err {
        AggregateError::Read { path, .. } => {
            assert_eq!(path, dir.path().join("2024-03-02.md"))
        }
    }
}

#[test]
fn aggregate_fails_on_missing_note() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Note::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        dir.path().join("2024-03-01.md"),
    );

    assert!(matches!(
        aggregate(&[missing]),
        Err(AggregateError::Read { .. })
    ));
}
