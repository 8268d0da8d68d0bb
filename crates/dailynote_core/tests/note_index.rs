use chrono::NaiveDate;
use dailynote_core::{scan, IndexError, NoteIndex};
use std::fs;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn scan_keeps_valid_dates_sorted_and_filters_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "2024-03-05.md",
        "2023-12-31.md",
        "2024-01-15.md",
        "inbox.md",
        "2024-3-5.md",
        "2024-02-30.md",
        "2024-03-06.txt",
        "2024-03-07.md.bak",
    ] {
        fs::write(dir.path().join(name), "- [ ] x\n").unwrap();
    }
    fs::create_dir(dir.path().join("2024-03-08.md")).unwrap();

    let notes = scan(dir.path()).unwrap();
    let dates: Vec<_> = notes.iter().map(|note| note.date).collect();
    assert_eq!(
        dates,
        vec![day(2023, 12, 31), day(2024, 1, 15), day(2024, 3, 5)]
    );
    assert_eq!(notes[2].path, dir.path().join("2024-03-05.md"));
}

#[test]
fn scan_does_not_recurse() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("archive").join("2024-01-01.md"), "").unwrap();

    assert!(scan(dir.path()).unwrap().is_empty());
}

#[test]
fn scan_honors_configured_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2024-01-01.md"), "").unwrap();
    fs::write(dir.path().join("2024-01-02.txt"), "").unwrap();

    let notes = NoteIndex::new("txt").scan(dir.path()).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].date, day(2024, 1, 2));
}

#[test]
fn scan_of_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(scan(&dir.path().join("not-yet")).unwrap().is_empty());
}

#[test]
fn scan_of_regular_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.md");
    fs::write(&file, "").unwrap();

    let err = scan(&file).unwrap_err();
    match err {
        IndexError::Io { dir, .. } => assert_eq!(dir, file),
    }
}
