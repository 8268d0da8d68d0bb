//! Daily note domain model.
//!
//! # Responsibility
//! - Define the dated note handle, the carried-over todo item and the
//!   rendered body of a freshly generated note.
//! - Own the single date format shared by filenames and note headings.
//!
//! # Invariants
//! - A note's date comes from its filename stem, never from file metadata.
//! - Date text must match `YYYY-MM-DD` exactly and name a real calendar day.
//! - `NoteBody` is rendered once and never mutated afterward.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// `chrono` format string used for filenames and headings.
pub const NOTE_DATE_FORMAT: &str = "%Y-%m-%d";

static NOTE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid note date regex"));

/// Date text rejected by [`parse_note_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Text is not shaped like `YYYY-MM-DD`.
    Format(String),
    /// Shape is right but the day does not exist (e.g. `2024-02-30`).
    Calendar(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::Calendar(value) => write!(f, "date `{value}` is not a valid calendar day"),
        }
    }
}

impl Error for DateParseError {}

/// Parses a note date using the exact `YYYY-MM-DD` shape.
pub fn parse_note_date(text: &str) -> Result<NaiveDate, DateParseError> {
    if !NOTE_DATE_RE.is_match(text) {
        return Err(DateParseError::Format(text.to_string()));
    }
    NaiveDate::parse_from_str(text, NOTE_DATE_FORMAT)
        .map_err(|_| DateParseError::Calendar(text.to_string()))
}

/// Formats a date the way note filenames and headings spell it.
pub fn format_note_date(date: NaiveDate) -> String {
    date.format(NOTE_DATE_FORMAT).to_string()
}

/// One dated note file discovered in the notes directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Note {
    /// Calendar day parsed from the filename stem.
    pub date: NaiveDate,
    /// Full path of the note file.
    pub path: PathBuf,
}

impl Note {
    pub fn new(date: NaiveDate, path: impl Into<PathBuf>) -> Self {
        Self {
            date,
            path: path.into(),
        }
    }
}

/// Text of one unfinished checklist line.
///
/// Identity is exact text equality; inner whitespace is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoItem(String);

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TodoItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoItem {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Rendered content of a newly generated daily note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBody(String);

impl NoteBody {
    /// Renders the heading, the `Tasks` checklist and an empty `Notes` bullet.
    ///
    /// An empty todo list still yields one blank checklist line so the
    /// section is ready to type into.
    pub fn render(date: NaiveDate, todos: &[TodoItem]) -> Self {
        let mut body = format!("# {}\n\n## Tasks\n", format_note_date(date));
        if todos.is_empty() {
            body.push_str("- [ ] \n");
        } else {
            for todo in todos {
                body.push_str("- [ ] ");
                body.push_str(todo.as_str());
                body.push('\n');
            }
        }
        body.push_str("\n## Notes\n- \n");
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{format_note_date, parse_note_date, DateParseError, NoteBody, TodoItem};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_note_date_accepts_exact_shape() {
        assert_eq!(parse_note_date("2024-03-05").unwrap(), day(2024, 3, 5));
        assert_eq!(format_note_date(day(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn parse_note_date_rejects_loose_shapes() {
        for input in ["2024-3-5", "24-03-05", " 2024-03-05", "2024-03-05 ", "2024/03/05", ""] {
            assert!(
                matches!(parse_note_date(input), Err(DateParseError::Format(_))),
                "`{input}` should be rejected"
            );
        }
    }

    #[test]
    fn parse_note_date_rejects_impossible_days() {
        assert_eq!(
            parse_note_date("2023-02-29"),
            Err(DateParseError::Calendar("2023-02-29".to_string()))
        );
        assert!(parse_note_date("2024-02-29").is_ok());
    }

    #[test]
    fn render_lists_todos_in_given_order() {
        let body = NoteBody::render(
            day(2024, 3, 10),
            &[TodoItem::from("buy milk"), TodoItem::from("call bob")],
        );
        assert_eq!(
            body.as_str(),
            "# 2024-03-10\n\n## Tasks\n- [ ] buy milk\n- [ ] call bob\n\n## Notes\n- \n"
        );
    }

    #[test]
    fn render_empty_todos_keeps_one_blank_checkbox() {
        let body = NoteBody::render(day(2024, 3, 10), &[]);
        assert_eq!(
            body.into_string(),
            "# 2024-03-10\n\n## Tasks\n- [ ] \n\n## Notes\n- \n"
        );
    }
}
