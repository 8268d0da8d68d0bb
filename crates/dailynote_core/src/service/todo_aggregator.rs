//! Carry-over todo extraction and merge.
//!
//! # Responsibility
//! - Pull unfinished `- [ ] ` checklist lines out of note files.
//! - Merge them across notes into one deduplicated list.
//!
//! # Invariants
//! - Match is anchored at line start; leading whitespace disqualifies a line.
//! - Item text is kept verbatim (no trimming).
//! - Output order is first appearance: notes in caller order, lines top to
//!   bottom.
//! - An unreadable note fails the whole aggregation.
//! - `\n`, `\r\n` and a lone `\r` all end a line.
//!
//! # See also
//! - `service::note_generator` for how the window of notes is chosen.

use crate::model::note::{Note, TodoItem};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

static UNDONE_TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \[ \] (.+)").expect("valid undone todo regex"));

pub type AggregateResult<T> = Result<T, AggregateError>;

#[derive(Debug)]
pub enum AggregateError {
    /// Note could not be opened or is not valid UTF-8.
    Read { path: PathBuf, source: io::Error },
}

impl Display for AggregateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read note `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for AggregateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
        }
    }
}

/// Returns unfinished todo texts found in `text`, in line order.
pub fn extract_undone_from_text(text: &str) -> Vec<TodoItem> {
    note_lines(text)
        .filter_map(|line| UNDONE_TODO_RE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| TodoItem::new(m.as_str()))
        .collect()
}

// Why: `str::lines` keeps a `\r` on the last line and never splits on a
// lone `\r`; a stray `\r` would make the same todo compare unequal.
fn note_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\n', '\r']))
}

/// Reads `note` and returns its unfinished todos in file order.
///
/// # Errors
/// - Returns [`AggregateError::Read`] when the file cannot be read as UTF-8.
pub fn extract_undone(note: &Note) -> AggregateResult<Vec<TodoItem>> {
    let text = std::fs::read_to_string(&note.path).map_err(|err| {
        error!(
            "event=todo_extract module=aggregate status=error file={} error={}",
            note.path.display(),
            err
        );
        AggregateError::Read {
            path: note.path.clone(),
            source: err,
        }
    })?;

    let todos = extract_undone_from_text(&text);
    debug!(
        "event=todo_extract module=aggregate status=ok date={} todos={}",
        note.date,
        todos.len()
    );
    Ok(todos)
}

/// Merges unfinished todos across `notes`, keeping each text once.
///
/// Callers pass notes oldest first; that order decides which occurrence
/// wins.
pub fn aggregate(notes: &[Note]) -> AggregateResult<Vec<TodoItem>> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for note in notes {
        for todo in extract_undone(note)? {
            if seen.insert(todo.clone()) {
                merged.push(todo);
            }
        }
    }

    info!(
        "event=todo_aggregate module=aggregate status=ok notes={} todos={}",
        notes.len(),
        merged.len()
    );
    Ok(merged)
}
