//! Daily note generation use-case.
//!
//! # Responsibility
//! - Create the note for one target date, pre-filled with todos left
//!   unfinished during the preceding window.
//!
//! # Invariants
//! - Generation is idempotent: an existing note is never rewritten.
//! - The carry-over window is `[date - window_days, date)`; the target day
//!   never feeds itself.
//! - The already-exists path performs no scan and no write.
//!
//! # See also
//! - `repo::note_index` for which files count as notes.
//! - `service::todo_aggregator` for the carry-over rules.

use crate::model::note::{format_note_date, NoteBody};
use crate::repo::note_index::{IndexError, NoteIndex};
use crate::service::todo_aggregator::{aggregate, AggregateError};
use chrono::{Duration, NaiveDate};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Days scanned back from the target date for carry-over todos.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Failure while ensuring a daily note.
#[derive(Debug)]
pub enum GenerateError {
    /// Notes directory could not be listed.
    Index(IndexError),
    /// A note inside the window could not be read.
    Aggregate(AggregateError),
    /// Directory creation or file write failed.
    Write { path: PathBuf, source: io::Error },
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(err) => write!(f, "{err}"),
            Self::Aggregate(err) => write!(f, "{err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write note `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Index(err) => Some(err),
            Self::Aggregate(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<IndexError> for GenerateError {
    fn from(value: IndexError) -> Self {
        Self::Index(value)
    }
}

impl From<AggregateError> for GenerateError {
    fn from(value: AggregateError) -> Self {
        Self::Aggregate(value)
    }
}

/// Result of [`NoteGenerator::ensure_note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOutcome {
    /// A new note was written with `carried` todos.
    Created { path: PathBuf, carried: usize },
    /// The note was already present; nothing was touched.
    AlreadyExists { path: PathBuf },
}

impl NoteOutcome {
    /// `true` only when this call wrote the note.
    pub fn created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Created { path, .. } | Self::AlreadyExists { path } => path.as_path(),
        }
    }
}

/// Generates dated notes inside one notes directory layout.
#[derive(Debug, Clone)]
pub struct NoteGenerator {
    index: NoteIndex,
    window_days: u32,
}

impl Default for NoteGenerator {
    fn default() -> Self {
        Self::new(NoteIndex::default())
    }
}

impl NoteGenerator {
    pub fn new(index: NoteIndex) -> Self {
        Self {
            index,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn index(&self) -> &NoteIndex {
        &self.index
    }

    /// Half-open carry-over window `[start, end)` for `date`.
    pub fn window(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = date
            .checked_sub_signed(Duration::days(i64::from(self.window_days)))
            .unwrap_or(NaiveDate::MIN);
        (start, date)
    }

    /// Ensures the note for `date` exists in `dir`.
    ///
    /// # Side effects
    /// - Creates `dir` recursively when missing.
    /// - Writes `{dir}/{YYYY-MM-DD}.{ext}` at most once.
    ///
    /// # Errors
    /// - [`GenerateError::Index`] / [`GenerateError::Aggregate`] when the
    ///   window cannot be read completely. A `dir` that exists but is not a
    ///   directory (e.g. a regular file) fails here, at the listing step,
    ///   before any write is attempted.
    /// - [`GenerateError::Write`] when the directory or file cannot be
    ///   created.
    pub fn ensure_note(&self, dir: &Path, date: NaiveDate) -> GenerateResult<NoteOutcome> {
        let path = self.index.note_path(dir, date);
        if path.exists() {
            info!(
                "event=note_ensure module=generate status=skipped reason=exists date={}",
                format_note_date(date)
            );
            return Ok(NoteOutcome::AlreadyExists { path });
        }

        let (start, end) = self.window(date);
        let recent = self
            .index
            .scan(dir)?
            .into_iter()
            .filter(|note| start <= note.date && note.date < end)
            .collect::<Vec<_>>();
        let todos = aggregate(&recent)?;
        let body = NoteBody::render(date, &todos);

        match persist(dir, &path, &body) {
            Ok(true) => {
                info!(
                    "event=note_ensure module=generate status=ok date={} window_notes={} carried={}",
                    format_note_date(date),
                    recent.len(),
                    todos.len()
                );
                Ok(NoteOutcome::Created {
                    path,
                    carried: todos.len(),
                })
            }
            Ok(false) => {
                info!(
                    "event=note_ensure module=generate status=skipped reason=created_concurrently date={}",
                    format_note_date(date)
                );
                Ok(NoteOutcome::AlreadyExists { path })
            }
            Err(err) => {
                error!(
                    "event=note_ensure module=generate status=error date={} error={}",
                    format_note_date(date),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Ensures the note for `date` using default extension and window.
pub fn ensure_note(dir: &Path, date: NaiveDate) -> GenerateResult<NoteOutcome> {
    NoteGenerator::default().ensure_note(dir, date)
}

/// Writes `body` to a new file; `Ok(false)` if the file appeared meanwhile.
fn persist(dir: &Path, path: &Path, body: &NoteBody) -> GenerateResult<bool> {
    std::fs::create_dir_all(dir).map_err(|err| GenerateError::Write {
        path: dir.to_path_buf(),
        source: err,
    })?;

    // Why: `create_new` refuses to follow or replace anything that appeared
    // after the existence check, so a note written meanwhile is kept intact.
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => {
            return Err(GenerateError::Write {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    file.write_all(body.as_str().as_bytes())
        .and_then(|()| file.flush())
        .map_err(|err| GenerateError::Write {
            path: path.to_path_buf(),
            source: err,
        })?;
    Ok(true)
}
