//! Filesystem index of dated notes.
//!
//! # Responsibility
//! - List one notes directory (non-recursive) and keep files whose stem
//!   parses as a note date.
//! - Map a date back to its canonical note path.
//!
//! # Invariants
//! - Unparsable names are filtered out, never reported as errors.
//! - Scan results are sorted ascending by date.
//! - Scanning never writes to the filesystem.

use crate::model::note::{format_note_date, parse_note_date, Note};
use chrono::NaiveDate;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Extension used when none is configured.
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

pub type IndexResult<T> = Result<T, IndexError>;

/// Directory listing failure during a scan.
#[derive(Debug)]
pub enum IndexError {
    Io { dir: PathBuf, source: io::Error },
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { dir, source } => {
                write!(f, "failed to list notes directory `{}`: {source}", dir.display())
            }
        }
    }
}

impl Error for IndexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Date-keyed view over a directory of plain-text notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteIndex {
    extension: String,
}

impl Default for NoteIndex {
    fn default() -> Self {
        Self::new(DEFAULT_NOTE_EXTENSION)
    }
}

impl NoteIndex {
    /// Creates an index recognizing files with `extension` (no leading dot).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn extension(&self) -> &str {
        self.extension.as_str()
    }

    /// Canonical path of the note for `date` inside `dir`.
    pub fn note_path(&self, dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(format!("{}.{}", format_note_date(date), self.extension))
    }

    /// Lists dated notes in `dir`, ascending by date.
    ///
    /// A missing directory is an empty index.
    ///
    /// # Errors
    /// - Returns [`IndexError::Io`] when the directory exists but cannot be
    ///   listed.
    pub fn scan(&self, dir: &Path) -> IndexResult<Vec<Note>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            // Why: generation creates the directory on first write, so a
            // vault that does not exist yet simply has no notes.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=note_scan module=index status=ok dir={} notes=0 missing_dir=true",
                    dir.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=note_scan module=index status=error dir={} error={}",
                    dir.display(),
                    err
                );
                return Err(IndexError::Io {
                    dir: dir.to_path_buf(),
                    source: err,
                });
            }
        };

        let mut notes = Vec::new();
        let mut skipped = 0usize;
        for entry in entries {
            let path = entry
                .map_err(|err| IndexError::Io {
                    dir: dir.to_path_buf(),
                    source: err,
                })?
                .path();
            if !self.has_note_extension(&path) || !path.is_file() {
                continue;
            }
            match note_date_from_path(&path) {
                Some(date) => notes.push(Note::new(date, path)),
                None => {
                    skipped += 1;
                    debug!(
                        "event=note_skip module=index reason=invalid_date_name file={}",
                        path.display()
                    );
                }
            }
        }
        notes.sort();

        info!(
            "event=note_scan module=index status=ok dir={} notes={} skipped={}",
            dir.display(),
            notes.len(),
            skipped
        );
        Ok(notes)
    }

    fn has_note_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

/// Scans `dir` for notes using the default extension.
pub fn scan(dir: &Path) -> IndexResult<Vec<Note>> {
    NoteIndex::default().scan(dir)
}

fn note_date_from_path(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    parse_note_date(stem).ok()
}

#[cfg(test)]
mod tests {
    use super::{note_date_from_path, NoteIndex};
    use chrono::NaiveDate;
    use std::path::Path;

    #[test]
    fn note_path_uses_date_and_extension() {
        let index = NoteIndex::new("txt");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(
            index.note_path(Path::new("/notes"), date),
            Path::new("/notes/2024-01-02.txt")
        );
    }

    #[test]
    fn note_date_from_path_reads_stem_only() {
        assert_eq!(
            note_date_from_path(Path::new("/a/2024-05-06.md")),
            NaiveDate::from_ymd_opt(2024, 5, 6)
        );
        assert_eq!(note_date_from_path(Path::new("/a/2024-05-06.bak.md")), None);
        assert_eq!(note_date_from_path(Path::new("/a/inbox.md")), None);
    }
}
