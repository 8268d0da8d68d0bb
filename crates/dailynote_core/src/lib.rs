//! Core logic for the daily note generator.
//! Scans dated notes, carries unfinished todos forward and writes the next
//! day's note exactly once.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, GeneratorConfig, NOTES_DIR_ENV};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{
    format_note_date, parse_note_date, DateParseError, Note, NoteBody, TodoItem,
    NOTE_DATE_FORMAT,
};
pub use repo::note_index::{scan, IndexError, IndexResult, NoteIndex, DEFAULT_NOTE_EXTENSION};
pub use service::note_generator::{
    ensure_note, GenerateError, GenerateResult, NoteGenerator, NoteOutcome, DEFAULT_WINDOW_DAYS,
};
pub use service::todo_aggregator::{
    aggregate, extract_undone, extract_undone_from_text, AggregateError, AggregateResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
