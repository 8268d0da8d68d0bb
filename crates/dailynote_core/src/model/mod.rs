//! Domain model for dated daily notes.
//!
//! # Responsibility
//! - Define canonical data structures used by the index, aggregator and
//!   generator.
//!
//! # Invariants
//! - At most one `Note` per calendar date in a directory; the filename is
//!   the key.

pub mod note;
