//! Filesystem access to the notes directory.
//!
//! # Responsibility
//! - Discover dated notes and map dates to note paths.
//! - Keep directory listing details out of the generation services.

pub mod note_index;
