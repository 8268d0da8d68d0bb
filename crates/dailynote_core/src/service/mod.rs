//! Core use-case services.
//!
//! # Responsibility
//! - Aggregate carry-over todos from indexed notes.
//! - Orchestrate index, aggregation and persistence into note generation.

pub mod note_generator;
pub mod todo_aggregator;
