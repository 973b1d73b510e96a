//! Turns freeform project notes into a structured production document.
//!
//! [`parser::extract`] reads the notes against the current [`model::Document`]
//! and returns an [`model::ExtractionResult`]; [`model::Document::apply`]
//! merges that result back in.

pub mod batch;
pub mod model;
pub mod parser;
pub mod settings;
