//! Result Assembler Module
//!
//! Converts typed raw engine responses into the compact structures clients
//! consume: a [`types::SearchResult`] (hits + facets) or a
//! [`types::SuggestionList`]. Pure functions, no I/O.

pub mod assembler;
pub mod types;
