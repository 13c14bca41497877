//! Query Builder Module
//!
//! Turns raw user text into the query shapes sent to the index engine.
//!
//! ## Submodules
//! - **`builder`**: Pure constructors for relevance and suggestion queries.
//! - **`types`**: The engine-agnostic query descriptors.

pub mod builder;
pub mod types;
