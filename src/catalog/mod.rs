//! Catalog Module
//!
//! The catalog item model and the administrative endpoints that populate the
//! index (`/create-index`, `/seed`, `/ingest`). These are one-shot
//! pass-throughs to the index gateway.
//!
//! ## Submodules
//! - **`types`**: The `Item` model and admin DTOs.
//! - **`seed`**: Synthetic item generator.
//! - **`handlers`**: HTTP handlers for the admin endpoints.

pub mod handlers;
pub mod seed;
pub mod types;
