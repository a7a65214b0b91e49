//! Core library for doclist
//!
//! This crate implements the **Functional Core** of the doclist application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The doclist project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`doclist_core`** (this crate): Pure transformation functions with zero I/O
//! - **`doclist`**: Fetching the doctor feed, the listing session, CLI and MCP (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`doctor`]: Feed records and the normalizer, the single validation boundary
//! - [`specialty`]: Specialty facets with doctor counts
//! - [`filter`]: Filter state and the search/filter/sort pipeline
//! - [`suggest`]: Type-ahead suggestions for the search box
//! - [`query`]: Filter state to and from the query string
//! - [`listing`]: The view model handed to the presentation layer
//!
//! # Example Usage
//!
//! ```rust
//! use doclist_core::doctor::normalize_batch;
//! use doclist_core::filter::{apply, SortKey};
//! use doclist_core::query::parse_query;
//! use serde_json::json;
//!
//! // Create fixture data (no HTTP required)
//! let batch = normalize_batch(vec![
//!     json!({"id": "1", "name": "Dr. A", "fees": "₹1000"}),
//!     json!({"id": "2", "name": "Dr. B", "fees": "₹300"}),
//! ]);
//!
//! // Restore the state from a shared link and run the pipeline
//! let state = parse_query("?sort=fees");
//! assert_eq!(state.sort_key, Some(SortKey::Fees));
//!
//! let shown = apply(&batch.doctors, &state);
//! assert_eq!(shown[0].name, "Dr. B");
//! ```

pub mod doctor;
pub mod filter;
pub mod listing;
pub mod query;
pub mod specialty;
pub mod suggest;
