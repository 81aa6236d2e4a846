//! codesense-core: everything behind the CodeSense report view that is not
//! terminal I/O.
//!
//! A review result produced elsewhere is handed off through a key/value store
//! ([`store`], backed in production by the SQLite database in [`db`]), parsed
//! into the typed [`model`], and projected by [`report`] into a plain render
//! tree that the `codesense` binary draws with ratatui. The only mutable state
//! is the [`view_state`] controller: which comparison tab is active and which
//! report sections are expanded.

pub mod db;
pub mod error;
pub mod model;
pub mod report;
pub mod schema;
pub mod score;
pub mod store;
pub mod view_state;

pub use error::{HandoffError, LoadError};
pub use model::ReviewResult;
pub use store::ReviewSession;
