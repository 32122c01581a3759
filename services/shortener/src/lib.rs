//! Link shortening engine for the LinkShorti earnings platform
//!
//! # Modules
//! - `codes`: Short-code generation and URL normalization
//! - `links`: Concurrent link book (create, resolve, click)
//! - `rates`: Per-country CPM table and per-click earnings
//! - `stats`: Per-user aggregate statistics
//! - `errors`: Error taxonomy

pub mod codes;
pub mod errors;
pub mod links;
pub mod rates;
pub mod stats;

pub use errors::ShortenerError;
pub use links::LinkBook;
pub use stats::StatsBook;
