//! Game collection data model types.
//!
//! This crate defines the catalog data model without any database or file
//! format dependencies. Consumers can use these types directly for display,
//! pass them to `shelf-db` for persistence, or to `shelf-archive` for
//! exchange files.

pub mod tags;
pub mod types;

pub use tags::{join_tag_names, split_tag_names};
pub use types::*;
