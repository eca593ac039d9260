//! Readers for the inputs of `normform`: CSV tables and dependency lists.

pub mod dependency;
pub mod error;
pub mod table;

pub use dependency::{parse_dependency_list, Dependencies};
pub use error::ParseError;
pub use table::parse_table;
