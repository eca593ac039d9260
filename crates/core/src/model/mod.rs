//! In-memory relations and the dependencies declared over them.

pub mod attribute;
pub mod dependency;
mod display;
pub mod error;
pub mod relation;
pub mod table;
pub mod value;

pub use attribute::AttributeSet;
pub use dependency::{
    Declaration, Dependency, Functional, FunctionalDependency, Kind, Multivalued,
    MultivaluedDependency,
};
pub use error::Error;
pub use relation::Relation;
pub use table::{Column, Table};
pub use value::{Value, ValueKind};
