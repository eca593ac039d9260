use alloc::string::String;

use derive_more::{Display, Error};

/// Where an attribute name was referenced.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum AttributeRole {
    #[display("key")]
    Key,
    #[display("multivalued attribute list")]
    Multivalued,
    #[display("dependency `{_0}`")]
    Dependency(DependencyRef),
}

/// Which declared dependency list an unknown attribute came from.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum DependencyRef {
    /// Index into the functional dependencies.
    #[display("FD #{_0}")]
    Functional(usize),
    /// Index into the multivalued dependencies.
    #[display("MVD #{_0}")]
    Multivalued(usize),
}

/// Structural errors in a relation, its dependencies or its table.
///
/// These are raised eagerly, before any checking or decomposition runs.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// A dependency string has no arrow, the wrong arrow, or an empty side.
    #[display("malformed dependency `{input}`: {reason}")]
    MalformedDependency { input: String, reason: String },
    /// An attribute name appears twice where names must be distinct.
    #[display("duplicate attribute `{attribute}`")]
    DuplicateAttribute { attribute: String },
    /// An attribute list has no names, or an empty item between delimiters.
    #[display("empty attribute list")]
    EmptyAttributeSet,
    /// A key, multivalued attribute or dependency names a missing column.
    #[display("unknown attribute `{attribute}` in {role}")]
    UnknownAttribute { attribute: String, role: AttributeRole },
    /// Columns of one table have different lengths.
    #[display("column `{column}` has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    /// A row has a different number of cells than the header.
    #[display("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
