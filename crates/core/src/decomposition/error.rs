use alloc::string::String;

use derive_more::{Display, Error, From};

use crate::model::error::Error as SchemaError;
use crate::normal_form::{NormalForm, Violation};

/// Error returned when a relation cannot be decomposed.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum Error {
    /// The input relation is structurally invalid.
    #[display("{_0}")]
    Schema(SchemaError),
    /// A transform was handed a relation that fails a lower level than the
    /// one the transform starts from.
    #[display("relation `{relation}` must be in {required} first: {violation}")]
    #[from(skip)]
    Unnormalized {
        relation: String,
        required: NormalForm,
        #[error(not(source))]
        violation: Violation,
    },
    /// A split would not shrink the relation, or a relation still fails
    /// the level after every available split was applied.
    #[display("decomposition of `{relation}` to {level} does not terminate: {violation}")]
    #[from(skip)]
    NonTermination {
        relation: String,
        level: NormalForm,
        #[error(not(source))]
        violation: Violation,
    },
}
