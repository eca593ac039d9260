use alloc::string::String;
use alloc::vec::Vec;

use derive_more::Display;

use super::NormalForm;
use crate::model::attribute::AttributeSet;
use crate::model::dependency::{FunctionalDependency, MultivaluedDependency};
use crate::model::value::Value;

/// Why a relation fails a normal form.
///
/// Failing a level is an ordinary outcome, not an error: the decomposition
/// engine reads the violation to decide where to split.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Violation {
    /// Columns are still declared multivalued.
    #[display("multivalued attributes present: {attributes}")]
    MultivaluedAttributes { attributes: AttributeSet },
    #[display("key attribute `{attribute}` is not a column")]
    MissingKeyColumn { attribute: String },
    #[display("key attribute `{attribute}` is null in row {row}")]
    NullInKey { attribute: String, row: usize },
    /// Two rows share the key value listed.
    #[display("key is not unique")]
    DuplicateKey { key: Vec<Value> },
    /// A column mixes value kinds or holds lists.
    #[display("column `{column}` is not atomic")]
    NonAtomicColumn { column: String },
    /// The determinant is a proper subset of the key.
    #[display("partial dependency `{dependency}`")]
    PartialDependency { dependency: FunctionalDependency },
    /// The determinant is neither the key nor a superkey.
    #[display("transitive dependency `{dependency}`")]
    TransitiveDependency { dependency: FunctionalDependency },
    #[display("determinant of `{dependency}` is not a superkey")]
    NonSuperkeyDeterminant { dependency: FunctionalDependency },
    #[display("determinant of `{dependency}` is not a superkey")]
    NonSuperkeyMultivalued { dependency: MultivaluedDependency },
    /// The other attributes do not determine `attribute`.
    #[display("`{attribute}` is not implied by the remaining attributes")]
    JoinDependency { attribute: String },
}

impl Violation {
    /// The normal form this violation breaks.
    #[must_use]
    pub const fn level(&self) -> NormalForm {
        match self {
            Self::MultivaluedAttributes { .. }
            | Self::MissingKeyColumn { .. }
            | Self::NullInKey { .. }
            | Self::DuplicateKey { .. }
            | Self::NonAtomicColumn { .. } => NormalForm::First,
            Self::PartialDependency { .. } => NormalForm::Second,
            Self::TransitiveDependency { .. } => NormalForm::Third,
            Self::NonSuperkeyDeterminant { .. } => NormalForm::BoyceCodd,
            Self::NonSuperkeyMultivalued { .. } => NormalForm::Fourth,
            Self::JoinDependency { .. } => NormalForm::Fifth,
        }
    }
}
