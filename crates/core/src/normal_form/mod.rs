use alloc::string::String;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

use derive_more::{Display as DeriveDisplay, Error};

use crate::model::relation::Relation;

pub mod closure;
pub mod first;
pub mod functional;
pub mod multivalued;
pub mod violation;

pub use closure::{closure, is_superkey};
pub use first::check_1nf;
pub use functional::{check_2nf, check_3nf, check_bcnf};
pub use multivalued::{check_4nf, check_5nf};
pub use violation::Violation;

/// Normal forms, ordered from weakest to strongest.
///
/// Each level includes all weaker levels:
/// 1NF < 2NF < 3NF < BCNF < 4NF < 5NF.
///
/// The 1NF test looks at the data only. 2NF through BCNF test the declared
/// functional dependencies, with superkeys decided empirically from the
/// rows. 4NF adds the multivalued dependencies. The 5NF test is a heuristic
/// over single-attribute removal and is not a complete join-dependency test.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalForm {
    /// Atomic, homogeneous columns and a null-free unique key.
    First,
    /// No non-key attribute depends on a proper subset of the key.
    Second,
    /// No non-key attribute depends transitively on the key.
    Third,
    /// Every non-trivial FD has a superkey as determinant.
    BoyceCodd,
    /// Every non-trivial MVD has a superkey as determinant.
    Fourth,
    /// Every attribute is recoverable from the others through the FDs.
    Fifth,
}

impl NormalForm {
    pub const ALL: [Self; 6] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::BoyceCodd,
        Self::Fourth,
        Self::Fifth,
    ];

    /// The level directly below, `None` for 1NF.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::First => None,
            Self::Second => Some(Self::First),
            Self::Third => Some(Self::Second),
            Self::BoyceCodd => Some(Self::Third),
            Self::Fourth => Some(Self::BoyceCodd),
            Self::Fifth => Some(Self::Fourth),
        }
    }

    /// Runs the checker for this level, which runs every lower level first.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found, at the lowest failing level.
    pub fn check(self, relation: &Relation) -> Result<(), Violation> {
        match self {
            Self::First => check_1nf(relation),
            Self::Second => check_2nf(relation),
            Self::Third => check_3nf(relation),
            Self::BoyceCodd => check_bcnf(relation),
            Self::Fourth => check_4nf(relation),
            Self::Fifth => check_5nf(relation),
        }
    }

    #[must_use]
    pub fn satisfied_by(self, relation: &Relation) -> bool {
        self.check(relation).is_ok()
    }
}

impl Display for NormalForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::First => "1NF",
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
            Self::Fourth => "4NF",
            Self::Fifth => "5NF",
        };
        f.pad(label)
    }
}

/// A normal-form label that is not one of `1`–`5`, `B`, `1NF`–`5NF` or
/// `BCNF`.
#[derive(Debug, Clone, PartialEq, Eq, DeriveDisplay, Error)]
#[display("unknown normal form `{input}`")]
pub struct UnknownNormalForm {
    pub input: String,
}

impl FromStr for NormalForm {
    type Err = UnknownNormalForm;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let level = trimmed
            .strip_suffix("NF")
            .or_else(|| trimmed.strip_suffix("nf"))
            .unwrap_or(trimmed);
        match level {
            "1" => Ok(Self::First),
            "2" => Ok(Self::Second),
            "3" => Ok(Self::Third),
            "B" | "b" | "BC" | "bc" => Ok(Self::BoyceCodd),
            "4" => Ok(Self::Fourth),
            "5" => Ok(Self::Fifth),
            _ => Err(UnknownNormalForm {
                input: input.into(),
            }),
        }
    }
}

/// The strongest level `relation` satisfies, probing from 5NF down.
///
/// `None` means the relation is not even in first normal form.
#[must_use]
pub fn highest_normal_form(relation: &Relation) -> Option<NormalForm> {
    let highest = NormalForm::ALL
        .iter()
        .rev()
        .copied()
        .find(|level| level.satisfied_by(relation));
    tracing::debug!(relation = relation.name(), ?highest, "probed normal forms");
    highest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for level in NormalForm::ALL {
            assert_eq!(level.to_string().parse::<NormalForm>(), Ok(level));
        }
        assert_eq!("B".parse::<NormalForm>(), Ok(NormalForm::BoyceCodd));
        assert_eq!("3".parse::<NormalForm>(), Ok(NormalForm::Third));
        assert_eq!("4nf".parse::<NormalForm>(), Ok(NormalForm::Fourth));
        assert!("6NF".parse::<NormalForm>().is_err());
        assert!("NF".parse::<NormalForm>().is_err());
    }

    #[test]
    fn levels_are_ordered() {
        assert!(NormalForm::First < NormalForm::BoyceCodd);
        assert!(NormalForm::BoyceCodd < NormalForm::Fourth);
        assert_eq!(NormalForm::Fourth.previous(), Some(NormalForm::BoyceCodd));
        assert_eq!(NormalForm::First.previous(), None);
    }
}
