//! Levels decided by functional dependencies: 2NF, 3NF and BCNF.
//!
//! Each level runs the level below it first and then scans the relation's
//! FDs in declaration order. Trivial FDs never violate anything.

use super::closure::is_superkey;
use super::first::check_1nf;
use super::violation::Violation;
use crate::model::dependency::FunctionalDependency;
use crate::model::relation::Relation;

/// `X -> Y` with `X ⊊ key` and some attribute of `Y` outside `key ∪ X`.
pub(crate) fn is_partial(relation: &Relation, fd: &FunctionalDependency) -> bool {
    let key = relation.key();
    !fd.is_trivial()
        && fd.determinant().is_proper_subset(key)
        && !fd.dependent().is_subset(&key.union(fd.determinant()))
}

/// `X -> Y` with `X` not the key and not a superkey, and some attribute of
/// `Y − X` outside the key.
pub(crate) fn is_transitive(relation: &Relation, fd: &FunctionalDependency) -> bool {
    !fd.is_trivial()
        && fd.determinant() != relation.key()
        && !fd.nontrivial_dependent().is_subset(relation.key())
        && !is_superkey(relation, fd.determinant())
}

/// Non-trivial `X -> Y` with `X` not a superkey.
pub(crate) fn violates_bcnf(relation: &Relation, fd: &FunctionalDependency) -> bool {
    !fd.is_trivial() && !is_superkey(relation, fd.determinant())
}

/// Second normal form: no partial dependency on the key.
///
/// # Errors
///
/// Returns a first-normal-form [`Violation`] or
/// [`Violation::PartialDependency`] for the first partial FD.
pub fn check_2nf(relation: &Relation) -> Result<(), Violation> {
    check_1nf(relation)?;
    match relation.fds().iter().find(|fd| is_partial(relation, fd)) {
        Some(fd) => Err(Violation::PartialDependency {
            dependency: fd.clone(),
        }),
        None => Ok(()),
    }
}

/// Third normal form: no transitive dependency.
///
/// # Errors
///
/// Returns a lower-level [`Violation`] or
/// [`Violation::TransitiveDependency`] for the first transitive FD.
pub fn check_3nf(relation: &Relation) -> Result<(), Violation> {
    check_2nf(relation)?;
    match relation.fds().iter().find(|fd| is_transitive(relation, fd)) {
        Some(fd) => Err(Violation::TransitiveDependency {
            dependency: fd.clone(),
        }),
        None => Ok(()),
    }
}

/// Boyce-Codd normal form: every non-trivial FD has a superkey determinant.
///
/// # Errors
///
/// Returns a lower-level [`Violation`] or
/// [`Violation::NonSuperkeyDeterminant`] for the first offending FD.
pub fn check_bcnf(relation: &Relation) -> Result<(), Violation> {
    check_3nf(relation)?;
    match relation.fds().iter().find(|fd| violates_bcnf(relation, fd)) {
        Some(fd) => Err(Violation::NonSuperkeyDeterminant {
            dependency: fd.clone(),
        }),
        None => Ok(()),
    }
}
