//! 2NF, 3NF and BCNF decomposition.
//!
//! All three split along an FD determinant `X`. The child is keyed by `X`
//! and receives `closure(X)` minus `X`, so that FD chains hanging off `X`
//! move together. At 2NF and 3NF key attributes never move; at BCNF they
//! may, in which case the parent is re-keyed by the split.

use alloc::vec::Vec;

use super::decompose;
use super::error::Error;
use super::split::SplitPlan;
use crate::model::attribute::AttributeSet;
use crate::model::dependency::FunctionalDependency;
use crate::model::relation::Relation;
use crate::normal_form::functional::is_partial;
use crate::normal_form::{closure, NormalForm, Violation};

/// Decomposes every relation into second normal form.
///
/// Among the partial dependencies of a relation, the one with the smallest
/// determinant is split off first.
///
/// # Errors
///
/// Returns [`Error::Unnormalized`] if an input is not in 1NF.
pub fn to_2nf(relations: Vec<Relation>) -> Result<Vec<Relation>, Error> {
    decompose(relations, NormalForm::Second)
}

/// Decomposes every relation into third normal form, splitting off the
/// first transitive dependency each time.
///
/// # Errors
///
/// Returns [`Error::Unnormalized`] if an input is not in 2NF.
pub fn to_3nf(relations: Vec<Relation>) -> Result<Vec<Relation>, Error> {
    decompose(relations, NormalForm::Third)
}

/// Decomposes every relation into Boyce-Codd normal form, splitting off
/// the first FD whose determinant is not a superkey each time.
///
/// # Errors
///
/// Returns [`Error::Unnormalized`] if an input is not in 3NF, and
/// [`Error::NonTermination`] if the rows contradict the FDs so badly that a
/// split would not shrink the relation.
pub fn to_bcnf(relations: Vec<Relation>) -> Result<Vec<Relation>, Error> {
    decompose(relations, NormalForm::BoyceCodd)
}

/// The partial dependency with the smallest determinant, first on ties.
fn min_partial(relation: &Relation) -> Option<&FunctionalDependency> {
    relation
        .fds()
        .iter()
        .filter(|fd| is_partial(relation, fd))
        .min_by_key(|fd| fd.determinant().len())
}

fn moved_by(relation: &Relation, determinant: &AttributeSet, keep_key: bool) -> AttributeSet {
    let moved = closure(relation.fds(), determinant)
        .intersection(&relation.schema())
        .difference(determinant);
    if keep_key {
        moved.difference(relation.key())
    } else {
        moved
    }
}

pub(super) fn plan(relation: &Relation, violation: Violation) -> Option<SplitPlan> {
    let (determinant, keep_key) = match &violation {
        Violation::PartialDependency { .. } => (min_partial(relation)?.determinant().clone(), true),
        Violation::TransitiveDependency { dependency } => (dependency.determinant().clone(), true),
        Violation::NonSuperkeyDeterminant { dependency } => {
            (dependency.determinant().clone(), false)
        }
        _ => return None,
    };
    let moved = moved_by(relation, &determinant, keep_key);
    Some(SplitPlan::keyed_by_determinant(determinant, moved, violation))
}
