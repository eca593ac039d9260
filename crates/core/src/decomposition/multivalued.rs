use alloc::vec::Vec;

use super::error::Error;
use super::split::SplitPlan;
use super::{decompose, Normalization, Residual};
use crate::model::dependency::MultivaluedDependency;
use crate::model::relation::Relation;
use crate::normal_form::{check_4nf, check_5nf, NormalForm, Violation};

/// Whether `mvd` still applies to the current decomposition.
///
/// It must be owned by a relation holding all of its attributes, and no
/// other MVD of that relation with the same determinant may have a
/// dependent linked to `mvd`'s by an FD.
fn is_valid(relations: &[Relation], mvd: &MultivaluedDependency) -> bool {
    let Some(owner) = relations
        .iter()
        .find(|relation| relation.mvds.contains(mvd) && mvd.fits(&relation.schema()))
    else {
        tracing::debug!(dependency = %mvd, "dropping MVD: no relation holds it");
        return false;
    };
    let linked = owner
        .mvds_with_determinant_set(mvd.determinant())
        .into_iter()
        .filter(|other| *other != mvd)
        .find(|other| owner.related_set(mvd.dependent(), other.dependent()));
    if let Some(other) = linked {
        tracing::debug!(
            relation = owner.name(),
            dependency = %mvd,
            %other,
            "dropping MVD: dependents are linked by an FD"
        );
        return false;
    }
    true
}

/// The MVDs of `mvds` that still apply to `relations`, without repeats.
#[must_use]
pub fn validate_mvds(
    relations: &[Relation],
    mvds: &[MultivaluedDependency],
) -> Vec<MultivaluedDependency> {
    let mut valid: Vec<MultivaluedDependency> = Vec::with_capacity(mvds.len());
    for mvd in mvds {
        if !valid.contains(mvd) && is_valid(relations, mvd) {
            valid.push(mvd.clone());
        }
    }
    valid
}

/// Decomposes every relation into fourth normal form.
///
/// `mvds` is re-validated against `relations` first; each relation then
/// keeps only the valid MVDs it owns. A relation failing on `X ->> Y` is
/// split into `X ∪ Y`, keyed by all of its attributes, and the rest.
/// FDs are carried along where a side holds them but are not guaranteed
/// to survive.
///
/// # Errors
///
/// Returns [`Error::Unnormalized`] if an input is not in BCNF.
pub fn to_4nf(
    mut relations: Vec<Relation>,
    mvds: &[MultivaluedDependency],
) -> Result<Vec<Relation>, Error> {
    let valid = validate_mvds(&relations, mvds);
    tracing::debug!(declared = mvds.len(), valid = valid.len(), "validated MVDs");
    for relation in &mut relations {
        relation.mvds.retain(|mvd| valid.contains(mvd));
    }
    decompose(relations, NormalForm::Fourth)
}

/// Checks every relation against fifth normal form without decomposing.
///
/// Relations failing the check are passed through unchanged and listed in
/// [`Normalization::residual`].
///
/// # Errors
///
/// Returns [`Error::Unnormalized`] if an input is not in 4NF.
pub fn to_5nf(relations: Vec<Relation>) -> Result<Normalization, Error> {
    let mut residual = Vec::new();
    for relation in &relations {
        if let Err(violation) = check_4nf(relation) {
            return Err(Error::Unnormalized {
                relation: relation.name.clone(),
                required: NormalForm::Fourth,
                violation,
            });
        }
        if let Err(violation) = check_5nf(relation) {
            tracing::warn!(relation = relation.name(), %violation, "not in 5NF; left as is");
            residual.push(Residual {
                relation: relation.name.clone(),
                violation,
            });
        }
    }
    Ok(Normalization {
        relations,
        residual,
    })
}

pub(super) fn plan(relation: &Relation, violation: Violation) -> Option<SplitPlan> {
    let Violation::NonSuperkeyMultivalued { dependency } = &violation else {
        return None;
    };
    let determinant = dependency.determinant().clone();
    let moved = dependency.dependent().difference(&determinant);
    let child_key = determinant.union(&moved);
    tracing::debug!(relation = relation.name(), %dependency, "splitting on MVD");
    Some(SplitPlan {
        determinant,
        moved,
        child_key,
        violation,
    })
}
