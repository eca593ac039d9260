use super::closure::{closure, is_superkey};
use super::functional::check_bcnf;
use super::violation::Violation;
use crate::model::attribute::AttributeSet;
use crate::model::dependency::MultivaluedDependency;
use crate::model::relation::Relation;

/// Non-trivial `X ->> Y` in `schema` with `X` not a superkey.
pub(crate) fn violates_4nf(
    relation: &Relation,
    schema: &AttributeSet,
    mvd: &MultivaluedDependency,
) -> bool {
    mvd.fits(schema) && !mvd.is_trivial_in(schema) && !is_superkey(relation, mvd.determinant())
}

/// Fourth normal form: every non-trivial MVD has a superkey determinant.
///
/// # Errors
///
/// Returns a lower-level [`Violation`] or
/// [`Violation::NonSuperkeyMultivalued`] for the first offending MVD.
pub fn check_4nf(relation: &Relation) -> Result<(), Violation> {
    check_bcnf(relation)?;
    let schema = relation.schema();
    match relation
        .mvds()
        .iter()
        .find(|mvd| violates_4nf(relation, &schema, mvd))
    {
        Some(mvd) => Err(Violation::NonSuperkeyMultivalued {
            dependency: mvd.clone(),
        }),
        None => Ok(()),
    }
}

/// Fifth normal form, approximated.
///
/// Requires that dropping any single attribute leaves a set whose FD
/// closure is still the whole schema. This does not detect general join
/// dependencies, and it rejects relations whose attributes are not
/// FD-determined by the rest (for example all-key relations).
///
/// # Errors
///
/// Returns a lower-level [`Violation`] or [`Violation::JoinDependency`]
/// naming the first attribute the others do not determine.
pub fn check_5nf(relation: &Relation) -> Result<(), Violation> {
    check_4nf(relation)?;
    let schema = relation.schema();
    for attribute in &schema {
        let mut rest = schema.clone();
        rest.remove(attribute);
        if !schema.is_subset(&closure(relation.fds(), &rest)) {
            return Err(Violation::JoinDependency {
                attribute: attribute.clone(),
            });
        }
    }
    Ok(())
}
