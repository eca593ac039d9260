use crate::model::attribute::AttributeSet;
use crate::model::dependency::FunctionalDependency;
use crate::model::relation::Relation;

/// Attribute closure of `start` under `fds`.
///
/// Adds the dependent of every FD whose determinant is already covered,
/// until a pass adds nothing. The result contains `start` and is a fixed
/// point: closing it again returns the same set.
#[must_use]
pub fn closure<'a, I>(fds: I, start: &AttributeSet) -> AttributeSet
where
    I: IntoIterator<Item = &'a FunctionalDependency>,
    I::IntoIter: Clone,
{
    let fds = fds.into_iter();
    let mut result = start.clone();
    loop {
        let before = result.len();
        for fd in fds.clone() {
            if fd.determinant().is_subset(&result) {
                result = result.union(fd.dependent());
            }
        }
        if result.len() == before {
            return result;
        }
    }
}

/// Whether `attrs` identifies every row of `relation`.
///
/// Decided from the data: the projection onto `attrs` must have no repeated
/// tuple.
#[must_use]
pub fn is_superkey(relation: &Relation, attrs: &AttributeSet) -> bool {
    relation.table().is_duplicate_free(attrs)
}
