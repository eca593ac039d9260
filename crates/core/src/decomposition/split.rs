//! The one structural operation every transform is built on: cutting a
//! relation in two along a determinant.

use alloc::string::String;
use alloc::vec::Vec;

use super::error::Error;
use super::is_lossless;
use crate::model::attribute::AttributeSet;
use crate::model::dependency::{Dependency, FunctionalDependency, Kind};
use crate::model::relation::Relation;
use crate::normal_form::{NormalForm, Violation};

/// Where to cut a relation.
///
/// The child gets `determinant ∪ moved`; the parent keeps everything but
/// `moved`. The determinant columns end up in both.
#[derive(Debug, Clone)]
pub(crate) struct SplitPlan {
    pub determinant: AttributeSet,
    pub moved: AttributeSet,
    pub child_key: AttributeSet,
    pub violation: Violation,
}

impl SplitPlan {
    /// A plan keyed by its determinant.
    pub fn keyed_by_determinant(
        determinant: AttributeSet,
        moved: AttributeSet,
        violation: Violation,
    ) -> Self {
        Self {
            child_key: determinant.clone(),
            determinant,
            moved,
            violation,
        }
    }

    /// Whether both halves come out narrower than `schema`.
    pub fn shrinks(&self, schema: &AttributeSet) -> bool {
        let child = self.determinant.union(&self.moved);
        !self.moved.is_empty()
            && !self.moved.intersects(&self.determinant)
            && self.moved.is_subset(schema)
            && child.is_subset(schema)
            && child.len() < schema.len()
    }
}

fn push_unique<K: Kind>(side: &mut Vec<Dependency<K>>, dependency: Dependency<K>) {
    if !side.contains(&dependency) {
        side.push(dependency);
    }
}

/// Hands each FD to the side that holds all of its attributes, or projects
/// it onto every side that holds its determinant.
fn distribute_fds(
    relation: &str,
    fds: Vec<FunctionalDependency>,
    parent_schema: &AttributeSet,
    child_schema: &AttributeSet,
) -> (Vec<FunctionalDependency>, Vec<FunctionalDependency>) {
    let mut parent = Vec::new();
    let mut child = Vec::new();
    for fd in fds {
        if fd.fits(parent_schema) {
            push_unique(&mut parent, fd);
        } else if fd.fits(child_schema) {
            push_unique(&mut child, fd);
        } else {
            let mut preserved = false;
            for (schema, side) in [(parent_schema, &mut parent), (child_schema, &mut child)] {
                if !fd.determinant().is_subset(schema) {
                    continue;
                }
                let dependent = fd
                    .dependent()
                    .intersection(schema)
                    .difference(fd.determinant());
                if !dependent.is_empty() {
                    push_unique(side, Dependency::from_parts(fd.determinant().clone(), dependent));
                    preserved = true;
                }
            }
            if !preserved {
                tracing::debug!(relation, dependency = %fd, "functional dependency not preserved");
            }
        }
    }
    (parent, child)
}

/// MVDs only move whole.
fn distribute_mvds<K: Kind>(
    relation: &str,
    mvds: Vec<Dependency<K>>,
    parent_schema: &AttributeSet,
    child_schema: &AttributeSet,
) -> (Vec<Dependency<K>>, Vec<Dependency<K>>) {
    let mut parent = Vec::new();
    let mut child = Vec::new();
    for mvd in mvds {
        if mvd.fits(parent_schema) {
            push_unique(&mut parent, mvd);
        } else if mvd.fits(child_schema) {
            push_unique(&mut child, mvd);
        } else {
            tracing::debug!(relation, dependency = %mvd, "multivalued dependency dropped by split");
        }
    }
    (parent, child)
}

fn restrict(attrs: Option<&AttributeSet>, schema: &AttributeSet) -> Option<AttributeSet> {
    attrs
        .map(|attrs| attrs.intersection(schema))
        .filter(|attrs| !attrs.is_empty())
}

/// Splits `relation` according to `plan`, returning `(parent, child)`.
///
/// The moved columns are taken out of the parent's table and handed to the
/// child; the determinant columns are copied. Both tables are
/// de-duplicated. If the split moved a key attribute, the parent's key
/// becomes `(key − moved) ∪ determinant`.
pub(crate) fn split(
    relation: Relation,
    plan: SplitPlan,
    level: NormalForm,
) -> Result<(Relation, Relation), Error> {
    let schema = relation.schema();
    if !plan.shrinks(&schema) {
        return Err(Error::NonTermination {
            relation: relation.name,
            level,
            violation: plan.violation,
        });
    }

    let Relation {
        name,
        table: original,
        key,
        fds,
        mvds,
        multivalued,
    } = relation;

    let mut parent_table = original.clone();
    let mut child_table = original.project(&plan.determinant);
    for attribute in &plan.moved {
        if let Some(column) = parent_table.take_column(attribute) {
            child_table.push_column(column)?;
        }
    }
    parent_table.dedup_rows();
    child_table.dedup_rows();

    let parent_schema = parent_table.schema();
    let child_schema = child_table.schema();
    let parent_key = if key.intersects(&plan.moved) {
        key.difference(&plan.moved).union(&plan.determinant)
    } else {
        key
    };
    let child_name: String = alloc::format!("{name}_{}", plan.determinant.join("_"));

    let (parent_fds, child_fds) = distribute_fds(&name, fds, &parent_schema, &child_schema);
    let (parent_mvds, child_mvds) = distribute_mvds(&name, mvds, &parent_schema, &child_schema);

    tracing::debug!(
        relation = %name,
        child = %child_name,
        determinant = %plan.determinant,
        moved = %plan.moved,
        ?level,
        "split relation"
    );
    if !is_lossless(&original, [&parent_table, &child_table]) {
        tracing::warn!(
            relation = %name,
            determinant = %plan.determinant,
            "split is not lossless; the rows contradict the declared dependencies"
        );
    }

    let child = Relation {
        name: child_name,
        table: child_table,
        key: plan.child_key,
        fds: child_fds,
        mvds: child_mvds,
        multivalued: restrict(multivalued.as_ref(), &child_schema),
    };
    let parent = Relation {
        name,
        table: parent_table,
        key: parent_key,
        fds: parent_fds,
        mvds: parent_mvds,
        multivalued: restrict(multivalued.as_ref(), &parent_schema),
    };
    Ok((parent, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::Table;
    use crate::model::value::Value;

    fn fd(input: &str) -> FunctionalDependency {
        input.parse().expect("should parse")
    }

    fn attrs(names: &[&str]) -> AttributeSet {
        AttributeSet::from_names(names.iter().copied())
    }

    fn chain() -> Relation {
        let table = Table::from_rows(
            &["A", "B", "C"],
            vec![
                vec![Value::from(1), "x".into(), Value::from(10)],
                vec![Value::from(2), "x".into(), Value::from(10)],
                vec![Value::from(3), "y".into(), Value::from(20)],
            ],
        )
        .expect("should build");
        Relation::new("R", table, attrs(&["A"]))
            .and_then(|r| {
                r.with_dependencies(
                    vec![fd("A -> B"), fd("B -> C")],
                    vec![],
                )
            })
            .expect("valid relation")
    }

    fn violation() -> Violation {
        Violation::TransitiveDependency {
            dependency: fd("B -> C"),
        }
    }

    #[test]
    fn moves_columns_and_dependencies() {
        let plan = SplitPlan::keyed_by_determinant(attrs(&["B"]), attrs(&["C"]), violation());
        let (parent, child) = split(chain(), plan, NormalForm::Third).expect("should split");

        assert_eq!(parent.name(), "R");
        assert_eq!(parent.schema().names(), ["A", "B"]);
        assert_eq!(parent.key(), &attrs(&["A"]));
        assert_eq!(parent.fds(), [fd("A -> B")]);
        assert_eq!(parent.table().row_count(), 3);

        assert_eq!(child.name(), "R_B");
        assert_eq!(child.schema().names(), ["B", "C"]);
        assert_eq!(child.key(), &attrs(&["B"]));
        assert_eq!(child.fds(), [fd("B -> C")]);
        assert_eq!(child.table().row_count(), 2);
    }

    #[test]
    fn refuses_splits_that_do_not_shrink() {
        let plan = SplitPlan::keyed_by_determinant(attrs(&["A"]), attrs(&["B", "C"]), violation());
        let err = split(chain(), plan, NormalForm::Third).unwrap_err();
        assert!(matches!(err, Error::NonTermination { .. }), "{err}");

        let plan = SplitPlan::keyed_by_determinant(attrs(&["B"]), AttributeSet::new(), violation());
        assert!(split(chain(), plan, NormalForm::Third).is_err());
    }

    #[test]
    fn moved_key_attribute_rewrites_parent_key() {
        let mut relation = chain();
        relation.key = attrs(&["A", "C"]);
        let plan = SplitPlan::keyed_by_determinant(attrs(&["B"]), attrs(&["C"]), violation());
        let (parent, _) = split(relation, plan, NormalForm::BoyceCodd).expect("should split");
        assert_eq!(parent.key(), &attrs(&["A", "B"]));
    }
}
