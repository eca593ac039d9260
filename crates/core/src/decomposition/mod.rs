use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use self::error::Error;
use self::split::{split, SplitPlan};
use crate::model::relation::Relation;
use crate::model::table::Table;
use crate::normal_form::{NormalForm, Violation};

pub mod error;
pub mod first;
pub mod functional;
pub mod multivalued;
mod split;

pub use first::to_1nf;
pub use functional::{to_2nf, to_3nf, to_bcnf};
pub use multivalued::{to_4nf, to_5nf, validate_mvds};

/// A relation left failing the target level, with the reason.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residual {
    pub relation: String,
    pub violation: Violation,
}

/// Result of [`normalize`].
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    /// The decomposed relations, each satisfying the target level unless
    /// listed in `residual`.
    pub relations: Vec<Relation>,
    /// Relations passed through without satisfying the target. Only 5NF,
    /// which is never decomposed, produces entries here.
    pub residual: Vec<Residual>,
}

/// Decomposes `relation` into relations that satisfy `target`.
///
/// Runs the transforms in order, from [`to_1nf`] up to the target. For
/// 4NF and above, the MVDs handed to [`to_4nf`] are the relation's declared
/// MVDs plus the ones derived while unnesting list columns. Output names
/// are made unique by suffixing `_2`, `_3`, … to repeats.
///
/// # Errors
///
/// Returns [`Error::NonTermination`] if some relation cannot be brought to
/// a level, for example because its rows contradict its declared FDs.
pub fn normalize(relation: Relation, target: NormalForm) -> Result<Normalization, Error> {
    tracing::debug!(relation = relation.name(), ?target, "normalizing");
    let declared = relation.mvds.clone();

    let mut relations = to_1nf(alloc::vec![relation])?;
    for level in [NormalForm::Second, NormalForm::Third, NormalForm::BoyceCodd] {
        if target >= level {
            relations = decompose(relations, level)?;
        }
    }
    if target >= NormalForm::Fourth {
        let mut mvds = declared;
        for mvd in relations.iter().flat_map(|relation| &relation.mvds) {
            if !mvds.contains(mvd) {
                mvds.push(mvd.clone());
            }
        }
        relations = to_4nf(relations, &mvds)?;
    }
    disambiguate_names(&mut relations);
    tracing::debug!(relations = relations.len(), ?target, "normalized");

    if target == NormalForm::Fifth {
        to_5nf(relations)
    } else {
        Ok(Normalization {
            relations,
            residual: Vec::new(),
        })
    }
}

/// Applies `hook` to every output relation; a `Some` answer replaces the
/// name. Residual entries follow their relation's new name.
#[must_use]
pub fn rename_relations<F>(mut normalization: Normalization, mut hook: F) -> Normalization
where
    F: FnMut(&Relation) -> Option<String>,
{
    let renames: Vec<Option<String>> = normalization.relations.iter().map(&mut hook).collect();
    for residual in &mut normalization.residual {
        let renamed = normalization
            .relations
            .iter()
            .zip(&renames)
            .find(|(relation, _)| relation.name == residual.relation)
            .and_then(|(_, name)| name.as_ref());
        if let Some(name) = renamed {
            residual.relation.clone_from(name);
        }
    }
    for (relation, name) in normalization.relations.iter_mut().zip(renames) {
        let Some(name) = name else {
            continue;
        };
        tracing::debug!(from = relation.name(), to = %name, "renamed relation");
        relation.rename(name);
    }
    normalization
}

/// Whether the natural join of `parts`, projected onto `original`'s
/// columns, has exactly `original`'s rows.
pub fn is_lossless<'a, I>(original: &Table, parts: I) -> bool
where
    I: IntoIterator<Item = &'a Table>,
{
    let mut parts = parts.into_iter();
    let Some(first) = parts.next() else {
        return false;
    };
    let joined = parts.fold(first.clone(), |joined, part| joined.natural_join(part));
    joined.project(&original.schema()).same_rows(original)
}

/// Suffixes repeated names with `_2`, `_3`, … in order of appearance.
fn disambiguate_names(relations: &mut [Relation]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(relations.len());
    for relation in relations {
        if taken.insert(relation.name.clone()) {
            continue;
        }
        let mut n = 2;
        let unique = loop {
            let candidate = alloc::format!("{}_{n}", relation.name);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        taken.insert(unique.clone());
        relation.name = unique;
    }
}

/// The split that repairs `violation`, if any.
fn plan(relation: &Relation, violation: Violation) -> Option<SplitPlan> {
    match violation.level() {
        NormalForm::First | NormalForm::Fifth => None,
        NormalForm::Second | NormalForm::Third | NormalForm::BoyceCodd => {
            functional::plan(relation, violation)
        }
        NormalForm::Fourth => multivalued::plan(relation, violation),
    }
}

/// Splits relations until every one of them satisfies `level`.
///
/// Every input must already satisfy the level below. The work list is a
/// queue: a relation that passes goes to the output, one that fails is
/// replaced by its two halves at the front of the queue, parent first.
fn decompose(relations: Vec<Relation>, level: NormalForm) -> Result<Vec<Relation>, Error> {
    if let Some(required) = level.previous() {
        for relation in &relations {
            if let Err(violation) = required.check(relation) {
                return Err(Error::Unnormalized {
                    relation: relation.name.clone(),
                    required,
                    violation,
                });
            }
        }
    }

    let mut queue: VecDeque<Relation> = relations.into();
    let mut done = Vec::with_capacity(queue.len());
    while let Some(relation) = queue.pop_front() {
        let violation = match level.check(&relation) {
            Ok(()) => {
                done.push(relation);
                continue;
            }
            Err(violation) => violation,
        };
        tracing::debug!(relation = relation.name(), %violation, "fails {level}");
        let Some(plan) = plan(&relation, violation.clone()) else {
            return Err(Error::NonTermination {
                relation: relation.name,
                level,
                violation,
            });
        };
        let (parent, child) = split(relation, plan, level)?;
        queue.push_front(child);
        queue.push_front(parent);
    }
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::AttributeSet;
    use crate::model::value::Value;

    fn relation(name: &str) -> Relation {
        let table = Table::from_rows(&["A"], vec![vec![Value::from(1)]]).expect("should build");
        Relation::new(name, table, AttributeSet::from_names(["A"])).expect("valid relation")
    }

    #[test]
    fn repeated_names_get_suffixes() {
        let mut relations = vec![relation("R"), relation("R"), relation("R_2"), relation("R")];
        disambiguate_names(&mut relations);
        let names: Vec<&str> = relations.iter().map(Relation::name).collect();
        assert_eq!(names, ["R", "R_2", "R_2_2", "R_3"]);
    }

    #[test]
    fn hook_renames_selected_relations() {
        let normalization = Normalization {
            relations: vec![relation("R"), relation("S")],
            residual: vec![Residual {
                relation: "S".into(),
                violation: Violation::JoinDependency {
                    attribute: "A".into(),
                },
            }],
        };
        let renamed = rename_relations(normalization, |relation| {
            (relation.name() == "S").then(|| "Course".into())
        });
        let names: Vec<&str> = renamed.relations.iter().map(Relation::name).collect();
        assert_eq!(names, ["R", "Course"]);
        assert_eq!(renamed.residual[0].relation, "Course");
    }

    #[test]
    fn chained_renames_move_each_residual_once() {
        let residual = |name: &str| Residual {
            relation: name.into(),
            violation: Violation::JoinDependency {
                attribute: "A".into(),
            },
        };
        let normalization = Normalization {
            relations: vec![relation("R"), relation("S")],
            residual: vec![residual("R"), residual("S")],
        };
        let renamed = rename_relations(normalization, |relation| match relation.name() {
            "R" => Some("S".into()),
            "S" => Some("T".into()),
            _ => None,
        });
        let names: Vec<&str> = renamed.relations.iter().map(Relation::name).collect();
        assert_eq!(names, ["S", "T"]);
        let residual: Vec<&str> = renamed.residual.iter().map(|r| r.relation.as_str()).collect();
        assert_eq!(residual, ["S", "T"]);
    }

    #[test]
    fn lossless_needs_parts() {
        let table = relation("R").table;
        assert!(!is_lossless(&table, []));
        assert!(is_lossless(&table, [&table]));
    }
}
