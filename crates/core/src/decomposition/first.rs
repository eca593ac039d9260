use alloc::vec::Vec;
use core::mem;

use super::error::Error;
use super::split::{split, SplitPlan};
use crate::model::attribute::AttributeSet;
use crate::model::dependency::{Dependency, FunctionalDependency, MultivaluedDependency};
use crate::model::relation::Relation;
use crate::normal_form::{check_1nf, NormalForm, Violation};

/// Brings every relation to first normal form.
///
/// For each declared multivalued attribute outside the key, the FDs it
/// determines are split off first, then the first FD it depends on. After
/// that every list column of every resulting relation is unnested row-wise,
/// the multivalued declaration is cleared and the rows are de-duplicated.
///
/// Unnesting column `a` adds `a` to the key, since the old key no longer
/// identifies a row. An FD `X -> a, Y` stops holding once `a` is unnested,
/// so it is rewritten into the MVD `X ->> a` plus `X -> Y`. A non-key column
/// holding an empty list is not unnested in place; it moves to a child
/// `<name>_<column>` keyed by `key ∪ {column}`.
///
/// # Errors
///
/// Returns [`Error::NonTermination`] if a relation still fails 1NF after
/// unnesting, e.g. because its key holds nulls or a column mixes kinds.
pub fn to_1nf(relations: Vec<Relation>) -> Result<Vec<Relation>, Error> {
    let mut output = Vec::with_capacity(relations.len());
    for relation in relations {
        for part in split_multivalued(relation)?.into_iter().flat_map(unnest_lists) {
            if let Err(violation) = check_1nf(&part) {
                return Err(Error::NonTermination {
                    relation: part.name,
                    level: NormalForm::First,
                    violation,
                });
            }
            output.push(part);
        }
    }
    Ok(output)
}

#[derive(Clone, Copy)]
enum Side {
    Determinant,
    Dependent,
}

/// The next split that moves the dependents of an FD mentioning
/// `attribute` on `side`, if one still shrinks the relation.
fn next_plan(relation: &Relation, attribute: &str, side: Side) -> Option<SplitPlan> {
    let candidates = match side {
        Side::Determinant => relation.fds_with_determinant_attr(attribute),
        Side::Dependent => relation.fds_with_dependent_attr(attribute),
    };
    let schema = relation.schema();
    candidates
        .into_iter()
        .filter(|fd| matches!(side, Side::Dependent) || !fd.dependent().intersects(relation.key()))
        .map(|fd| {
            let moved = fd
                .dependent()
                .intersection(&schema)
                .difference(fd.determinant())
                .difference(relation.key());
            SplitPlan::keyed_by_determinant(
                fd.determinant().clone(),
                moved,
                Violation::MultivaluedAttributes {
                    attributes: AttributeSet::from_names([attribute]),
                },
            )
        })
        .find(|plan| plan.shrinks(&schema))
}

fn split_multivalued(relation: Relation) -> Result<Vec<Relation>, Error> {
    let Some(attributes) = relation.multivalued.clone() else {
        return Ok(alloc::vec![relation]);
    };
    let mut parent = relation;
    let mut parts = Vec::new();
    for attribute in &attributes {
        if parent.key.contains(attribute) {
            continue;
        }
        while let Some(plan) = next_plan(&parent, attribute, Side::Determinant) {
            let (rest, child) = split(parent, plan, NormalForm::First)?;
            parent = rest;
            parts.push(child);
        }
        if let Some(plan) = next_plan(&parent, attribute, Side::Dependent) {
            let (rest, child) = split(parent, plan, NormalForm::First)?;
            parent = rest;
            parts.push(child);
        }
    }
    parts.insert(0, parent);
    Ok(parts)
}

/// Rewrites every FD whose dependent holds `column` into the MVD
/// `X ->> column` plus the FD on the remaining dependents.
fn rewrite_dependents(relation: &mut Relation, column: &str) {
    let mut fds: Vec<FunctionalDependency> = Vec::with_capacity(relation.fds.len());
    for fd in mem::take(&mut relation.fds) {
        if !fd.dependent().contains(column) || fd.determinant().contains(column) {
            fds.push(fd);
            continue;
        }
        let mvd: MultivaluedDependency =
            Dependency::from_parts(fd.determinant().clone(), AttributeSet::from_names([column]));
        tracing::debug!(relation = relation.name(), from = %fd, to = %mvd, "rewrote dependency");
        if !relation.mvds.contains(&mvd) {
            relation.mvds.push(mvd);
        }
        let mut rest = fd.dependent().clone();
        rest.remove(column);
        if !rest.is_empty() {
            fds.push(Dependency::from_parts(fd.determinant().clone(), rest));
        }
    }
    relation.fds = fds;
}

/// Moves list column `column` into a child keyed by `key ∪ {column}`.
///
/// Rows with an empty list have no value to unnest; they keep their row in
/// the parent and contribute none to the child. Dependencies that mention
/// `column` go with it.
fn split_off_list(relation: &mut Relation, column: &str) -> Option<Relation> {
    let values = relation.table.take_column(column)?;
    let mut table = relation.table.project(&relation.key);
    table.push_column(values).ok()?;
    let dropped = table.drop_empty_lists(column);
    table.explode(column);
    table.dedup_rows();

    let schema = table.schema();
    let (fds, kept): (Vec<_>, Vec<_>) = mem::take(&mut relation.fds)
        .into_iter()
        .partition(|fd| fd.attributes().contains(column));
    relation.fds = kept;
    let (mvds, kept): (Vec<_>, Vec<_>) = mem::take(&mut relation.mvds)
        .into_iter()
        .partition(|mvd| mvd.attributes().contains(column));
    relation.mvds = kept;

    let name = alloc::format!("{}_{column}", relation.name);
    tracing::debug!(
        relation = relation.name(),
        child = %name,
        %column,
        empty = dropped,
        "split off list column with empty lists"
    );
    Some(Relation {
        name,
        table,
        key: relation.key.union(&AttributeSet::from_names([column])),
        fds: fds.into_iter().filter(|fd| fd.fits(&schema)).collect(),
        mvds: mvds.into_iter().filter(|mvd| mvd.fits(&schema)).collect(),
        multivalued: None,
    })
}

/// Unnests every list column, returning the relation followed by any
/// children split off for columns holding empty lists.
///
/// Key columns are unnested first, so a split-off child sees their
/// unnested values.
fn unnest_lists(mut relation: Relation) -> Vec<Relation> {
    let mut columns = relation.table.list_columns();
    columns.sort_by_key(|column| !relation.key.contains(column));

    let mut children = Vec::new();
    for column in columns {
        rewrite_dependents(&mut relation, &column);
        if !relation.key.contains(&column) && relation.table.has_empty_list(&column) {
            if let Some(child) = split_off_list(&mut relation, &column) {
                children.push(child);
                continue;
            }
        }
        relation.table.explode(&column);
        if relation.key.insert(column.as_str()) {
            tracing::debug!(relation = relation.name(), %column, "unnested column joins the key");
        }
    }
    relation.table.dedup_rows();
    relation.multivalued = None;

    let mut parts = alloc::vec![relation];
    parts.extend(children);
    parts
}
