use alloc::collections::BTreeSet;

use super::violation::Violation;
use crate::model::relation::Relation;
use crate::model::value::ValueKind;

/// First normal form.
///
/// Fails while multivalued attributes are declared, when a key attribute is
/// missing, null or not unique, and when a column mixes value kinds or
/// holds a list. Nulls outside the key are allowed and do not count as a
/// kind.
///
/// # Errors
///
/// Returns the first [`Violation`] found, in the order above.
pub fn check_1nf(relation: &Relation) -> Result<(), Violation> {
    if let Some(attributes) = relation.multivalued() {
        return Err(Violation::MultivaluedAttributes {
            attributes: attributes.clone(),
        });
    }

    let table = relation.table();
    if let Some(attribute) = relation.key().iter().find(|name| !table.contains(name)) {
        return Err(Violation::MissingKeyColumn {
            attribute: attribute.clone(),
        });
    }
    if let Some((attribute, row)) = table.find_null(relation.key()) {
        return Err(Violation::NullInKey { attribute, row });
    }
    if let Some(key) = table.first_duplicate(relation.key()) {
        return Err(Violation::DuplicateKey { key });
    }

    for column in table.columns() {
        let kinds: BTreeSet<ValueKind> = column.values().iter().filter_map(|v| v.kind()).collect();
        if kinds.len() > 1 || kinds.iter().any(|kind| !kind.is_atomic()) {
            return Err(Violation::NonAtomicColumn {
                column: column.name().into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::AttributeSet;
    use crate::model::table::Table;
    use crate::model::value::Value;

    fn relation(rows: Vec<Vec<Value>>) -> Relation {
        let table = Table::from_rows(&["SID", "Name"], rows).expect("should build");
        Relation::new("R", table, AttributeSet::from_names(["SID"])).expect("valid relation")
    }

    #[test]
    fn atomic_unique_key_passes() {
        let r = relation(vec![
            vec![Value::from(1), "Ann".into()],
            vec![Value::from(2), Value::Null],
        ]);
        assert_eq!(check_1nf(&r), Ok(()));
    }

    #[test]
    fn null_in_key_fails() {
        let r = relation(vec![
            vec![Value::from(1), "Ann".into()],
            vec![Value::Null, "Bob".into()],
        ]);
        assert_eq!(
            check_1nf(&r),
            Err(Violation::NullInKey {
                attribute: "SID".into(),
                row: 1
            })
        );
    }

    #[test]
    fn duplicate_key_fails() {
        let r = relation(vec![
            vec![Value::from(1), "Ann".into()],
            vec![Value::from(1), "Bob".into()],
        ]);
        assert_eq!(
            check_1nf(&r),
            Err(Violation::DuplicateKey {
                key: vec![Value::from(1)]
            })
        );
    }

    #[test]
    fn mixed_or_list_column_fails() {
        let r = relation(vec![
            vec![Value::from(1), "Ann".into()],
            vec![Value::from(2), Value::from(7)],
        ]);
        assert!(matches!(check_1nf(&r), Err(Violation::NonAtomicColumn { column }) if column == "Name"));

        let r = relation(vec![vec![Value::from(1), Value::from(vec!["a", "b"])]]);
        assert!(matches!(check_1nf(&r), Err(Violation::NonAtomicColumn { .. })));
    }

    #[test]
    fn declared_multivalued_fails() {
        let r = relation(vec![vec![Value::from(1), "Ann".into()]])
            .with_multivalued(AttributeSet::from_names(["Name"]))
            .expect("known attribute");
        assert_eq!(check_1nf(&r).map_err(|v| v.level()), Err(crate::NormalForm::First));
    }
}
