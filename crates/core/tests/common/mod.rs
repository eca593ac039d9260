/// DSL macro for building literal tables.
///
/// Produces a `normform_core::Table`.
///
/// # Syntax
///
/// ```ignore
/// table! {
///     [SID, Name, CourseID];
///     [1, "Ann", "C1"],
///     [2, Value::Null, "C2"],            // any `Into<Value>` expression
///     [3, vec!["a", "b"], "C1"],         // a list cell
/// }
/// ```
#[macro_export]
macro_rules! table {
    ([$($column:ident),* $(,)?]; $([$($cell:expr),* $(,)?]),* $(,)?) => {
        normform_core::Table::from_rows(
            &[$(stringify!($column)),*],
            vec![$(vec![$(normform_core::Value::from($cell)),*]),*],
        )
        .expect("table literal should be rectangular")
    };
}

/// Shorthand for an attribute set.
#[allow(dead_code)]
pub fn attrs(names: &[&str]) -> normform_core::AttributeSet {
    normform_core::AttributeSet::from_names(names.iter().copied())
}

/// Builds a relation from a table, a key and dependency strings.
#[allow(dead_code)]
pub fn relation(
    name: &str,
    table: normform_core::Table,
    key: &[&str],
    fds: &[&str],
    mvds: &[&str],
) -> normform_core::Relation {
    let fds = fds
        .iter()
        .map(|fd| fd.parse().expect("FD should parse"))
        .collect();
    let mvds = mvds
        .iter()
        .map(|mvd| mvd.parse().expect("MVD should parse"))
        .collect();
    normform_core::Relation::new(name, table, attrs(key))
        .and_then(|relation| relation.with_dependencies(fds, mvds))
        .expect("relation should be valid")
}
