use alloc::string::String;
use alloc::vec::Vec;

use super::attribute::AttributeSet;
use super::dependency::{Dependency, FunctionalDependency, Kind, MultivaluedDependency};
use super::error::{AttributeRole, DependencyRef, Error};
use super::table::Table;

/// A named table with its key and the dependencies it owns.
///
/// Every attribute named by the key, a dependency or the multivalued list
/// is a column of the table; the builders reject anything else with
/// [`Error::UnknownAttribute`].
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub(crate) name: String,
    pub(crate) table: Table,
    pub(crate) key: AttributeSet,
    pub(crate) fds: Vec<FunctionalDependency>,
    pub(crate) mvds: Vec<MultivaluedDependency>,
    pub(crate) multivalued: Option<AttributeSet>,
}

fn check_known(
    schema: &AttributeSet,
    attrs: &AttributeSet,
    role: AttributeRole,
) -> Result<(), Error> {
    match attrs.iter().find(|name| !schema.contains(name)) {
        Some(attribute) => Err(Error::UnknownAttribute {
            attribute: attribute.clone(),
            role,
        }),
        None => Ok(()),
    }
}

fn check_dependencies<K: Kind>(
    schema: &AttributeSet,
    dependencies: &[Dependency<K>],
    reference: fn(usize) -> DependencyRef,
) -> Result<(), Error> {
    for (i, dependency) in dependencies.iter().enumerate() {
        let role = AttributeRole::Dependency(reference(i));
        check_known(schema, dependency.determinant(), role)?;
        check_known(schema, dependency.dependent(), role)?;
    }
    Ok(())
}

/// Keeps the first copy of each dependency.
fn dedup<K: Kind>(dependencies: Vec<Dependency<K>>) -> Vec<Dependency<K>> {
    let mut unique: Vec<Dependency<K>> = Vec::with_capacity(dependencies.len());
    for dependency in dependencies {
        if !unique.contains(&dependency) {
            unique.push(dependency);
        }
    }
    unique
}

fn select<'a, K: Kind>(
    dependencies: &'a [Dependency<K>],
    pick: impl Fn(&Dependency<K>) -> bool,
) -> Vec<&'a Dependency<K>> {
    dependencies.iter().filter(|dependency| pick(dependency)).collect()
}

impl Relation {
    /// A relation with no dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAttributeSet`] for an empty key and
    /// [`Error::UnknownAttribute`] for a key attribute that is not a column.
    pub fn new(name: impl Into<String>, table: Table, key: AttributeSet) -> Result<Self, Error> {
        if key.is_empty() {
            return Err(Error::EmptyAttributeSet);
        }
        check_known(&table.schema(), &key, AttributeRole::Key)?;
        Ok(Self {
            name: name.into(),
            table,
            key,
            fds: Vec::new(),
            mvds: Vec::new(),
            multivalued: None,
        })
    }

    /// Attaches dependencies, dropping exact repeats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for the first dependency naming
    /// an attribute outside the schema.
    pub fn with_dependencies(
        mut self,
        fds: Vec<FunctionalDependency>,
        mvds: Vec<MultivaluedDependency>,
    ) -> Result<Self, Error> {
        let schema = self.schema();
        check_dependencies(&schema, &fds, DependencyRef::Functional)?;
        check_dependencies(&schema, &mvds, DependencyRef::Multivalued)?;
        self.fds = dedup(fds);
        self.mvds = dedup(mvds);
        Ok(self)
    }

    /// Declares the columns that still hold list values. An empty set
    /// clears the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] for a name outside the schema.
    pub fn with_multivalued(mut self, attrs: AttributeSet) -> Result<Self, Error> {
        check_known(&self.schema(), &attrs, AttributeRole::Multivalued)?;
        self.multivalued = (!attrs.is_empty()).then_some(attrs);
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn schema(&self) -> AttributeSet {
        self.table.schema()
    }

    #[must_use]
    pub const fn key(&self) -> &AttributeSet {
        &self.key
    }

    #[must_use]
    pub fn fds(&self) -> &[FunctionalDependency] {
        &self.fds
    }

    #[must_use]
    pub fn mvds(&self) -> &[MultivaluedDependency] {
        &self.mvds
    }

    #[must_use]
    pub const fn multivalued(&self) -> Option<&AttributeSet> {
        self.multivalued.as_ref()
    }

    /// FDs whose determinant contains `attr`.
    #[must_use]
    pub fn fds_with_determinant_attr(&self, attr: &str) -> Vec<&FunctionalDependency> {
        select(&self.fds, |fd| fd.determinant().contains(attr))
    }

    /// FDs whose determinant contains every attribute of `attrs`.
    #[must_use]
    pub fn fds_with_determinant_set(&self, attrs: &AttributeSet) -> Vec<&FunctionalDependency> {
        select(&self.fds, |fd| attrs.is_subset(fd.determinant()))
    }

    /// FDs whose dependent contains `attr`.
    #[must_use]
    pub fn fds_with_dependent_attr(&self, attr: &str) -> Vec<&FunctionalDependency> {
        select(&self.fds, |fd| fd.dependent().contains(attr))
    }

    /// FDs whose dependent contains every attribute of `attrs`.
    #[must_use]
    pub fn fds_with_dependent_set(&self, attrs: &AttributeSet) -> Vec<&FunctionalDependency> {
        select(&self.fds, |fd| attrs.is_subset(fd.dependent()))
    }

    #[must_use]
    pub fn mvds_with_determinant_attr(&self, attr: &str) -> Vec<&MultivaluedDependency> {
        select(&self.mvds, |mvd| mvd.determinant().contains(attr))
    }

    #[must_use]
    pub fn mvds_with_determinant_set(&self, attrs: &AttributeSet) -> Vec<&MultivaluedDependency> {
        select(&self.mvds, |mvd| attrs.is_subset(mvd.determinant()))
    }

    #[must_use]
    pub fn mvds_with_dependent_attr(&self, attr: &str) -> Vec<&MultivaluedDependency> {
        select(&self.mvds, |mvd| mvd.dependent().contains(attr))
    }

    #[must_use]
    pub fn mvds_with_dependent_set(&self, attrs: &AttributeSet) -> Vec<&MultivaluedDependency> {
        select(&self.mvds, |mvd| attrs.is_subset(mvd.dependent()))
    }

    /// Whether `a == b` or a single owned FD links them in either
    /// direction. Chains of FDs are not followed.
    #[must_use]
    pub fn related_attr(&self, a: &str, b: &str) -> bool {
        a == b
            || self.fds.iter().any(|fd| {
                (fd.determinant().contains(a) && fd.dependent().contains(b))
                    || (fd.determinant().contains(b) && fd.dependent().contains(a))
            })
    }

    /// Set version of [`related_attr`](Self::related_attr): an owned FD
    /// whose determinant meets one set and whose dependent meets the other.
    #[must_use]
    pub fn related_set(&self, a: &AttributeSet, b: &AttributeSet) -> bool {
        a == b
            || self.fds.iter().any(|fd| {
                (fd.determinant().intersects(a) && fd.dependent().intersects(b))
                    || (fd.determinant().intersects(b) && fd.dependent().intersects(a))
            })
    }

    /// Owned FDs the rows contradict.
    #[must_use]
    pub fn violated_dependencies(&self) -> Vec<&FunctionalDependency> {
        select(&self.fds, |fd| {
            !self.table.holds(fd.determinant(), fd.dependent())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::Value;

    fn abc() -> Table {
        Table::from_rows(
            &["A", "B", "C"],
            vec![
                vec![Value::from(1), "x".into(), Value::from(10)],
                vec![Value::from(2), "x".into(), Value::from(10)],
                vec![Value::from(3), "y".into(), Value::from(20)],
            ],
        )
        .expect("should build")
    }

    fn fd(input: &str) -> FunctionalDependency {
        input.parse().expect("should parse")
    }

    fn relation() -> Relation {
        Relation::new("R", abc(), AttributeSet::from_names(["A"]))
            .and_then(|r| r.with_dependencies(vec![fd("A -> B"), fd("B -> C"), fd("A -> B")], vec![]))
            .expect("valid relation")
    }

    #[test]
    fn builders_reject_unknown_attributes() {
        let err = Relation::new("R", abc(), AttributeSet::from_names(["Z"])).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownAttribute {
                attribute: "Z".into(),
                role: AttributeRole::Key
            }
        );

        let err = relation()
            .with_dependencies(vec![fd("A -> B"), fd("B -> Q")], vec![])
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownAttribute {
                attribute: "Q".into(),
                role: AttributeRole::Dependency(DependencyRef::Functional(1))
            }
        );

        let err = relation()
            .with_multivalued(AttributeSet::from_names(["M"]))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { .. }), "{err}");
    }

    #[test]
    fn repeated_dependencies_are_dropped() {
        assert_eq!(relation().fds().len(), 2);
    }

    #[test]
    fn lookups_use_containment() {
        let r = Relation::new("R", abc(), AttributeSet::from_names(["A"]))
            .and_then(|r| r.with_dependencies(vec![fd("A, B -> C"), fd("A -> B")], vec![]))
            .expect("valid relation");
        assert_eq!(r.fds_with_determinant_attr("B").len(), 1);
        assert_eq!(r.fds_with_determinant_attr("A").len(), 2);
        assert_eq!(
            r.fds_with_determinant_set(&AttributeSet::from_names(["B", "A"]))
                .len(),
            1
        );
        assert_eq!(r.fds_with_dependent_attr("C").len(), 1);
        assert!(r
            .fds_with_dependent_set(&AttributeSet::from_names(["B", "C"]))
            .is_empty());
    }

    #[test]
    fn relatedness_is_single_hop() {
        let r = relation();
        assert!(r.related_attr("A", "A"));
        assert!(r.related_attr("A", "B"));
        assert!(r.related_attr("C", "B"));
        assert!(!r.related_attr("A", "C"));
        assert!(r.related_set(
            &AttributeSet::from_names(["B"]),
            &AttributeSet::from_names(["C"])
        ));
    }

    #[test]
    fn contradicted_dependencies_are_reported() {
        let r = Relation::new("R", abc(), AttributeSet::from_names(["A"]))
            .and_then(|r| r.with_dependencies(vec![fd("B -> A"), fd("B -> C")], vec![]))
            .expect("valid relation");
        let violated = r.violated_dependencies();
        assert_eq!(violated, [&fd("B -> A")]);
    }

    #[test]
    fn empty_multivalued_clears() {
        let r = relation().with_multivalued(AttributeSet::new()).expect("ok");
        assert!(r.multivalued().is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_keeps_cells_and_dependencies() {
        use crate::model::table::Column;

        let table = Table::from_rows(
            &["A", "B", "C"],
            vec![
                vec![Value::from(1), Value::from(vec!["x", "y"]), Value::Float(2.5)],
                vec![Value::from(2), Value::List(vec![]), Value::Null],
            ],
        )
        .expect("should build");
        let r = Relation::new("R", table, AttributeSet::from_names(["A"]))
            .and_then(|r| {
                r.with_dependencies(
                    vec![fd("A -> C")],
                    vec!["A ->> B".parse().expect("should parse")],
                )
            })
            .and_then(|r| r.with_multivalued(AttributeSet::from_names(["B"])))
            .expect("valid relation");

        let json = serde_json::to_string(&r).expect("should serialize");
        let back: Relation = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, r);
        assert_eq!(back.mvds()[0].to_string(), "A ->> B");
        let lists = back.table().column("B").map(Column::values);
        assert_eq!(lists.map(|values| &values[1]), Some(&Value::List(vec![])));
    }
}
