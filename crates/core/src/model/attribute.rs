use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};

use super::error::Error;

/// An insertion-ordered set of attribute names.
///
/// Equality and hashing are set-based: `{A, B}` equals `{B, A}`. The
/// declaration order is kept only so that keys and dependencies print the
/// way they were written.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, Eq)]
pub struct AttributeSet(Vec<String>);

impl AttributeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a set from names, silently dropping repeated names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.into());
        }
        set
    }

    /// Builds a set from names, rejecting repeated names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAttribute`] for the first repeated name.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.into();
            if set.contains(&name) {
                return Err(Error::DuplicateAttribute { attribute: name });
            }
            set.0.push(name);
        }
        Ok(set)
    }

    /// Parses a `delimiter`-separated list of names, trimming whitespace
    /// around each name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAttributeSet`] if the list (or any item in it)
    /// is empty, and [`Error::DuplicateAttribute`] if a name repeats.
    pub fn parse(input: &str, delimiter: char) -> Result<Self, Error> {
        if input.trim().is_empty() {
            return Err(Error::EmptyAttributeSet);
        }
        let names: Vec<&str> = input.split(delimiter).map(str::trim).collect();
        if names.iter().any(|name| name.is_empty()) {
            return Err(Error::EmptyAttributeSet);
        }
        Self::try_from_names(names)
    }

    /// Adds `name` at the end. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            false
        } else {
            self.0.push(name);
            true
        }
    }

    /// Removes `name`, keeping the order of the rest. Returns `false` if it
    /// was absent.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != name);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.iter().all(|name| other.contains(name))
    }

    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().any(|name| other.contains(name))
    }

    /// `self ∪ other`, in `self`'s order followed by the new names of `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for name in &other.0 {
            result.insert(name.as_str());
        }
        result
    }

    /// `self − other`, in `self`'s order.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|name| !other.contains(name))
                .cloned()
                .collect(),
        )
    }

    /// `self ∩ other`, in `self`'s order.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|name| other.contains(name))
                .cloned()
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Joins the names with `separator`, e.g. for naming a derived relation.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Hash for AttributeSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut names: Vec<&str> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.hash(state);
    }
}

impl Display for AttributeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.join(", "))
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<String> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_names(iter)
    }
}

impl<'a> FromIterator<&'a String> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = &'a String>>(iter: T) -> Self {
        Self::from_names(iter.into_iter().map(ToString::to_string))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(set: &AttributeSet) -> u64 {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_ignores_order() {
        let a = AttributeSet::from_names(["SID", "CourseID"]);
        let b = AttributeSet::from_names(["CourseID", "SID"]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.to_string(), "SID, CourseID");
        assert_eq!(b.to_string(), "CourseID, SID");
    }

    #[test]
    fn parse_trims_and_keeps_order() {
        let set = AttributeSet::parse(" B ,A, C", ',').unwrap();
        assert_eq!(set.names(), ["B", "A", "C"]);
    }

    #[test]
    fn parse_rejects_empty_and_duplicates() {
        assert!(matches!(
            AttributeSet::parse("  ", ','),
            Err(Error::EmptyAttributeSet)
        ));
        assert!(matches!(
            AttributeSet::parse("A,,B", ','),
            Err(Error::EmptyAttributeSet)
        ));
        assert!(matches!(
            AttributeSet::parse("A, B, A", ','),
            Err(Error::DuplicateAttribute { attribute }) if attribute == "A"
        ));
    }

    #[test]
    fn set_algebra() {
        let key = AttributeSet::from_names(["A", "B"]);
        let a = AttributeSet::from_names(["A"]);
        let c = AttributeSet::from_names(["C"]);

        assert!(a.is_proper_subset(&key));
        assert!(!key.is_proper_subset(&key));
        assert!(key.is_subset(&key));
        assert!(a.intersects(&key));
        assert!(!c.intersects(&key));
        assert_eq!(key.union(&c).names(), ["A", "B", "C"]);
        assert_eq!(key.difference(&a).names(), ["B"]);
        assert_eq!(key.intersection(&a).names(), ["A"]);
    }

    #[test]
    fn insert_and_remove() {
        let mut set = AttributeSet::new();
        assert!(set.insert("A"));
        assert!(!set.insert("A"));
        assert!(set.insert("B"));
        assert!(set.remove("A"));
        assert!(!set.remove("A"));
        assert_eq!(set.names(), ["B"]);
    }
}
