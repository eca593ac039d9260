//! Functional and multivalued dependencies.
//!
//! Both kinds share one shape: a determinant attribute set on the left and
//! a dependent attribute set on the right. They differ only in the arrow
//! they are written with and in what the normal-form checker does with
//! them, so they are one generic [`Dependency`] type tagged with a
//! zero-sized [`Kind`] marker.

use alloc::string::{String, ToString};
use core::fmt::{Debug, Display, Formatter, Result as FmtResult};
use core::hash::Hash;
use core::marker::PhantomData;
use core::str::FromStr;

use super::attribute::AttributeSet;
use super::error::Error;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Functional {}
    impl Sealed for super::Multivalued {}
}

/// The flavour of a [`Dependency`].
pub trait Kind: sealed::Sealed + Debug + Copy + Eq + Hash + Default {
    /// Separator between determinant and dependent, e.g. `->`.
    const ARROW: &'static str;
}

/// Marker for `X -> Y`.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Functional;

/// Marker for `X ->> Y`.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Multivalued;

impl Kind for Functional {
    const ARROW: &'static str = "->";
}

impl Kind for Multivalued {
    const ARROW: &'static str = "->>";
}

/// An immutable `determinant -> dependent` pair.
///
/// Two dependencies are equal when their determinant sets and dependent
/// sets are equal as sets.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Dependency<K: Kind> {
    determinant: AttributeSet,
    dependent: AttributeSet,
    #[cfg_attr(feature = "serde", serde(skip))]
    kind: PhantomData<K>,
}

pub type FunctionalDependency = Dependency<Functional>;
pub type MultivaluedDependency = Dependency<Multivalued>;

impl<K: Kind> Dependency<K> {
    /// # Errors
    ///
    /// Returns [`Error::MalformedDependency`] if either side is empty.
    pub fn new(determinant: AttributeSet, dependent: AttributeSet) -> Result<Self, Error> {
        if determinant.is_empty() || dependent.is_empty() {
            return Err(Error::MalformedDependency {
                input: render::<K>(&determinant, &dependent),
                reason: "both sides must name at least one attribute".to_string(),
            });
        }
        Ok(Self::from_parts(determinant, dependent))
    }

    /// Constructor for sides already known to be non-empty.
    pub(crate) const fn from_parts(determinant: AttributeSet, dependent: AttributeSet) -> Self {
        Self {
            determinant,
            dependent,
            kind: PhantomData,
        }
    }

    #[must_use]
    pub const fn determinant(&self) -> &AttributeSet {
        &self.determinant
    }

    #[must_use]
    pub const fn dependent(&self) -> &AttributeSet {
        &self.dependent
    }

    /// `determinant ∪ dependent`.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.determinant.union(&self.dependent)
    }

    /// The dependent attributes that are not already on the left.
    #[must_use]
    pub fn nontrivial_dependent(&self) -> AttributeSet {
        self.dependent.difference(&self.determinant)
    }

    /// Whether every attribute the dependency mentions is in `schema`.
    #[must_use]
    pub fn fits(&self, schema: &AttributeSet) -> bool {
        self.determinant.is_subset(schema) && self.dependent.is_subset(schema)
    }
}

impl FunctionalDependency {
    /// `X -> Y` is trivial when `Y ⊆ X`.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.dependent.is_subset(&self.determinant)
    }
}

impl MultivaluedDependency {
    /// `X ->> Y` is trivial in `schema` when `Y ⊆ X` or `X ∪ Y` covers
    /// the whole schema.
    #[must_use]
    pub fn is_trivial_in(&self, schema: &AttributeSet) -> bool {
        self.dependent.is_subset(&self.determinant) || schema.is_subset(&self.attributes())
    }
}

fn render<K: Kind>(determinant: &AttributeSet, dependent: &AttributeSet) -> String {
    alloc::format!("{determinant} {} {dependent}", K::ARROW)
}

impl<K: Kind> Display for Dependency<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {} {}", self.determinant, K::ARROW, self.dependent)
    }
}

impl<K: Kind> Debug for Dependency<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{self}")
    }
}

/// Splits `input` at its arrow, returning the arrow found and both sides.
fn split_arrow(input: &str) -> Option<(&'static str, &str, &str)> {
    if let Some((left, right)) = input.split_once(Multivalued::ARROW) {
        return Some((Multivalued::ARROW, left, right));
    }
    input
        .split_once(Functional::ARROW)
        .map(|(left, right)| (Functional::ARROW, left, right))
}

fn parse_side(label: &str, side: &str, whole: &str) -> Result<AttributeSet, Error> {
    AttributeSet::parse(side, ',').map_err(|err| match err {
        Error::EmptyAttributeSet => Error::MalformedDependency {
            input: whole.to_string(),
            reason: alloc::format!("empty {label}"),
        },
        other => other,
    })
}

impl<K: Kind> FromStr for Dependency<K> {
    type Err = Error;

    /// Parses `"A, B -> C, D"` (or `->>` for multivalued dependencies).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| Error::MalformedDependency {
            input: input.to_string(),
            reason,
        };
        let (arrow, left, right) =
            split_arrow(input).ok_or_else(|| malformed(alloc::format!("missing `{}`", K::ARROW)))?;
        if arrow != K::ARROW {
            return Err(malformed(alloc::format!(
                "expected `{}`, found `{arrow}`",
                K::ARROW
            )));
        }
        let determinant = parse_side("determinant", left, input)?;
        let dependent = parse_side("dependent", right, input)?;
        Ok(Self::from_parts(determinant, dependent))
    }
}

/// A dependency of either kind, as read from a dependency list.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Functional(FunctionalDependency),
    Multivalued(MultivaluedDependency),
}

impl FromStr for Declaration {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match split_arrow(input) {
            Some((arrow, ..)) if arrow == Multivalued::ARROW => {
                input.parse().map(Self::Multivalued)
            }
            Some(_) => input.parse().map(Self::Functional),
            None => Err(Error::MalformedDependency {
                input: input.to_string(),
                reason: "missing `->` or `->>`".to_string(),
            }),
        }
    }
}
