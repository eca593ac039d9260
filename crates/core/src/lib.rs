//! Normal-form checking and decomposition for relational schemas.
//!
//! `normform_core` decides which normal form a relation satisfies and
//! splits it into relations that satisfy a target form. It supports six
//! levels, ordered from weakest to strongest:
//!
//! 1. **1NF** -- atomic, homogeneous columns; the key is present, null-free
//!    and unique.
//! 2. **2NF** -- no non-key attribute depends on a proper subset of the key.
//! 3. **3NF** -- no non-key attribute depends on a determinant that is
//!    neither the key nor a superkey.
//! 4. **BCNF** -- the determinant of every non-trivial functional
//!    dependency is a superkey.
//! 5. **4NF** -- the same for every non-trivial multivalued dependency.
//! 6. **5NF** -- every attribute is implied by the others through the
//!    functional dependencies. This is a heuristic, not a full
//!    join-dependency test.
//!
//! Superkeys are decided empirically: a set of attributes is a superkey if
//! the relation's rows, projected onto it, contain no duplicate. The
//! declared dependencies say where to look; the rows decide.
//!
//! # Entry points
//!
//! [`NormalForm::check`] tests one level and returns the
//! [`Violation`](normal_form::Violation) found at the lowest failing level.
//! [`highest_normal_form`] probes from 5NF down. [`normalize`] runs the
//! decomposition cascade up to a target level.
//!
//! ```rust,ignore
//! use normform_core::{normalize, AttributeSet, NormalForm, Relation};
//!
//! let relation = Relation::new("Student", table, AttributeSet::from_names(["SID", "CourseID"]))?
//!     .with_dependencies(vec!["CourseID -> CourseName".parse()?], vec![])?;
//! let result = normalize(relation, NormalForm::Second)?;
//! for relation in &result.relations {
//!     println!("{relation}");
//! }
//! ```
//!
//! # Decomposition
//!
//! Every step cuts one relation in two along a determinant `X`: the child
//! takes `X` and the attributes it determines, the parent keeps the rest
//! and a copy of `X`. Each cut is checked to be lossless against the rows,
//! and strictly narrows both halves, so decomposition terminates.
//! Functional dependencies follow the columns they mention; dependencies
//! that no half can hold are dropped and logged at `debug` level.
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on the model,
//!   violations, errors and [`Normalization`].
//!
//! This crate is `no_std` compatible (requires `alloc`). Reading CSV tables
//! and dependency files lives in the separate `normform_parser` crate.

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod decomposition;
pub mod model;
pub mod normal_form;

pub use decomposition::{normalize, rename_relations, Normalization};
pub use model::{AttributeSet, FunctionalDependency, MultivaluedDependency, Relation, Table, Value};
pub use normal_form::{highest_normal_form, NormalForm};
