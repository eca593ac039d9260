//! Line-oriented reader for dependency lists.
//!
//! ```text
//! // enrolment
//! SID, CourseID -> Grade
//! CourseID -> CourseName
//! # hobbies vary independently of courses
//! SID ->> Hobby
//! exit
//! ```
//!
//! One dependency per line, `->` for functional and `->>` for multivalued.
//! Blank lines and lines starting with `//` or `#` are skipped, and a line
//! reading `exit` ends the list.

use normform_core::model::Declaration;
use normform_core::{FunctionalDependency, MultivaluedDependency};

use crate::error::ParseError;

/// The dependencies read from one list, in the order they were written.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    pub functional: Vec<FunctionalDependency>,
    pub multivalued: Vec<MultivaluedDependency>,
}

impl Dependencies {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functional.is_empty() && self.multivalued.is_empty()
    }

    /// Appends `other`, keeping the order of both lists.
    pub fn extend(&mut self, other: Self) {
        self.functional.extend(other.functional);
        self.multivalued.extend(other.multivalued);
    }

    fn push(&mut self, declaration: Declaration) {
        match declaration {
            Declaration::Functional(fd) => self.functional.push(fd),
            Declaration::Multivalued(mvd) => self.multivalued.push(mvd),
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('#')
}

/// Parse a dependency list.
///
/// # Errors
///
/// Returns a [`ParseError`] pointing at the first line that is not a
/// well-formed dependency.
pub fn parse_dependency_list(input: &str) -> Result<Dependencies, ParseError> {
    let mut dependencies = Dependencies::default();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        if line == "exit" {
            break;
        }
        let declaration: Declaration = line.parse().map_err(|err: normform_core::model::Error| {
            let column = raw.len() - raw.trim_start().len() + 1;
            ParseError::new(err.to_string(), index + 1, column)
        })?;
        dependencies.push(declaration);
    }
    Ok(dependencies)
}
