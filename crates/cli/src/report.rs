//! Rendering of `normalize` and `check` results, as text or JSON.

use std::fmt::{self, Display, Formatter};

use normform_core::decomposition::Residual;
use normform_core::normal_form::Violation;
use normform_core::{highest_normal_form, NormalForm, Normalization, Relation};
use serde::Serialize;

fn highest_label(highest: Option<NormalForm>) -> String {
    highest.map_or_else(
        || "Input table is not in any normal form".to_string(),
        |level| level.to_string(),
    )
}

/// The decomposed relations, in the layout of the classic `output.txt`.
#[derive(Debug, Serialize)]
pub struct NormalizeReport<'a> {
    pub target: NormalForm,
    pub relations: &'a [Relation],
    pub residual: &'a [Residual],
    /// Present when the highest normal form of the input was requested;
    /// `null` means the input is not even in 1NF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest: Option<Option<NormalForm>>,
}

impl<'a> NormalizeReport<'a> {
    #[must_use]
    pub fn new(
        target: NormalForm,
        normalization: &'a Normalization,
        highest: Option<Option<NormalForm>>,
    ) -> Self {
        Self {
            target,
            relations: &normalization.relations,
            residual: &normalization.residual,
            highest,
        }
    }
}

impl Display for NormalizeReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Normalized Relations in form ({}):", self.target)?;
        writeln!(f)?;
        for relation in self.relations {
            writeln!(f, "{relation}")?;
        }
        if !self.residual.is_empty() {
            writeln!(f, "Not in {}:", self.target)?;
            for residual in self.residual {
                writeln!(f, "{}: {}", residual.relation, residual.violation)?;
            }
            writeln!(f)?;
        }
        if let Some(highest) = self.highest {
            writeln!(
                f,
                "Highest Normal Form of input table: {}",
                highest_label(highest)
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct LevelOutcome {
    pub level: NormalForm,
    pub violation: Option<Violation>,
}

/// Every level checked against one relation.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub relation: &'a str,
    pub levels: Vec<LevelOutcome>,
    pub highest: Option<NormalForm>,
}

impl<'a> CheckReport<'a> {
    #[must_use]
    pub fn new(relation: &'a Relation) -> Self {
        let levels = NormalForm::ALL
            .into_iter()
            .map(|level| LevelOutcome {
                level,
                violation: level.check(relation).err(),
            })
            .collect();
        Self {
            relation: relation.name(),
            levels,
            highest: highest_normal_form(relation),
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.highest.is_some()
    }
}

impl Display for CheckReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.relation)?;
        for outcome in &self.levels {
            match &outcome.violation {
                None => writeln!(f, "  {:>4}: PASS", outcome.level)?,
                Some(violation) => writeln!(f, "  {:>4}: FAIL ({violation})", outcome.level)?,
            }
        }
        writeln!(
            f,
            "Highest Normal Form of input table: {}",
            highest_label(self.highest)
        )
    }
}
