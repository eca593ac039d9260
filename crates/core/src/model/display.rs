use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result as FmtResult};

use super::relation::Relation;
use super::table::Table;

/// Renders the table as space-aligned columns under a header line, one row
/// per line, with the row index on the left.
impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let cells: Vec<Vec<String>> = self
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        let index_width = self.row_count().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain([column.name().chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (column, width) in self.columns().iter().zip(&widths) {
            write!(f, "  {:>width$}", column.name())?;
        }
        for (index, row) in cells.iter().enumerate() {
            write!(f, "\n{index:<index_width$}")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {cell:>width$}")?;
            }
        }
        Ok(())
    }
}

/// The report block for one relation: name, rows, key and owned
/// dependencies.
impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.table)?;
        writeln!(f, "Key: [{}]", self.key)?;
        writeln!(f, "Functional Dependencies:")?;
        for fd in &self.fds {
            writeln!(f, "{fd}")?;
        }
        if !self.mvds.is_empty() {
            writeln!(f, "Multivalued Dependencies:")?;
            for mvd in &self.mvds {
                writeln!(f, "{mvd}")?;
            }
        }
        Ok(())
    }
}
