//! Column-ordered in-memory tables.
//!
//! A [`Table`] owns its [`Column`]s. Moving a column to another table goes
//! through [`Table::take_column`] and [`Table::push_column`], so column data
//! is never shared between two tables.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use super::attribute::AttributeSet;
use super::error::Error;
use super::value::Value;

/// A named sequence of cells.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rows over named columns of equal length.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAttribute`] if two columns share a name and
    /// [`Error::ColumnLength`] if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, Error> {
        let mut table = Self::default();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Builds a table from a header and row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowWidth`] for a row whose width differs from the
    /// header's and [`Error::DuplicateAttribute`] for a repeated header name.
    pub fn from_rows<S, R>(header: &[S], rows: impl IntoIterator<Item = R>) -> Result<Self, Error>
    where
        S: AsRef<str>,
        R: IntoIterator<Item = Value>,
    {
        let mut columns: Vec<Column> = header
            .iter()
            .map(|name| Column::new(name.as_ref(), Vec::new()))
            .collect();
        for (row, cells) in rows.into_iter().enumerate() {
            let mut found = 0;
            for cell in cells {
                if let Some(column) = columns.get_mut(found) {
                    column.values.push(cell);
                }
                found += 1;
            }
            if found != header.len() {
                return Err(Error::RowWidth {
                    row,
                    expected: header.len(),
                    found,
                });
            }
        }
        Self::new(columns)
    }

    /// The column names, in column order.
    #[must_use]
    pub fn schema(&self) -> AttributeSet {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cell at `row` in column `name`.
    #[must_use]
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name)?.values.get(row)
    }

    /// Row-major view of the cells, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).map(move |row| self.columns.iter().map(|c| &c.values[row]).collect())
    }

    fn indices(&self, attrs: &AttributeSet) -> Option<Vec<usize>> {
        attrs
            .iter()
            .map(|name| self.columns.iter().position(|column| &column.name == name))
            .collect()
    }

    fn tuple(&self, row: usize, indices: &[usize]) -> Vec<&Value> {
        indices.iter().map(|&i| &self.columns[i].values[row]).collect()
    }

    /// Whether the projection onto `attrs` has no repeated tuple.
    ///
    /// An attribute missing from the table makes the answer `false`.
    #[must_use]
    pub fn is_duplicate_free(&self, attrs: &AttributeSet) -> bool {
        self.indices(attrs).is_some() && self.first_duplicate(attrs).is_none()
    }

    /// The first tuple of the projection onto `attrs` that repeats an
    /// earlier one.
    #[must_use]
    pub fn first_duplicate(&self, attrs: &AttributeSet) -> Option<Vec<Value>> {
        let indices = self.indices(attrs)?;
        let mut seen = HashSet::with_capacity(self.rows);
        (0..self.rows)
            .map(|row| self.tuple(row, &indices))
            .find(|tuple| !seen.insert(tuple.clone()))
            .map(|tuple| tuple.into_iter().cloned().collect())
    }

    /// The first `(attribute, row)` among `attrs` holding a null.
    #[must_use]
    pub fn find_null(&self, attrs: &AttributeSet) -> Option<(String, usize)> {
        attrs.iter().find_map(|name| {
            let column = self.column(name)?;
            let row = column.values.iter().position(Value::is_null)?;
            Some((name.clone(), row))
        })
    }

    /// Whether every pair of rows agreeing on `determinant` also agrees on
    /// `dependent`.
    #[must_use]
    pub fn holds(&self, determinant: &AttributeSet, dependent: &AttributeSet) -> bool {
        let (Some(left), Some(right)) = (self.indices(determinant), self.indices(dependent)) else {
            return false;
        };
        let mut images: HashMap<Vec<&Value>, Vec<&Value>> = HashMap::with_capacity(self.rows);
        (0..self.rows).all(|row| {
            let image = self.tuple(row, &right);
            match images.entry(self.tuple(row, &left)) {
                hashbrown::hash_map::Entry::Occupied(entry) => *entry.get() == image,
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(image);
                    true
                }
            }
        })
    }

    /// A copy of the columns named in `attrs`, in `attrs` order. Unknown
    /// names are skipped. Rows are not de-duplicated.
    #[must_use]
    pub fn project(&self, attrs: &AttributeSet) -> Self {
        let columns: Vec<Column> = attrs
            .iter()
            .filter_map(|name| self.column(name).cloned())
            .collect();
        let rows = if columns.is_empty() { 0 } else { self.rows };
        Self { columns, rows }
    }

    /// Removes column `name` and hands it to the caller.
    pub fn take_column(&mut self, name: &str) -> Option<Column> {
        let index = self.columns.iter().position(|column| column.name == name)?;
        let column = self.columns.remove(index);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        Some(column)
    }

    /// Appends `column` on the right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAttribute`] if the name is taken and
    /// [`Error::ColumnLength`] if its length differs from the row count.
    pub fn push_column(&mut self, column: Column) -> Result<(), Error> {
        if self.contains(&column.name) {
            return Err(Error::DuplicateAttribute {
                attribute: column.name,
            });
        }
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(Error::ColumnLength {
                column: column.name,
                expected: self.rows,
                found: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Drops repeated rows, keeping the first occurrence of each.
    pub fn dedup_rows(&mut self) {
        let keep: Vec<bool> = {
            let all: Vec<usize> = (0..self.columns.len()).collect();
            let mut seen = HashSet::with_capacity(self.rows);
            (0..self.rows)
                .map(|row| seen.insert(self.tuple(row, &all)))
                .collect()
        };
        self.retain_rows(&keep);
    }

    /// Whether column `name` holds an empty list in some row.
    #[must_use]
    pub fn has_empty_list(&self, name: &str) -> bool {
        self.column(name).is_some_and(|column| {
            column
                .values
                .iter()
                .any(|value| matches!(value, Value::List(items) if items.is_empty()))
        })
    }

    /// Drops every row whose cell in column `name` is an empty list.
    /// Returns how many rows were dropped.
    pub fn drop_empty_lists(&mut self, name: &str) -> usize {
        let Some(column) = self.column(name) else {
            return 0;
        };
        let keep: Vec<bool> = column
            .values
            .iter()
            .map(|value| !matches!(value, Value::List(items) if items.is_empty()))
            .collect();
        let before = self.rows;
        self.retain_rows(&keep);
        before - self.rows
    }

    fn retain_rows(&mut self, keep: &[bool]) {
        if keep.iter().all(|&kept| kept) {
            return;
        }
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.values.retain(|_| flags.next().copied().unwrap_or(true));
        }
        self.rows = keep.iter().filter(|&&kept| kept).count();
    }

    /// Unnests column `name`: each row whose cell is a list becomes one row
    /// per element (an empty list becomes a single null), other columns
    /// repeated. Returns `false` if the column does not exist.
    pub fn explode(&mut self, name: &str) -> bool {
        let Some(target) = self.columns.iter().position(|column| column.name == name) else {
            return false;
        };
        let mut exploded: Vec<Vec<Value>> = self.columns.iter().map(|_| Vec::new()).collect();
        for row in 0..self.rows {
            let items = match &self.columns[target].values[row] {
                Value::List(items) if items.is_empty() => alloc::vec![Value::Null],
                Value::List(items) => items.clone(),
                other => alloc::vec![other.clone()],
            };
            for item in items {
                for (i, values) in exploded.iter_mut().enumerate() {
                    if i == target {
                        values.push(item.clone());
                    } else {
                        values.push(self.columns[i].values[row].clone());
                    }
                }
            }
        }
        self.rows = exploded.first().map_or(0, Vec::len);
        for (column, values) in self.columns.iter_mut().zip(exploded) {
            column.values = values;
        }
        true
    }

    /// Natural join on the shared column names. The result has `self`'s
    /// columns followed by `other`'s remaining ones.
    #[must_use]
    pub fn natural_join(&self, other: &Self) -> Self {
        let shared = self.schema().intersection(&other.schema());
        let extra = other.schema().difference(&shared);
        let (Some(left), Some(right), Some(rest)) = (
            self.indices(&shared),
            other.indices(&shared),
            other.indices(&extra),
        ) else {
            return Self::default();
        };

        let mut buckets: HashMap<Vec<&Value>, Vec<usize>> = HashMap::new();
        for row in 0..other.rows {
            buckets.entry(other.tuple(row, &right)).or_default().push(row);
        }

        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .map(|column| Column::new(column.name.as_str(), Vec::new()))
            .chain(rest.iter().map(|&i| Column::new(other.columns[i].name.as_str(), Vec::new())))
            .collect();
        let mut rows = 0;
        for row in 0..self.rows {
            let Some(matches) = buckets.get(&self.tuple(row, &left)) else {
                continue;
            };
            for &matched in matches {
                let cells = self
                    .columns
                    .iter()
                    .map(|column| &column.values[row])
                    .chain(rest.iter().map(|&i| &other.columns[i].values[matched]));
                for (column, cell) in columns.iter_mut().zip(cells) {
                    column.values.push(cell.clone());
                }
                rows += 1;
            }
        }
        Self { columns, rows }
    }

    /// Whether both tables hold the same set of rows over the same set of
    /// columns, ignoring column order, row order and repeated rows.
    #[must_use]
    pub fn same_rows(&self, other: &Self) -> bool {
        let schema = self.schema();
        if schema != other.schema() {
            return false;
        }
        let (Some(mine), Some(theirs)) = (self.indices(&schema), other.indices(&schema)) else {
            return false;
        };
        let left: HashSet<Vec<&Value>> = (0..self.rows).map(|row| self.tuple(row, &mine)).collect();
        let right: HashSet<Vec<&Value>> =
            (0..other.rows).map(|row| other.tuple(row, &theirs)).collect();
        left == right
    }

    /// Names of the columns holding at least one list cell.
    #[must_use]
    pub fn list_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| column.values.iter().any(|value| matches!(value, Value::List(_))))
            .map(|column| column.name.to_string())
            .collect()
    }
}
