/// Winnow-based reader for CSV tables.
///
/// Grammar:
/// ```text
/// table    = record (line_end record)* line_end?
/// line_end = "\r\n" | "\n"
/// record   = field ("," field)*
/// field    = WS* (quoted | list | bare)
/// quoted   = '"' (CHAR | '""')* '"' WS*
/// list     = "[" (CHAR - "]")* "]" WS*
/// bare     = (CHAR - "," - line_end)*
/// ```
///
/// The first record is the header. Blank lines are skipped.
///
/// Cells are typed per column, the way a data-frame reader would: a column
/// whose non-empty cells all read as integers becomes `Int`, one whose cells
/// all read as numbers becomes `Float`, anything else `Text`. An empty
/// unquoted cell is `Null`, while `""` is the empty string. A cell written
/// `[a, b]` (bare or quoted) is a `List`, and its items are typed with the
/// rest of the column.
use normform_core::model::Column;
use normform_core::{Table, Value};
use winnow::ascii::space0;
use winnow::combinator::{alt, cut_err, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::{none_of, take_till};
use winnow::ModalResult;

use crate::error::ParseError;

/// One cell as written, before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawCell {
    text: String,
    quoted: bool,
}

impl RawCell {
    fn is_null(&self) -> bool {
        !self.quoted && self.text.is_empty()
    }

    /// The items of a `[a, b]` cell, or `None` for a scalar cell.
    fn list_items(&self) -> Option<Vec<&str>> {
        let inner = self.text.strip_prefix('[')?.strip_suffix(']')?.trim();
        if inner.is_empty() {
            return Some(Vec::new());
        }
        Some(inner.split(',').map(unquote_item).collect())
    }
}

fn unquote_item(item: &str) -> &str {
    let item = item.trim();
    ['\'', '"']
        .into_iter()
        .find_map(|q| item.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(item)
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row into a [`Table`].
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed quoting, an empty input or column
/// name, a repeated column name, or a row whose width differs from the
/// header's.
pub fn parse_table(input: &str) -> Result<Table, ParseError> {
    let mut stream: &str = input;
    let mut records: Vec<(usize, Vec<RawCell>)> = Vec::new();

    while !stream.is_empty() {
        let start = input.len() - stream.len();
        let cells = record
            .parse_next(&mut stream)
            .map_err(|_| ParseError::at_offset("unterminated quoted field", input, start))?;
        if !stream.is_empty() && line_end.parse_next(&mut stream).is_err() {
            return Err(ParseError::at_offset(
                "expected `,` or end of line",
                input,
                input.len() - stream.len(),
            ));
        }
        if !is_blank(&cells) {
            records.push((start, cells));
        }
    }

    let mut records = records.into_iter();
    let (header_start, header) = records
        .next()
        .ok_or_else(|| ParseError::new("missing header row", 1, 1))?;
    let names = header
        .into_iter()
        .map(|cell| {
            let name = cell.text.trim().to_string();
            if name.is_empty() {
                Err(ParseError::at_offset("empty column name", input, header_start))
            } else {
                Ok(name)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut raw_columns: Vec<Vec<RawCell>> = vec![Vec::new(); names.len()];
    for (start, cells) in records {
        if cells.len() != names.len() {
            return Err(ParseError::at_offset(
                format!("row has {} cells, expected {}", cells.len(), names.len()),
                input,
                start,
            ));
        }
        for (column, cell) in raw_columns.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    let columns = names
        .into_iter()
        .zip(raw_columns)
        .map(|(name, cells)| Column::new(name, type_column(&cells)))
        .collect();
    Table::new(columns).map_err(|err| ParseError::at_offset(err.to_string(), input, header_start))
}

fn is_blank(cells: &[RawCell]) -> bool {
    matches!(cells, [cell] if cell.is_null())
}

// ---------------------------------------------------------------------------
// Typing
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ScalarKind {
    Int,
    Float,
    Text,
}

fn is_number(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit()) && text.parse::<f64>().is_ok()
}

/// The narrowest kind every scalar in a column reads as.
fn column_kind<'a>(scalars: impl IntoIterator<Item = &'a str>) -> ScalarKind {
    let mut kind = ScalarKind::Int;
    for text in scalars {
        if kind == ScalarKind::Int && text.parse::<i64>().is_err() {
            kind = ScalarKind::Float;
        }
        if kind == ScalarKind::Float && !is_number(text) {
            return ScalarKind::Text;
        }
    }
    kind
}

fn scalar(text: &str, kind: ScalarKind) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    match kind {
        ScalarKind::Int => text.parse().map_or_else(|_| Value::from(text), Value::Int),
        ScalarKind::Float => text.parse().map_or_else(|_| Value::from(text), Value::Float),
        ScalarKind::Text => Value::from(text),
    }
}

fn type_column(cells: &[RawCell]) -> Vec<Value> {
    let scalars = cells.iter().flat_map(|cell| match cell.list_items() {
        Some(items) => items,
        None if cell.is_null() => Vec::new(),
        None => vec![cell.text.as_str()],
    });
    let kind = column_kind(scalars.filter(|text| !text.is_empty()));

    cells
        .iter()
        .map(|cell| match cell.list_items() {
            Some(items) => Value::List(items.into_iter().map(|item| scalar(item, kind)).collect()),
            None if cell.is_null() => Value::Null,
            None if cell.quoted && cell.text.is_empty() => Value::Text(String::new()),
            None => scalar(&cell.text, kind),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

fn line_end(input: &mut &str) -> ModalResult<()> {
    alt(("\r\n", "\n")).void().parse_next(input)
}

/// `'"' (CHAR | '""')* '"'`, with `""` standing for one quote.
fn quoted(input: &mut &str) -> ModalResult<RawCell> {
    let text: String = preceded(
        '"',
        cut_err(terminated(
            repeat(0.., alt(("\"\"".value('"'), none_of('"')))),
            ('"', space0),
        )),
    )
    .parse_next(input)?;
    Ok(RawCell { text, quoted: true })
}

/// `[ ... ]` may contain commas, so it is read up to the closing bracket.
fn list(input: &mut &str) -> ModalResult<RawCell> {
    let text = terminated(('[', take_till(0.., ']'), ']').take(), space0).parse_next(input)?;
    Ok(RawCell {
        text: text.to_string(),
        quoted: false,
    })
}

fn bare(input: &mut &str) -> ModalResult<RawCell> {
    let text = take_till(0.., |c: char| matches!(c, ',' | '\n' | '\r')).parse_next(input)?;
    Ok(RawCell {
        text: text.trim().to_string(),
        quoted: false,
    })
}

fn field(input: &mut &str) -> ModalResult<RawCell> {
    space0.parse_next(input)?;
    alt((quoted, list, bare)).parse_next(input)
}

fn record(input: &mut &str) -> ModalResult<Vec<RawCell>> {
    separated(1.., field, ',').parse_next(input)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
