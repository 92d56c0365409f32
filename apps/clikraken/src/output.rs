//! Rendering of processed rows as a table, delimited text or JSON
//!
//! A [`Record`] is an ordered list of (column, value) pairs. Columns of a
//! batch are the union of the record keys in order of first appearance.

use std::io::Write;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{CliError, CliResult};

pub type Record = Vec<(String, Value)>;

const COLUMN_GAP: &str = "  ";
const HEADER_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv(String),
    Json,
}

pub fn field(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

/// Text of one cell: strings unquoted, booleans capitalised, null empty
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

pub fn headers(records: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for (key, _) in record {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

fn rows(records: &[Record], headers: &[String]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| {
                    record
                        .iter()
                        .find(|(key, _)| key == h)
                        .map(|(_, value)| cell_text(value))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

fn is_numeric(cell: &str) -> bool {
    cell.parse::<Decimal>().is_ok()
}

/// Column of cells aligned on the decimal point, right justified
fn align_decimal(cells: &[String]) -> Vec<String> {
    let frac_width = cells
        .iter()
        .map(|c| c.find('.').map(|i| c.len() - i).unwrap_or(0))
        .max()
        .unwrap_or(0);

    cells
        .iter()
        .map(|c| {
            let frac = c.find('.').map(|i| c.len() - i).unwrap_or(0);
            format!("{}{}", c, " ".repeat(frac_width - frac))
        })
        .collect()
}

fn pad(cell: &str, width: usize, right: bool) -> String {
    if right {
        format!("{:>width$}", cell, width = width)
    } else {
        format!("{:<width$}", cell, width = width)
    }
}

/// Plain text table. Numeric columns are right aligned on the decimal
/// point. Without headers the body is framed by dashed rules.
pub fn render_grid(headers: Option<&[String]>, rows: &[Vec<String>]) -> String {
    let ncols = headers
        .map(|h| h.len())
        .unwrap_or(0)
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if ncols == 0 {
        return String::new();
    }

    let mut columns: Vec<Vec<String>> = (0..ncols)
        .map(|i| {
            rows.iter()
                .map(|row| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    let numeric: Vec<bool> = columns
        .iter()
        .map(|col| {
            let mut filled = col.iter().filter(|c| !c.is_empty()).peekable();
            filled.peek().is_some() && filled.all(|c| is_numeric(c))
        })
        .collect();

    for (col, is_num) in columns.iter_mut().zip(&numeric) {
        if *is_num {
            *col = align_decimal(col);
        }
    }

    let widths: Vec<usize> = (0..ncols)
        .map(|i| {
            let cells = columns[i].iter().map(|c| c.chars().count()).max().unwrap_or(0);
            let header = headers
                .and_then(|h| h.get(i))
                .map(|h| h.chars().count() + HEADER_PADDING)
                .unwrap_or(0);
            cells.max(header)
        })
        .collect();

    let join = |cells: Vec<String>| cells.join(COLUMN_GAP).trim_end().to_string();
    let rule = join(widths.iter().map(|w| "-".repeat(*w)).collect());

    let mut lines = Vec::new();
    match headers {
        Some(headers) => {
            lines.push(join(
                (0..ncols)
                    .map(|i| {
                        let h = headers.get(i).map(String::as_str).unwrap_or("");
                        pad(h, widths[i], numeric[i])
                    })
                    .collect(),
            ));
            lines.push(rule.clone());
        }
        None => lines.push(rule.clone()),
    }

    for r in 0..rows.len() {
        lines.push(join(
            (0..ncols)
                .map(|i| pad(&columns[i][r], widths[i], numeric[i]))
                .collect(),
        ));
    }

    if headers.is_none() {
        lines.push(rule);
    }

    lines.join("\n")
}

/// Table with the record keys as header
pub fn render_table(records: &[Record]) -> String {
    let headers = headers(records);
    render_grid(Some(&headers), &rows(records, &headers))
}

/// Delimited text with a header row
pub fn render_csv(records: &[Record], separator: &str) -> String {
    let headers = headers(records);
    let mut lines = vec![headers.join(separator)];
    lines.extend(rows(records, &headers).into_iter().map(|row| row.join(separator)));
    lines.join("\n")
}

/// JSON array with one object per record
pub fn render_json(records: &[Record]) -> CliResult<String> {
    let array: Vec<Value> = records
        .iter()
        .map(|record| Value::Object(record.iter().cloned().collect::<Map<String, Value>>()))
        .collect();
    serde_json::to_string_pretty(&Value::Array(array))
        .map_err(|e| CliError::Output(e.into()))
}

pub fn render(records: &[Record], format: &OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Csv(separator) => Ok(render_csv(records, separator)),
        OutputFormat::Json => render_json(records),
    }
}

/// Write the records in the requested format, nothing when there are none
pub fn emit(out: &mut dyn Write, format: &OutputFormat, records: &[Record]) -> CliResult<()> {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", render(records, format)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        vec![
            vec![field("asset", "EUR"), field("balance", "1000.5")],
            vec![field("asset", "XBT"), field("balance", "0.1234")],
        ]
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("abc")), "abc");
        assert_eq!(cell_text(&json!(true)), "True");
        assert_eq!(cell_text(&json!(false)), "False");
        assert_eq!(cell_text(&json!(12)), "12");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_headers_union_in_first_seen_order() {
        let records = vec![
            vec![field("a", 1), field("b", 2)],
            vec![field("a", 1), field("c", 3)],
        ];
        assert_eq!(headers(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_table_alignment() {
        let table = render_table(&records());
        let expected = "\
asset      balance
-------  ---------
EUR      1000.5
XBT         0.1234";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_headerless_table_has_rules() {
        let rows = vec![
            vec!["equity".to_string(), "10.0".to_string()],
            vec!["margin level".to_string(), "n/a".to_string()],
        ];
        let table = render_grid(None, &rows);
        let expected = "\
------------  ----
equity        10.0
margin level  n/a
------------  ----";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_csv_uses_separator() {
        assert_eq!(
            render_csv(&records(), "\t"),
            "asset\tbalance\nEUR\t1000.5\nXBT\t0.1234"
        );
    }

    #[test]
    fn test_json_keeps_column_order() {
        let out = render_json(&records()).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["asset"], "XBT");
        assert!(out.find("\"asset\"").unwrap() < out.find("\"balance\"").unwrap());
    }

    #[test]
    fn test_emit_nothing_for_empty_batch() {
        let mut out = Vec::new();
        emit(&mut out, &OutputFormat::Table, &[]).unwrap();
        assert!(out.is_empty());
    }
}
