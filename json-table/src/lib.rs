//! Two-column `Field | Value` rendering of JSON documents for terminal
//! inspection.
//!
//! Nested objects are flattened into dotted keys and fenced by separator
//! rows, arrays are joined one element per line, and long strings are cut
//! into fixed-width chunks.

use comfy_table::{presets, ContentArrangement, Table};
use serde_json::{Map, Value};

pub const DEFAULT_WRAP_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub field: String,
    pub value: String,
}

impl Row {
    fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Cuts `text` into chunks of `width` characters. Newlines count as
/// characters and are not used as break points.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub fn table_rows(data: &Map<String, Value>, wrap_width: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    for (key, value) in data {
        push_value(&mut rows, key, value, wrap_width);
    }
    rows
}

/// Like [`table_rows`], but accepts any JSON value. Anything that is not an
/// object becomes a single `value` row.
pub fn value_rows(value: &Value, wrap_width: usize) -> Vec<Row> {
    match value {
        Value::Object(map) => table_rows(map, wrap_width),
        other => {
            let mut rows = Vec::new();
            push_value(&mut rows, "value", other, wrap_width);
            rows
        }
    }
}

fn push_value(rows: &mut Vec<Row>, key: &str, value: &Value, wrap_width: usize) {
    match value {
        Value::Object(map) => {
            let separator = "-".repeat(wrap_width);
            rows.push(Row::new(separator.clone(), separator.clone()));
            for (nested_key, nested_value) in map {
                push_value(
                    rows,
                    &format!("{}.{}", key, nested_key),
                    nested_value,
                    wrap_width,
                );
            }
            rows.push(Row::new(separator.clone(), separator));
        }
        Value::Array(items) => {
            let marker = format!("[{}]", "-".repeat(wrap_width));
            rows.push(Row::new(marker.clone(), marker));
            let joined = items.iter().map(plain_text).collect::<Vec<_>>().join("\n");
            rows.push(Row::new(key, word_wrap(&joined, wrap_width).join("\n")));
        }
        Value::String(text) => {
            rows.push(Row::new(key, word_wrap(text, wrap_width).join("\n")));
        }
        other => rows.push(Row::new(key, other.to_string())),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn render(value: &Value, wrap_width: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL);
    table.set_content_arrangement(ContentArrangement::Disabled);
    table.set_header(vec!["Field", "Value"]);

    for row in value_rows(value, wrap_width) {
        table.add_row(vec![row.field, row.value]);
    }
    table
}

/// Prints `value` to stdout with the default wrap width.
pub fn print_json(value: &Value) {
    println!("{}", render(value, DEFAULT_WRAP_WIDTH));
}
