//! Normalizes the raw API payload into the fixed destination layout.
//!
//! The transform is pure and one-shot: the same payload always yields the same rows. Per
//! operation, in order: the beneficiary observation is prefixed, the two monetary fields are
//! re-rendered in pt-BR format, API field names are renamed to destination column titles, and
//! the row is projected onto the fixed 113-column layout with empty-string fill.

use crate::api::Payload;
use crate::model::{destination_column, NormalizedRow};
use serde_json::Value;
use std::collections::BTreeMap;

/// The API fields whose values are re-rendered as pt-BR monetary strings.
const MONETARY_FIELDS: [&str; 2] = ["vl_venda", "vl_vencido"];

/// The API field holding the beneficiary/contract observation.
const BENEFICIARY_FIELD: &str = "benefs_contrato";

const BENEFICIARY_PREFIX: &str = "Beneficiário: ";

/// Flattens the payload into one [`NormalizedRow`] per operation, preserving the order in which
/// operations appear. Tax-id entries that are not arrays are skipped, as are array elements that
/// are not objects. An empty payload yields an empty vec.
pub(crate) fn normalize(payload: &Payload) -> Vec<NormalizedRow> {
    let mut rows = Vec::new();
    for operations in payload.data().values() {
        let Some(operations) = operations.as_array() else {
            continue;
        };
        for operation in operations {
            let Some(operation) = operation.as_object() else {
                continue;
            };
            rows.push(normalize_operation(operation));
        }
    }
    rows
}

/// Applies the field-level transforms and the rename/reindex contract to one raw operation.
fn normalize_operation(operation: &serde_json::Map<String, Value>) -> NormalizedRow {
    let mut fields: BTreeMap<&'static str, String> = BTreeMap::new();
    for (key, value) in operation {
        // Fields the destination layout does not know are dropped, not surfaced.
        let Some(column) = destination_column(key) else {
            continue;
        };

        let rendered = if MONETARY_FIELDS.contains(&key.as_str()) {
            render_monetary(value)
        } else {
            let rendered = render_scalar(value);
            if key == BENEFICIARY_FIELD && !rendered.is_empty() {
                format!("{BENEFICIARY_PREFIX}{rendered}")
            } else {
                rendered
            }
        };
        fields.insert(column, rendered);
    }
    NormalizedRow::from_mapped(&fields)
}

/// Renders a scalar JSON value as the string the spreadsheet should carry. Strings pass through
/// unquoted, null becomes the empty string.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Re-renders a monetary value in pt-BR format (`1234.5` -> `"1.234,50"`). A value that does not
/// parse as a number is kept in its original string form; parse failure is non-fatal per field.
fn render_monetary(value: &Value) -> String {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(number) => format_brl(number),
        None => render_scalar(value),
    }
}

/// Formats a number with a period as the thousands separator, a comma as the decimal separator
/// and exactly two decimal places. Stateless: no process-wide locale is consulted.
fn format_brl(value: f64) -> String {
    // format_num renders en-US style ("1,234.50"); swap the separators.
    format_num::format_num!(",.2f", value)
        .replace(',', "\u{0}")
        .replace('.', ",")
        .replace('\u{0}', ".")
}
