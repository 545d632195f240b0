use crate::model::schema::TARGET_COLUMNS;
use serde::Serialize;
use std::collections::BTreeMap;

/// One normalized operation, projected onto the fixed destination layout.
///
/// Invariant: every row holds exactly one value per entry of
/// [`TARGET_COLUMNS`](crate::model::TARGET_COLUMNS), in schema order. Columns with no source
/// value hold the empty string.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct NormalizedRow {
    values: Vec<String>,
}

impl NormalizedRow {
    /// Projects a mapping of destination-column -> value deterministically over the fixed column
    /// list, substituting the empty string for missing keys. Keys that are not destination
    /// columns are ignored.
    pub(crate) fn from_mapped(fields: &BTreeMap<&'static str, String>) -> Self {
        let values = TARGET_COLUMNS
            .iter()
            .map(|column| fields.get(column).cloned().unwrap_or_default())
            .collect();
        Self { values }
    }

    /// The value for a destination column, `None` if `column` is not part of the layout.
    pub fn get(&self, column: &str) -> Option<&str> {
        let ix = TARGET_COLUMNS.iter().position(|c| *c == column)?;
        Some(&self.values[ix])
    }

    /// The values in schema order, one per destination column.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mapped_fills_missing_columns() {
        let mut fields = BTreeMap::new();
        fields.insert("TIPO", "F".to_string());
        fields.insert("CONTA", "45".to_string());
        let row = NormalizedRow::from_mapped(&fields);

        assert_eq!(row.values().len(), TARGET_COLUMNS.len());
        assert_eq!(row.get("TIPO"), Some("F"));
        assert_eq!(row.get("CONTA"), Some("45"));
        assert_eq!(row.get("AGENCIA"), Some(""));
        assert_eq!(row.get("COD_CLASSIFICACAO_OPERACAO"), Some(""));
        assert_eq!(row.get("NOT A COLUMN"), None);
    }

    #[test]
    fn test_values_follow_schema_order() {
        let mut fields = BTreeMap::new();
        fields.insert("NR OPERAÇÃO", "123".to_string());
        let row = NormalizedRow::from_mapped(&fields);

        // NR OPERAÇÃO is the second column in the layout.
        assert_eq!(row.values()[0], "");
        assert_eq!(row.values()[1], "123");
    }
}
