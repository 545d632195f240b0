//! Writes the normalized operations into the "ARQUIVO BASE 800" spreadsheet.
//!
//! Layout contract (1-based rows): rows 1-2 hold the five-field control block (labels, then
//! values), row 3 holds the 113 column titles, data starts at row 4. The collections system
//! rejects styled files, so every cell is written with a plain format: no borders and no bold
//! anywhere, including the title and control rows.

use crate::error::{ErrorType, IntoResult};
use crate::model::{NormalizedRow, TARGET_COLUMNS};
use crate::Result;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::info;

const SHEET_NAME: &str = "Novas Operações";

/// Version tag of the layout, written into the control block.
const VERSION_TAG: &str = "Ver: 07-05-2015";

const CONTROL_LABELS: [&str; 5] = [
    "Dt. Remessa",
    "Número da Remessa",
    "Código da Empresa",
    "Código de Evento Ref. A Atualização",
    "Retomar/Liquidar Operacao não Presentes",
];

/// Width of columns A-C, in character units. The remaining columns keep the default width.
const CONTROL_COLUMN_WIDTH: f64 = 18.0;

/// The control-block identification of one remittance: the date it was produced and a synthetic
/// number composed of the company code and the date.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Remittance {
    date: String,
    number: String,
}

impl Remittance {
    pub(crate) fn new(company_code: &str, now: NaiveDateTime) -> Self {
        Self {
            date: now.format("%d/%m/%Y").to_string(),
            number: format!("{company_code}{}", now.format("%y%m%d")),
        }
    }

    pub(crate) fn date(&self) -> &str {
        &self.date
    }

    pub(crate) fn number(&self) -> &str {
        &self.number
    }
}

/// The default output filename: `{NAME}_ARQUIVO_BASE_800_{dd_mm_yyyy_HH_MM}.xlsx`.
pub(crate) fn default_file_name(company_name: &str, now: NaiveDateTime) -> String {
    format!(
        "{}_ARQUIVO_BASE_800_{}.xlsx",
        company_name.to_uppercase(),
        now.format("%d_%m_%Y_%H_%M")
    )
}

/// Writes the remittance spreadsheet to `path`. Returns `false` without touching the filesystem
/// when `rows` is empty; that is the caller's "nothing to export" signal, not an error.
pub(crate) fn write_spreadsheet(
    rows: &[NormalizedRow],
    company_code: &str,
    path: &Path,
    now: NaiveDateTime,
) -> Result<bool> {
    if rows.is_empty() {
        return Ok(false);
    }
    let remittance = Remittance::new(company_code, now);
    let mut workbook = build_workbook(rows, company_code, &remittance)
        .pub_result(ErrorType::Export)?;
    workbook.save(path).pub_result(ErrorType::Export)?;
    info!("Wrote {} operations to {}", rows.len(), path.display());
    Ok(true)
}

/// Builds the single-sheet workbook in memory.
fn build_workbook(
    rows: &[NormalizedRow],
    company_code: &str,
    remittance: &Remittance,
) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // Writing with an explicit default format keeps every cell free of the borders and bold
    // styling a spreadsheet writer might otherwise attach to header rows.
    let plain = Format::new();

    // Control block, rows 1-2 (0-based 0-1), columns A-E.
    let control_values = [
        remittance.date(),
        remittance.number(),
        company_code,
        VERSION_TAG,
        "",
    ];
    for (col, label) in CONTROL_LABELS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *label, &plain)?;
    }
    for (col, value) in control_values.iter().enumerate() {
        worksheet.write_string_with_format(1, col as u16, *value, &plain)?;
    }

    // Column titles at row 3 (0-based 2), data beneath.
    for (col, title) in TARGET_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(2, col as u16, *title, &plain)?;
    }
    for (row_ix, row) in rows.iter().enumerate() {
        for (col, value) in row.values().iter().enumerate() {
            worksheet.write_string_with_format(row_ix as u32 + 3, col as u16, value.as_str(), &plain)?;
        }
    }

    for col in 0..3 {
        worksheet.set_column_width(col, CONTROL_COLUMN_WIDTH)?;
    }

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::destination_column;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn test_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 7)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn test_row(mci: &str) -> NormalizedRow {
        let mut fields = BTreeMap::new();
        fields.insert(destination_column("mci").unwrap(), mci.to_string());
        NormalizedRow::from_mapped(&fields)
    }

    #[test]
    fn test_remittance() {
        let remittance = Remittance::new("2003", test_now());
        assert_eq!(remittance.date(), "07/04/2026");
        assert_eq!(remittance.number(), "2003260407");
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            default_file_name("Unimed", test_now()),
            "UNIMED_ARQUIVO_BASE_800_07_04_2026_14_30.xlsx"
        );
    }

    #[test]
    fn test_empty_rows_write_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        let written = write_spreadsheet(&[], "2003", &path, test_now()).unwrap();
        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_spreadsheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        let rows = [test_row("1"), test_row("2")];
        let written = write_spreadsheet(&rows, "2003", &path, test_now()).unwrap();
        assert!(written);
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    /// Reads one file out of the xlsx (zip) buffer.
    fn archive_file(buffer: &[u8], name: &str) -> String {
        use std::io::Read;
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(buffer)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_build_workbook_layout() {
        let rows = [test_row("1"), test_row("2")];
        let remittance = Remittance::new("2003", test_now());
        let mut workbook = build_workbook(&rows, "2003", &remittance).unwrap();
        let buffer = workbook.save_to_buffer().unwrap();

        let workbook_xml = archive_file(&buffer, "xl/workbook.xml");
        assert!(workbook_xml.contains(r#"name="Novas Operações""#));

        // Control block in rows 1-2 spans columns A-E, titles sit at row 3 across all 113
        // columns ("DI" is the 113th), the two data rows at 4-5, and nothing below.
        let sheet = archive_file(&buffer, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<c r="A1""#));
        assert!(sheet.contains(r#"<c r="E1""#));
        assert!(!sheet.contains(r#"<c r="F1""#));
        assert!(sheet.contains(r#"<c r="E2""#));
        assert!(sheet.contains(r#"<c r="A3""#));
        assert!(sheet.contains(r#"<c r="DI3""#));
        assert!(sheet.contains(r#"<c r="A4""#));
        assert!(sheet.contains(r#"<c r="A5""#));
        assert!(!sheet.contains(r#"<row r="6""#));

        // The control labels, the computed values and the first/last column titles are all
        // present as strings.
        let strings = archive_file(&buffer, "xl/sharedStrings.xml");
        assert!(strings.contains("Dt. Remessa"));
        assert!(strings.contains("2003260407"));
        assert!(strings.contains("07/04/2026"));
        assert!(strings.contains(VERSION_TAG));
        assert!(strings.contains("TIPO"));
        assert!(strings.contains("COD_CLASSIFICACAO_OPERACAO"));

        // No bold font and no border styles anywhere: only the single empty default border.
        let styles = archive_file(&buffer, "xl/styles.xml");
        assert!(!styles.contains("<b/>"));
        assert!(styles.contains(r#"<borders count="1">"#));
        assert!(!styles.contains(r#"style="thin""#));
    }
}
