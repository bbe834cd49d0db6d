use error_stack::{report, ResultExt};
use thiserror::Error;

use super::table::RecordTable;

pub const CSV_FILE_NAME: &str = "staff_biodata_backup.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

#[derive(Error, Debug)]
pub enum CsvExportError {
    #[error("Failed to write CSV record")]
    WriteFailed,
    #[error("Failed to flush CSV output")]
    FlushFailed,
}

/// Serializes the table as UTF-8 CSV: header line first, `\n` line endings,
/// quoting only where a field needs it.
pub fn to_csv(table: &RecordTable) -> error_stack::Result<Vec<u8>, CsvExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(table.headers())
        .change_context(CsvExportError::WriteFailed)
        .attach_printable("header row")?;

    for (index, row) in table.rows().iter().enumerate() {
        writer
            .write_record(row)
            .change_context(CsvExportError::WriteFailed)
            .attach_printable_lazy(|| format!("data row {}", index + 1))?;
    }

    writer
        .into_inner()
        .map_err(|err| report!(CsvExportError::FlushFailed).attach_printable(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[&[&str]]) -> RecordTable {
        RecordTable::from_values(
            values
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_header_then_rows() {
        let csv = to_csv(&table(&[
            &["Full Name", "Phone Number"],
            &["Jane Doe", "555-1111"],
            &["John Roe", "555-3333"],
        ]))
        .unwrap();

        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Full Name,Phone Number\nJane Doe,555-1111\nJohn Roe,555-3333\n"
        );
    }

    #[test]
    fn test_fields_needing_quotes() {
        let csv = to_csv(&table(&[
            &["Address", "Emergency Relationship"],
            &["12 Market Road, Lagos", "the \"big\" brother"],
            &["line one\nline two", "Sister"],
        ]))
        .unwrap();

        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Address,Emergency Relationship\n\
             \"12 Market Road, Lagos\",\"the \"\"big\"\" brother\"\n\
             \"line one\nline two\",Sister\n"
        );
    }

    #[test]
    fn test_utf8_is_preserved() {
        let csv = to_csv(&table(&[&["Full Name"], &["Adébáyọ̀ Ọlá"]])).unwrap();
        assert_eq!(String::from_utf8(csv).unwrap(), "Full Name\nAdébáyọ̀ Ọlá\n");
    }
}
