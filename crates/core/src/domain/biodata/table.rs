use serde::Serialize;

/// Rows read back from the worksheet, with row 1 split off as column headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from raw sheet values.
    ///
    /// A sheet holding nothing or only the header row yields an empty table.
    /// The Sheets API drops trailing empty cells, so short rows are padded to
    /// the header width; cells past the last header are discarded.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        if values.len() <= 1 {
            return Self::empty();
        }

        let mut values = values.into_iter();
        let headers = values.next().unwrap_or_default();
        let width = headers.len();

        let rows = values
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
