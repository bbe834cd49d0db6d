use error_stack::ResultExt;
use google_sheets4::{
    api::{
        AddSheetRequest, BatchUpdateSpreadsheetRequest, GridProperties, Request, Scope,
        SheetProperties, ValueRange,
    },
    oauth2, Sheets,
};
use std::fmt::Debug;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::spreadsheet::{SpreadsheetError, SpreadsheetSession};

use super::{
    auth::{self},
    flatten_double_vec::IntoStringRows,
    http_client::{self},
    value_range_factory::ValueRangeFactory,
    HttpsConnector,
};

/// An authorized Sheets hub bound to one spreadsheet.
pub struct SpreadsheetManager {
    pub spreadsheet_id: String,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {:?} }}",
            self.spreadsheet_id
        )
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new", skip(secret))]
    pub async fn new(
        spreadsheet_id: &str,
        secret: oauth2::ServiceAccountKey,
    ) -> error_stack::Result<Self, SpreadsheetError> {
        let client = http_client::http_client()?;
        let auth = auth::auth(secret, client.clone()).await?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, auth);

        Ok(SpreadsheetManager {
            spreadsheet_id: spreadsheet_id.to_string(),
            hub,
        })
    }

    #[instrument]
    async fn fetch_sheet_titles(&self) -> error_stack::Result<Vec<String>, SpreadsheetError> {
        let response = self
            .hub
            .spreadsheets()
            .get(&self.spreadsheet_id)
            .param("fields", "sheets.properties.title")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetError::FailedToFetchSpreadsheet)
            .attach_printable_lazy(|| {
                format!("Failed to open spreadsheet {}", self.spreadsheet_id)
            })?;

        let sheets = response.1.sheets.unwrap_or_default();

        Ok(sheets
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|props| props.title))
            .collect())
    }
}

#[async_trait::async_trait]
impl SpreadsheetSession for SpreadsheetManager {
    #[instrument]
    async fn worksheet_exists(&self, title: &str) -> error_stack::Result<bool, SpreadsheetError> {
        let titles = self.fetch_sheet_titles().await?;
        Ok(titles.iter().any(|t| t == title))
    }

    #[instrument]
    async fn add_worksheet(
        &self,
        title: &str,
        rows: u32,
        columns: u32,
    ) -> error_stack::Result<(), SpreadsheetError> {
        let to_i32 = |n: u32| {
            i32::try_from(n)
                .change_context(SpreadsheetError::FailedToAddWorksheet)
                .attach_printable_lazy(|| format!("Grid dimension {} does not fit in i32", n))
        };

        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                add_sheet: Some(AddSheetRequest {
                    properties: Some(SheetProperties {
                        title: Some(title.to_string()),
                        grid_properties: Some(GridProperties {
                            row_count: Some(to_i32(rows)?),
                            column_count: Some(to_i32(columns)?),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, &self.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetError::FailedToAddWorksheet)
            .attach_printable_lazy(|| format!("Failed to add worksheet {} ", title))
    }

    #[instrument(skip(values), fields(cells = values.len()))]
    async fn append_row(
        &self,
        title: &str,
        values: &[String],
    ) -> error_stack::Result<(), SpreadsheetError> {
        let range = A1Notation::sheet_origin(title);
        let value_range = ValueRange::from_single_row(values);

        // RAW keeps phone numbers and dates as the exact strings that were submitted.
        self.hub
            .spreadsheets()
            .values_append(value_range, &self.spreadsheet_id, range.as_ref())
            .value_input_option("RAW")
            .insert_data_option("INSERT_ROWS")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetError::FailedToAppendRow)
            .attach_printable_lazy(|| format!("Failed to append to range {} ", range))
    }

    #[instrument]
    async fn read_all_values(
        &self,
        title: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetError> {
        let range = A1Notation::whole_sheet(title);

        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, range.as_ref())
            .major_dimension("ROWS")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        // An empty sheet comes back without `values`.
        Ok(response
            .1
            .values
            .map(IntoStringRows::into_string_rows)
            .unwrap_or_default())
    }
}

