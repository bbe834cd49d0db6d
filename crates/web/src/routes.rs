use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use chrono::Local;
use error_stack::Report;
use staff_biodata_core::domain::biodata::csv_export::{to_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
use staff_biodata_core::domain::biodata::{BiodataSubmission, RecordTable};
use staff_biodata_core::ports::biodata_repository::{
    BiodataRepository, BiodataRepositoryError, HealthReport,
};
use tracing::{error, info, instrument};

use crate::page::{self, Banner, PageView};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn BiodataRepository>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("repository", &"<BiodataRepository>")
            .finish()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/download.csv", get(download_csv))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Logs the whole report and keeps only the top context for the user.
fn user_message(report: &Report<BiodataRepositoryError>) -> String {
    error!("{:?}", report);
    report.current_context().to_string()
}

async fn load_table(state: &AppState) -> Result<RecordTable, String> {
    state
        .repository
        .read_all_records()
        .await
        .map_err(|report| user_message(&report))
}

fn render(
    state: &AppState,
    banner: Option<Banner>,
    table: Result<RecordTable, String>,
) -> Html<String> {
    Html(page::render(&PageView {
        banner,
        unconfigured: state.repository.health().credentials.is_none(),
        table,
    }))
}

#[instrument]
async fn index(State(state): State<AppState>) -> Html<String> {
    let table = load_table(&state).await;
    render(&state, None, table)
}

#[instrument(skip(submission))]
async fn submit(
    State(state): State<AppState>,
    Form(submission): Form<BiodataSubmission>,
) -> Html<String> {
    let record = submission.into_record(Local::now().naive_local());

    let banner = match state.repository.append_record(&record).await {
        Ok(()) => {
            info!("Biodata submission saved");
            Banner::Saved
        }
        Err(report) => Banner::SaveFailed {
            configuration: report.current_context().is_configuration(),
            message: user_message(&report),
        },
    };

    let table = load_table(&state).await;
    render(&state, Some(banner), table)
}

#[instrument]
async fn download_csv(State(state): State<AppState>) -> Response {
    let table = match load_table(&state).await {
        Ok(table) => table,
        Err(message) => return (StatusCode::SERVICE_UNAVAILABLE, message).into_response(),
    };

    if table.is_empty() {
        return (StatusCode::NOT_FOUND, "No data available").into_response();
    }

    match to_csv(&table) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, CSV_MIME_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(report) => {
            error!("{:?}", report);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                report.current_context().to_string(),
            )
                .into_response()
        }
    }
}

async fn healthz(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.repository.health())
}
