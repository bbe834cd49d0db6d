//! Staff biodata persistence: the record model, the spreadsheet-backed
//! repository and the adapters both front-ends share.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod prettyprint;

pub use application::biodata_service::SheetsBiodataRepository;
pub use domain::biodata::{BiodataRecord, BiodataSubmission, RecordTable};
pub use ports::biodata_repository::{BiodataRepository, BiodataRepositoryError};
