pub mod csv_export;
pub mod field;
pub mod record;
pub mod table;

pub use field::{BiodataField, Gender};
pub use record::{BiodataRecord, BiodataSubmission};
pub use table::RecordTable;
