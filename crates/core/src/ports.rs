pub mod biodata_repository;
pub mod command_handler;
pub mod spreadsheet;
