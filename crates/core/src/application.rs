pub mod biodata_service;
