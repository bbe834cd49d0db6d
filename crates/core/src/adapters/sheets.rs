pub mod auth;
pub mod connector;
pub mod flatten_double_vec;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod value_range_factory;

pub type HttpsConnector = google_sheets4::hyper_rustls::HttpsConnector<
    google_sheets4::hyper::client::HttpConnector,
>;
