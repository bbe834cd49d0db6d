use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use crate::ports::spreadsheet::{CredentialSource, SpreadsheetError};

use super::HttpsConnector;

/// Parses the service-account key. Reads the key file but makes no network request.
pub async fn service_account_key(
    credentials: &CredentialSource,
) -> error_stack::Result<oauth2::ServiceAccountKey, SpreadsheetError> {
    match credentials {
        CredentialSource::Inline(value) => {
            serde_json::from_value::<oauth2::ServiceAccountKey>(value.clone())
                .change_context(SpreadsheetError::InvalidCredentials)
                .attach_printable("Inline credentials are not a service account key")
        }
        CredentialSource::File(path) => oauth2::read_service_account_key(path)
            .await
            .change_context(SpreadsheetError::InvalidCredentials)
            .attach_printable_lazy(|| {
                format!(
                    "Could not read service account private key at '{}'",
                    path.display()
                )
            }),
    }
}

pub async fn auth(
    secret: oauth2::ServiceAccountKey,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, SpreadsheetError> {
    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetError::InvalidCredentials)
        .attach_printable("Could not create an authenticator from the service account key")
}
