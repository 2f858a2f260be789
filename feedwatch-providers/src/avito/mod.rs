//! Avito integration.
//!
//! Avito issues short-lived access tokens via the client-credentials grant.
//! Tokens are cached per account (see [`feedwatch_store::CredentialStore`])
//! and reissued when expired, or once when the report endpoint answers 403.

mod api;
mod error;
mod fetcher;
mod issuer;
pub(crate) mod parser;

pub use api::{AvitoApiClient, AVITO_REPORT_URL};
pub use error::AvitoError;
pub use fetcher::{AvitoReportFetcher, CREDENTIAL_PREFIX};
pub use issuer::{AvitoTokenIssuer, AVITO_TOKEN_URL};
