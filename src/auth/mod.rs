//! Authentication against the reporting API.
//!
//! Two ways in:
//! - a service account key file, exchanged for a token with the OAuth2
//!   JWT-bearer grant
//! - a pre-issued access token, used as-is

mod key;
mod token;

use chrono::{DateTime, Utc};

pub use key::ServiceAccountKey;
pub use token::{build_assertion, fetch_access_token, AccessToken, AssertionClaims};

use crate::config::Config;
use crate::error_handling::AnalyticsError;

/// Credentials for one analytics pass.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Signed assertion exchanged at the key's token endpoint
    ServiceAccount(ServiceAccountKey),
    /// Token issued elsewhere
    BearerToken(AccessToken),
}

impl Credentials {
    /// Resolves credentials from the configuration.
    ///
    /// A configured access token wins over a key file. The service account
    /// email and token endpoint settings override the key file's values.
    pub async fn from_config(config: &Config) -> Result<Self, AnalyticsError> {
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Credentials::BearerToken(AccessToken::new(token)));
        }

        let Some(path) = config.key_file.as_deref() else {
            return Err(AnalyticsError::auth(
                "no credentials configured, set GOOGLE_KEY_FILE or GA_ACCESS_TOKEN",
            ));
        };

        let mut key = ServiceAccountKey::load(path).await?;
        if let Some(email) = config.service_account.as_deref() {
            key = key.with_client_email(email);
        }
        if let Some(uri) = config.token_uri.as_deref() {
            key = key.with_token_uri(uri);
        }
        Ok(Credentials::ServiceAccount(key))
    }
}

/// Produces an access token for `scope`.
pub async fn authenticate(
    client: &reqwest::Client,
    credentials: &Credentials,
    scope: &str,
    now: DateTime<Utc>,
) -> Result<AccessToken, AnalyticsError> {
    match credentials {
        Credentials::BearerToken(token) => {
            log::debug!("Using pre-issued access token");
            Ok(token.clone())
        }
        Credentials::ServiceAccount(key) => fetch_access_token(client, key, scope, now).await,
    }
}
