//! Service account key loading.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::config::DEFAULT_TOKEN_URI;
use crate::error_handling::AnalyticsError;

/// Service account key in Google's JSON key file format.
///
/// Only the fields needed for the JWT-bearer grant are read; the rest of the
/// file is ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account email, used as the assertion issuer
    pub client_email: String,
    /// PEM-encoded RSA private key
    pub private_key: String,
    /// Key id, sent as the JWT `kid` header when present
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// OAuth2 token endpoint
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

// The private key must never reach a log line.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parses a key from the contents of a JSON key file.
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| AnalyticsError::auth_with("malformed service account key file", e))?;
        if key.client_email.trim().is_empty() {
            return Err(AnalyticsError::auth(
                "service account key file has an empty client_email",
            ));
        }
        Ok(key)
    }

    /// Reads and parses a JSON key file.
    pub async fn load(path: &Path) -> Result<Self, AnalyticsError> {
        log::debug!("Loading service account key from {}", path.display());
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AnalyticsError::auth_with(
                format!("failed to read key file {}", path.display()),
                e,
            )
        })?;
        Self::from_json(&json)
    }

    /// Uses `email` as the issuer instead of the key file's `client_email`.
    pub fn with_client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = email.into();
        self
    }

    /// Sends the token request to `uri` instead of the key file's `token_uri`.
    pub fn with_token_uri(mut self, uri: impl Into<String>) -> Self {
        self.token_uri = uri.into();
        self
    }
}
