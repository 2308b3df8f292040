//! JWT-bearer token exchange.
//!
//! The service account signs a short-lived RS256 assertion and trades it at
//! the token endpoint for an OAuth2 access token.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::key::ServiceAccountKey;
use crate::config::{ASSERTION_LIFETIME_SECS, JWT_BEARER_GRANT_TYPE};
use crate::error_handling::{body_excerpt, describe_reqwest_error, describe_status, AnalyticsError};

/// Claims of the signed assertion.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// OAuth2 bearer token for the reporting API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_in: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Lifetime in seconds reported by the token endpoint, if any.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Builds the signed JWT assertion for `scope`, issued at `now`.
pub fn build_assertion(
    key: &ServiceAccountKey,
    scope: &str,
    now: DateTime<Utc>,
) -> Result<String, AnalyticsError> {
    let iat = now.timestamp();
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: scope.to_string(),
        aud: key.token_uri.clone(),
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| AnalyticsError::auth_with("service account private key is not a valid RSA PEM key", e))?;

    encode(&header, &claims, &signing_key)
        .map_err(|e| AnalyticsError::auth_with("failed to sign JWT assertion", e))
}

/// Exchanges a signed assertion for an access token.
///
/// # Errors
///
/// Every failure (signing, transport, non-success status, malformed body)
/// is reported as `AnalyticsError::Authentication`.
pub async fn fetch_access_token(
    client: &reqwest::Client,
    key: &ServiceAccountKey,
    scope: &str,
    now: DateTime<Utc>,
) -> Result<AccessToken, AnalyticsError> {
    let assertion = build_assertion(key, scope, now)?;

    log::debug!(
        "Requesting access token for {} from {}",
        key.client_email,
        key.token_uri
    );

    let response = client
        .post(&key.token_uri)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await
        .map_err(|e| {
            AnalyticsError::auth_with(
                format!("token request failed: {}", describe_reqwest_error(&e)),
                e,
            )
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnalyticsError::auth(format!(
            "token endpoint returned {}: {}",
            describe_status(status),
            body_excerpt(&body)
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AnalyticsError::auth_with("malformed token response", e))?;

    if token.access_token.is_empty() {
        return Err(AnalyticsError::auth("token endpoint returned an empty access token"));
    }

    let token = AccessToken {
        value: token.access_token,
        expires_in: token.expires_in,
    };
    log::info!("Authenticated as {}", key.client_email);
    match token.expires_in() {
        Some(secs) => log::debug!("Access token valid for {}s", secs),
        None => log::debug!("Access token lifetime not reported"),
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const PRIVATE_PEM: &str = include_str!("../../tests/fixtures/test_key.pem");
    const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/test_key.pub.pem");

    fn test_key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "reader@blog.iam.gserviceaccount.com".to_string(),
            private_key: PRIVATE_PEM.to_string(),
            private_key_id: Some("kid-1".to_string()),
            token_uri: "https://oauth2.example.com/token".to_string(),
        }
    }

    #[test]
    fn test_assertion_verifies_with_public_key() {
        let now = Utc::now();
        let jwt = build_assertion(&test_key(), "scope-a", now).unwrap();

        let header = decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("kid-1"));

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.example.com/token"]);
        let data = decode::<AssertionClaims>(
            &jwt,
            &DecodingKey::from_rsa_pem(PUBLIC_PEM.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.iss, "reader@blog.iam.gserviceaccount.com");
        assert_eq!(data.claims.scope, "scope-a");
        assert_eq!(data.claims.iat, now.timestamp());
        assert_eq!(data.claims.exp - data.claims.iat, ASSERTION_LIFETIME_SECS);
    }

    #[test]
    fn test_invalid_pem_is_auth_error() {
        let mut key = test_key();
        key.private_key = "not a key".to_string();
        let err = build_assertion(&key, "scope", Utc::now()).unwrap_err();
        assert!(matches!(err, AnalyticsError::Authentication { .. }));
        assert!(err.to_string().contains("RSA PEM"));
    }

    #[test]
    fn test_access_token_debug_redacts_value() {
        let token = AccessToken::new("ya29.secret");
        assert_eq!(token.as_str(), "ya29.secret");
        assert!(!format!("{:?}", token).contains("ya29"));
        assert_eq!(token.expires_in(), None);
    }

    #[tokio::test]
    async fn test_fetch_access_token_keeps_lifetime() {
        use httptest::{matchers::*, responders::*, Expectation, Server};

        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/token"),
                request::body(url_decoded(contains(("grant_type", JWT_BEARER_GRANT_TYPE)))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "access_token": "ya29.fresh",
                "expires_in": 3599,
                "token_type": "Bearer"
            }))),
        );

        let key = test_key().with_token_uri(server.url_str("/token"));
        let token = fetch_access_token(&reqwest::Client::new(), &key, "scope-a", Utc::now())
            .await
            .unwrap();
        assert_eq!(token.as_str(), "ya29.fresh");
        assert_eq!(token.expires_in(), Some(3599));
    }
}
