// Shared test helpers for mock analytics servers and credentials.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use ga_page_view::Config;
use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

/// RSA key generated for tests only.
pub const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_key.pem");

#[allow(dead_code)]
pub const TEST_TOKEN: &str = "ya29.test-token";
#[allow(dead_code)]
pub const BEARER: &str = "Bearer ya29.test-token";
#[allow(dead_code)]
pub const API_PREFIX: &str = "/analytics/v3";
#[allow(dead_code)]
pub const DATA_PATH: &str = "/analytics/v3/data/ga";
#[allow(dead_code)]
pub const ACCOUNTS_PATH: &str = "/analytics/v3/management/accounts";

/// Writes a service account key file pointing at `token_uri` and returns its path.
pub fn write_key_file(dir: &Path, token_uri: &str) -> PathBuf {
    let key = json!({
        "type": "service_account",
        "project_id": "blog-test",
        "private_key_id": "test-kid",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "reader@blog-test.iam.gserviceaccount.com",
        "token_uri": token_uri,
    });
    let path = dir.join("service-account.json");
    std::fs::write(&path, key.to_string()).expect("Failed to write key file");
    path
}

/// Config wired to a mock server, with a key file in `dir`.
#[allow(dead_code)] // Used by other test files
pub fn mock_config(server: &Server, dir: &Path) -> Config {
    Config {
        key_file: Some(write_key_file(dir, &server.url_str("/token"))),
        api_base: server.url_str(API_PREFIX),
        output: dir.join("context.json"),
        timeout_seconds: 5,
        ..Default::default()
    }
}

/// Expects one successful JWT-bearer token exchange.
#[allow(dead_code)] // Used by other test files
pub fn expect_token(server: &Server) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/token"),
            request::body(url_decoded(contains((
                "grant_type",
                "urn:ietf:params:oauth:grant-type:jwt-bearer"
            )))),
        ])
        .respond_with(json_encoded(json!({
            "access_token": TEST_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }))),
    );
}

/// Expects the accounts → web properties → profiles walk, ending at `profile_id`.
#[allow(dead_code)] // Used by other test files
pub fn expect_profile_discovery(server: &Server, profile_id: &str) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", ACCOUNTS_PATH),
            request::headers(contains(("authorization", BEARER))),
        ])
        .respond_with(json_encoded(json!({"items": [{"id": "1001"}, {"id": "2002"}]}))),
    );
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/analytics/v3/management/accounts/1001/webproperties",
        ))
        .respond_with(json_encoded(json!({"items": [{"id": "UA-1001-1"}]}))),
    );
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/analytics/v3/management/accounts/1001/webproperties/UA-1001-1/profiles",
        ))
        .respond_with(json_encoded(json!({"items": [{"id": profile_id}]}))),
    );
}
