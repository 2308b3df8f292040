// Exit status of the binary: analytics failures never fail the build.

mod helpers;

use std::process::Command;

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;

const GA_ENV: &[&str] = &[
    "GOOGLE_KEY_FILE",
    "GOOGLE_SERVICE_ACCOUNT",
    "GA_ACCESS_TOKEN",
    "GA_PROFILE_ID",
    "GA_START_DATE",
    "GA_END_DATE",
    "POPULAR_POST_START",
    "GA_METRIC",
    "GA_CONTEXT_FILE",
];

fn command(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ga_page_view"));
    cmd.current_dir(dir.path());
    for var in GA_ENV {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_token_failure_exits_zero_with_empty_context() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/token"))
            .respond_with(status_code(500).body("backend error")),
    );
    let dir = TempDir::new().unwrap();
    let key_file = helpers::write_key_file(dir.path(), &server.url_str("/token"));
    let output_path = dir.path().join("out/context.json");
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::write(
        &output_path,
        r#"{"theme": "dark", "total_page_view": 5, "total_num_users": 2}"#,
    )
    .unwrap();

    let output = command(&dir)
        .arg("--key-file")
        .arg(&key_file)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("failed to run binary");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(written["theme"], "dark");
    assert!(written.get("total_page_view").is_none());
    assert!(written.get("total_num_users").is_none());
    assert_eq!(written["page_view"], serde_json::json!({}));
}

#[test]
fn test_missing_credentials_exits_zero() {
    let dir = TempDir::new().unwrap();
    let output = command(&dir).output().expect("failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    // Default output path, relative to the working directory.
    assert!(dir.path().join("ga_context.json").exists());
}

#[test]
fn test_unreadable_pages_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = command(&dir)
        .arg("--pages")
        .arg(dir.path().join("missing-pages.json"))
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(1));
}
