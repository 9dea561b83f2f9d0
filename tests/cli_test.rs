//! Runs the `kaggle-probe` binary against a mocked Kaggle API.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `kaggle-probe` command isolated from the caller's shell: no inherited
/// Kaggle variables, an empty config dir and a working dir without `.env`.
fn probe_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("kaggle-probe");
    cmd.current_dir(dir)
        .env_remove("KAGGLE_USERNAME")
        .env_remove("KAGGLE_KEY")
        .env_remove("KAGGLE_API_ENDPOINT")
        .env_remove("RUST_LOG")
        .env("KAGGLE_CONFIG_DIR", dir);
    cmd
}

// The binary blocks, so it runs off the runtime that serves the mock.
async fn run(cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || {
        let mut cmd = cmd;
        cmd.assert()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_key_prints_error_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions/list"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"code": 401, "message": "Unauthenticated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = probe_cmd(dir.path());
    cmd.args(["--username", "someone", "--key", "KGAT_revoked", "--api-endpoint"])
        .arg(server.uri());

    run(cmd)
        .await
        .success()
        .stdout("Authentication successful\nError: (401 Unauthorized) Unauthenticated\n")
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn accepted_token_prints_count() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions/list"))
        .and(query_param("sortBy", "latestDeadline"))
        .and(bearer_token("KGAT_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"ref": "titanic"},
            {"ref": "digit-recognizer"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = probe_cmd(dir.path());
    cmd.args(["--username", "someone", "--key", "KGAT_test", "--api-endpoint"])
        .arg(server.uri());

    run(cmd)
        .await
        .success()
        .stdout("Authentication successful\nFound 2 competitions\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn credentials_load_from_dotenv() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "KAGGLE_USERNAME=someone\nKAGGLE_KEY=KGAT_from_dotenv\n",
    )
    .unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions/list"))
        .and(bearer_token("KGAT_from_dotenv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = probe_cmd(dir.path());
    cmd.arg("--api-endpoint").arg(server.uri());

    run(cmd)
        .await
        .success()
        .stdout("Authentication successful\nFound 0 competitions\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_credentials_exit_zero() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    let mut cmd = probe_cmd(dir.path());
    cmd.arg("--api-endpoint").arg(server.uri());

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::starts_with("Error: Could not find kaggle.json."))
        .stdout(predicate::str::contains("Authentication successful").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn leaderboard_prints_csv() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions/titanic/leaderboard/view"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "submissions": [
                {"teamId": 1, "teamName": "Unsinkable", "submissionDate": "2024-03-01T10:00:00Z", "score": "1.00000"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = probe_cmd(dir.path());
    cmd.args(["--username", "someone", "--key", "KGAT_test", "--api-endpoint"])
        .arg(server.uri())
        .args(["leaderboard", "titanic"]);

    run(cmd).await.success().stdout(
        "teamId,teamName,submissionDate,score\n1,Unsinkable,2024-03-01T10:00:00Z,1.00000\n",
    );
}

#[test]
fn unknown_sort_option_is_a_usage_error() {
    let dir = TempDir::new().unwrap();

    probe_cmd(dir.path())
        .args(["--sort-by", "soonest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sort_by specified"));
}
