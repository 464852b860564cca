use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn cinema_command(home: &Path, base_url: &str) -> Result<Command> {
    let mut cmd = Command::cargo_bin("cinema")?;
    cmd.env("CINEMA_HOME", home)
        .env("CINEMA_API_BASE_URL", base_url)
        .env_remove("CINEMA_STAFF_TOKEN")
        .env_remove("CINEMA_PASSWORD")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

/// assert_cmd blocks, so run it off the runtime driving the mock server.
async fn run_blocking(mut cmd: Command) -> Result<std::process::Output> {
    Ok(tokio::task::spawn_blocking(move || cmd.output()).await??)
}

#[test]
fn help_lists_commands() -> Result<()> {
    let home = TempDir::new()?;
    cinema_command(home.path(), "http://127.0.0.1:9/api")?
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("hold-status"))
        .stdout(contains("recommendations"));
    Ok(())
}

#[test]
fn whoami_without_session_stays_offline() -> Result<()> {
    let home = TempDir::new()?;
    // Port 9 would refuse any connection; success proves none was attempted.
    cinema_command(home.path(), "http://127.0.0.1:9/api")?
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not signed in."));
    Ok(())
}

#[test]
fn scan_requires_staff_token() -> Result<()> {
    let home = TempDir::new()?;
    cinema_command(home.path(), "http://127.0.0.1:9/api")?
        .args(["scan", "qr-abc"])
        .assert()
        .failure()
        .stderr(contains("--staff-token"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn movies_prints_backend_page() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .and(query_param("q", "sky"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": 3,
                "title": "Skyline",
                "runtime_minutes": 118,
                "rating": "PG-13",
                "release_date": "2026-09-12",
                "poster_url": null
            }],
            "total": 1,
            "limit": 10,
            "offset": 20
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    let mut cmd = cinema_command(home.path(), &format!("{}/api", server.uri()))?;
    cmd.args(["movies", "--query", "sky", "--limit", "10", "--offset", "20"]);

    let output = run_blocking(cmd).await?;

    assert!(output.status.success());
    let page: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(page["items"][0]["title"], json!("Skyline"));
    assert_eq!(page["total"], json!(1));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hold_status_by_showtime_prints_null_without_a_hold() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/active"))
        .and(query_param("showtime_id", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    let mut cmd = cinema_command(home.path(), &format!("{}/api", server.uri()))?;
    cmd.args(["hold-status", "--showtime", "8"]);

    let output = run_blocking(cmd).await?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "null");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn backend_errors_are_reported_verbatim() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Movie not found"})),
        )
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    let mut cmd = cinema_command(home.path(), &format!("{}/api", server.uri()))?;
    cmd.args(["movie", "99"]);

    let output = run_blocking(cmd).await?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Request failed with status 404: Movie not found"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_persists_session_for_later_commands() -> Result<()> {
    let server = MockServer::start().await;
    let user = json!({
        "id": 7,
        "email": "guest@bigapplecinemas.local",
        "role": "USER",
        "created_at": "2026-10-01T09:00:00Z"
    });
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer",
            "access_expires_in_seconds": 900,
            "refresh_expires_in_seconds": 1_209_600,
            "user": user.clone()
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    let base_url = format!("{}/api", server.uri());

    let mut login = cinema_command(home.path(), &base_url)?;
    login
        .args(["login", "--email", "guest@bigapplecinemas.local"])
        .env("CINEMA_PASSWORD", "Password123!");
    let output = run_blocking(login).await?;
    assert!(output.status.success());

    let stored: Value = serde_json::from_str(&fs::read_to_string(
        home.path().join("session.json"),
    )?)?;
    assert_eq!(stored["cinema.access_token"], json!("access-1"));
    assert_eq!(stored["cinema.refresh_token"], json!("refresh-1"));

    let mut whoami = cinema_command(home.path(), &base_url)?;
    whoami.arg("whoami");
    let output = run_blocking(whoami).await?;
    assert!(output.status.success());
    let shown: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(shown["email"], json!("guest@bigapplecinemas.local"));
    Ok(())
}
