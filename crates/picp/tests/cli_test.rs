//! Integration tests for the `picp` CLI binary.
//!
//! Argument parsing, help output, completions, and exit codes, plus a few
//! end-to-end runs against a wiremock appliance.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `picp` binary with env isolation.
///
/// Clears all `PICP_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn picp_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("picp");
    cmd.env("HOME", "/tmp/picp-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/picp-cli-test-nonexistent")
        .env_remove("PICP_CONFIG")
        .env_remove("PICP_PROFILE")
        .env_remove("PICP_APPLIANCE")
        .env_remove("PICP_OUTPUT")
        .env_remove("PICP_INSECURE")
        .env_remove("PICP_TIMEOUT")
        .env_remove("PICP_PASSWORD")
        .env_remove("PICP_WIFI_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "data": data }))
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = picp_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    picp_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("appliance console REST API")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("wifi"))
            .and(predicate::str::contains("fan"))
            .and(predicate::str::contains("login-setting")),
    );
}

#[test]
fn test_short_help_uses_about() {
    picp_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage a picp appliance"));
}

#[test]
fn test_version_flag() {
    picp_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("picp"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    picp_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    picp_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    picp_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_path_env_override() {
    picp_cmd()
        .env("PICP_CONFIG", "/etc/picp/lab.toml")
        .args(["config", "path"])
        .assert()
        .success()
        .stdout("/etc/picp/lab.toml\n");
}

#[test]
fn test_config_show_without_file() {
    picp_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_set_then_use_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("picp").join("config.toml");

    picp_cmd()
        .env("PICP_CONFIG", &config)
        .args(["--profile", "lab", "config", "set", "appliance", "http://10.0.0.5:8888"])
        .assert()
        .success()
        .stderr(predicate::str::contains("set appliance on profile 'lab'"));

    picp_cmd()
        .env("PICP_CONFIG", &config)
        .args(["config", "use", "lab"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_profile = \"lab\""), "{written}");
    assert!(written.contains("http://10.0.0.5:8888"), "{written}");

    picp_cmd()
        .env("PICP_CONFIG", &config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[profiles.lab]"));
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    picp_cmd()
        .env("PICP_CONFIG", &config)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(2);
    picp_cmd()
        .env("PICP_CONFIG", &config)
        .args(["config", "use", "missing"])
        .assert()
        .code(2);
    assert!(!config.exists());
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_unknown_profile() {
    let output = picp_cmd()
        .args(["--profile", "nope", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nope"));
}

#[test]
fn test_invalid_appliance_url() {
    let output = picp_cmd()
        .args(["--appliance", "ftp://192.168.1.10", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_wifi_connect_rejects_ssid_and_bssid() {
    picp_cmd()
        .args([
            "wifi",
            "connect",
            "--device",
            "wlan0",
            "--ssid",
            "home",
            "--bssid",
            "AA:BB:CC:DD:EE:FF",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_wifi_connect_requires_target() {
    picp_cmd()
        .args(["wifi", "connect", "--device", "wlan0"])
        .assert()
        .code(2);
}

#[test]
fn test_unreachable_appliance_exit_code() {
    let output = picp_cmd()
        .args(["--appliance", "http://127.0.0.1:1", "devices"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Could not reach the appliance"));
}

// ── Against a mock appliance ────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_fan_get_prints_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fan"))
        .respond_with(ok(json!({ "speed": "auto" })))
        .mount(&server)
        .await;

    picp_cmd()
        .args(["--appliance", &server.uri(), "fan", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"speed\": \"auto\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_appliance_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ok(json!([])).set_delay(std::time::Duration::from_secs(5)))
        .mount(&server)
        .await;

    picp_cmd()
        .args(["--appliance", &server.uri(), "--timeout", "1", "devices"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("timed out"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fan_get_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 1001, "msg": "fan sensor offline" })),
        )
        .mount(&server)
        .await;

    picp_cmd()
        .args(["--appliance", &server.uri(), "fan", "get"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fan sensor offline"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/display"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    picp_cmd()
        .args(["--appliance", &server.uri(), "display", "get"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("server error 503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_expired_hints_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 401 })))
        .mount(&server)
        .await;

    picp_cmd()
        .args(["--appliance", &server.uri(), "devices"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("login").and(predicate::str::contains("expired")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wifi_list_yaml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wifi"))
        .and(query_param("device", "wlan0"))
        .respond_with(ok(json!([{ "SSID": "home", "device": "wlan0", "signal": 80 }])))
        .expect(1)
        .mount(&server)
        .await;

    picp_cmd()
        .args([
            "--appliance",
            &server.uri(),
            "--output",
            "yaml",
            "wifi",
            "list",
            "wlan0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SSID: home"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fan_set_posts_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fan"))
        .and(body_json(json!({ "Enable": true, "Speed": 70 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200 })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fan.json");
    std::fs::write(&file, r#"{ "Enable": true, "Speed": 70 }"#).unwrap();

    picp_cmd()
        .args(["--appliance", &server.uri(), "fan", "set", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("fan settings saved"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wifi_delete_sends_uuid() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/wifi"))
        .and(query_param("connection_uuid", "7f3c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200 })))
        .expect(1)
        .mount(&server)
        .await;

    picp_cmd()
        .args(["--appliance", &server.uri(), "-q", "wifi", "delete", "7f3c"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_credentials_log_in_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "user": "admin", "password": "s3cret-pass" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/login_setting"))
        .respond_with(ok(json!({ "user": "admin", "max_age": 3600 })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[profiles.default]\nappliance = \"{}\"\nuser = \"admin\"\npassword = \"s3cret-pass\"\n",
            server.uri()
        ),
    )
    .unwrap();

    picp_cmd()
        .env("PICP_CONFIG", &config)
        .args(["login-setting", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_age\": 3600"));
}
