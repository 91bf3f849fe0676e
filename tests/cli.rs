mod common;

use std::io::Write;

use common::daily365_bin;

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn version_flag_prints_package_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path()).arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn countries_lists_supported_countries() {
    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path())
        .arg("countries")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 36);
    assert!(stdout.lines().any(|l| l == "Czech Republic"));
}

#[test]
fn countries_json_is_an_array() {
    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path())
        .args(["countries", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(36));
}

#[test]
fn unknown_wish_style_is_rejected_by_argument_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path())
        .args(["wish", "--name", "Eva", "--style", "sarcastic"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("unknown wish style"));
}

#[test]
fn missing_key_fails_fast_when_required() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[provider]\nrequire_api_key = true").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path())
        .arg("--config")
        .arg(config.path())
        .args(["daily", "--date", "2025-03-19"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("No API key configured"));
}

#[test]
fn unsupported_country_is_rejected_before_any_request() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[provider]\napi_key = \"test-key\"").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path())
        .arg("--config")
        .arg(config.path())
        .args(["browse", "--country", "Atlantis"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Unsupported country"));
}

#[test]
fn malformed_config_file_is_an_error() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[provider\nmodel = ").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = daily365_bin(dir.path())
        .arg("--config")
        .arg(config.path())
        .arg("countries")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn dotenv_in_working_directory_supplies_the_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "API_KEY=from-dotenv\n").unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[provider]\nrequire_api_key = true\n",
    )
    .unwrap();

    // The key is found, so startup gets as far as the country check.
    let output = daily365_bin(dir.path())
        .args(["browse", "--country", "Atlantis"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(!stderr.contains("No API key configured"));
    assert!(stderr.contains("Unsupported country"));
}
