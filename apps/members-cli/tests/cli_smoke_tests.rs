//! CLI smoke tests for the members-cli binary
//!
//! These run the real binary against the seeded in-memory directory, with a
//! throwaway home directory so local storage and log files stay isolated.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Helper to run the members-cli binary with given arguments
fn run_members_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_members-cli"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute members-cli")
}

/// Writes a config rooted at a temp home and returns (home, config path).
fn config_with_console(console_level: &str, extra: &str) -> (TempDir, PathBuf) {
    let home = TempDir::new().expect("Failed to create temp dir");
    let config_path = home.path().join("config.yaml");
    let yaml = format!(
        r#"
client:
  home_dir: "{}"
logging:
  default:
    console_level: "{console_level}"
    file: ""
{extra}"#,
        home.path().display()
    );
    fs::write(&config_path, yaml).expect("Failed to write config");
    (home, config_path)
}

fn quiet_config(extra: &str) -> (TempDir, PathBuf) {
    config_with_console("off", extra)
}

fn grant_role(home: &Path, tag: &str) {
    fs::write(
        home.join("local_storage.json"),
        format!(r#"{{"tipoUsuario":"{tag}"}}"#),
    )
    .expect("Failed to write local storage");
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_members_cli(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("members-cli"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for sub in ["list", "create", "edit", "check"] {
        assert!(stdout.contains(sub), "Should contain '{sub}' subcommand");
    }
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_members_cli(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("members-cli"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_members_cli(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    assert!(!stderr_of(&output).is_empty(), "Should print an error");
}

#[test]
fn test_list_shows_rows_without_create_trigger_for_plain_viewer() {
    let (_home, config) = quiet_config("");
    let output = run_members_cli(&["--config", config.to_str().unwrap(), "--mock", "list"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Ana Silva"));
    assert!(stdout.contains("3 member(s)"));
    assert!(!stdout.contains("[New member]"));
}

#[test]
fn test_console_logs_stay_off_stdout() {
    let (_home, config) = config_with_console("info", "");
    let output = run_members_cli(&["--config", config.to_str().unwrap(), "--mock", "list"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    let stderr = stderr_of(&output);
    assert!(stdout.contains("3 member(s)"));
    assert!(!stdout.contains("members-cli starting"), "logs leaked into stdout: {stdout}");
    assert!(!stdout.contains("Directory mounted"), "logs leaked into stdout: {stdout}");
    assert!(stderr.contains("members-cli starting"));
    assert!(stderr.contains("Directory mounted"));
}

#[test]
fn test_list_search_filters_rows() {
    let (home, config) = quiet_config("");
    grant_role(home.path(), "GERENTE");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "list",
        "--search",
        "BRUNO",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[New member]"));
    assert!(stdout.contains("Search: BRUNO"));
    assert!(stdout.contains("Bruno Costa"));
    assert!(!stdout.contains("Ana Silva"));
    assert!(stdout.contains("1 member(s)"));
}

#[test]
fn test_create_requires_privileged_role() {
    let (home, config) = quiet_config("");
    grant_role(home.path(), "MEMBRO");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "create",
        "--name",
        "Dora",
        "--email",
        "dora@x.com",
    ]);

    assert!(!output.status.success(), "Non-privileged create should fail");
    assert!(stderr_of(&output).contains("not permitted"));
}

#[test]
fn test_padded_role_flag_is_not_privileged() {
    let (home, config) = quiet_config("");
    grant_role(home.path(), " GERENTE ");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "create",
        "--name",
        "Dora",
        "--email",
        "dora@x.com",
    ]);

    assert!(!output.status.success(), "Padded role flag must not grant create");
    assert!(stderr_of(&output).contains("not permitted"));
}

#[test]
fn test_create_as_manager_prints_new_member() {
    let (home, config) = quiet_config("");
    grant_role(home.path(), "GERENTE");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "create",
        "--name",
        "Dora",
        "--email",
        "dora@x.com",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Created member 4"));
    assert!(stdout.contains("Dora"));
    assert!(stdout.contains("4 member(s)"));
}

#[test]
fn test_create_with_invalid_email_is_rejected() {
    let (home, config) = quiet_config("");
    grant_role(home.path(), "GERENTE");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "create",
        "--name",
        "Dora",
        "--email",
        "dora",
    ]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("email"));
}

#[test]
fn test_edit_updates_member() {
    let (_home, config) = quiet_config("");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "edit",
        "2",
        "--name",
        "Bruno C.",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Updated member 2"));
    assert!(stdout.contains("Bruno C."));
}

#[test]
fn test_edit_unknown_member_fails() {
    let (_home, config) = quiet_config("");
    let output = run_members_cli(&[
        "--config",
        config.to_str().unwrap(),
        "--mock",
        "edit",
        "99",
        "--name",
        "Nobody",
    ]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("is not in the directory"));
}

#[test]
fn test_check_accepts_valid_module_config() {
    let (_home, config) = quiet_config(
        r#"modules:
  members_directory:
    api_base_url: "http://localhost:9000/api"
    privileged_role: "GERENTE"
"#,
    );
    let output = run_members_cli(&["--config", config.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Configuration OK"));
    assert!(stdout.contains("http://localhost:9000/api"));
}

#[test]
fn test_check_rejects_unknown_privileged_role() {
    let (_home, config) = quiet_config(
        r#"modules:
  members_directory:
    privileged_role: "ADMIN"
"#,
    );
    let output = run_members_cli(&["--config", config.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Unknown role tag should fail");
    assert!(stderr_of(&output).contains("privileged_role"));
}

#[test]
fn test_check_rejects_bad_base_url() {
    let (_home, config) = quiet_config(
        r#"modules:
  members_directory:
    api_base_url: "not a url"
"#,
    );
    let output = run_members_cli(&["--config", config.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Malformed URL should fail");
}

#[test]
fn test_print_config_emits_yaml() {
    let (home, config) = quiet_config("");
    let output = run_members_cli(&["--config", config.to_str().unwrap(), "--print-config"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("client:"));
    assert!(stdout.contains(&home.path().display().to_string()));
}

#[test]
fn test_missing_config_file_is_tolerated() {
    // figment treats a missing YAML file as empty; defaults take over
    let home = TempDir::new().expect("Failed to create temp dir");
    let missing = home.path().join("absent.yaml");
    let output = Command::new(env!("CARGO_BIN_EXE_members-cli"))
        .args(["--config", missing.to_str().unwrap(), "--mock", "list"])
        .env("APP__CLIENT__HOME_DIR", home.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute members-cli");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("member(s)"));
}
