//! Fatal errors: message, suggestions and exit code.

use std::fs;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

fn pitch(temp: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("pitch");
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_source() {
    let temp = TempDir::new().unwrap();
    pitch(&temp)
        .args(["go", "--non-interactive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A source must be provided as the first argument.",
        ))
        .stderr(predicate::str::contains("pitch go <SOURCE>"));
}

#[test]
fn missing_scaffold_file() {
    let temp = TempDir::new().unwrap();
    pitch(&temp)
        .args(["go", "nope.yaml", "out", "--non-interactive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.yaml"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn unparseable_scaffold() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.yaml"), "files: [not, a, map]\n").unwrap();

    pitch(&temp)
        .args(["go", "bad.yaml", "out", "--non-interactive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid scaffold document"));
}

#[test]
fn invalid_scaffold_lists_violations() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bad.yaml"),
        "files:\n  a.txt:\n    mode: 0644\n    template: x\n    conditions:\n      - field: name\n        operator: greater\n        value: y\n",
    )
    .unwrap();

    pitch(&temp)
        .args(["go", "bad.yaml", "out", "--non-interactive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid scaffold"))
        .stderr(predicate::str::contains("'greater' must be one of"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn unresolved_variable_without_a_terminal() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("s.yaml"),
        "user_input:\n  name:\n    description: Name?\nfiles:\n  a.txt:\n    mode: 0644\n    template: \"%name%\"\n",
    )
    .unwrap();

    pitch(&temp)
        .args(["go", "s.yaml", "out", "--non-interactive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn malformed_var_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    pitch(&temp)
        .args(["go", "s.yaml", "--var", "novalue"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn unknown_subcommand_exits_one() {
    let temp = TempDir::new().unwrap();
    pitch(&temp).arg("make").assert().code(1);
}

#[test]
fn missing_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    pitch(&temp)
        .args(["--config", "absent.toml", "go", "s.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unreachable_url_is_a_load_error() {
    let temp = TempDir::new().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    pitch(&temp)
        .env("PITCH__LOADER__TIMEOUT_SECS", "2")
        .args([
            "go",
            &format!("http://{addr}/scaffold.yaml"),
            "out",
            "--non-interactive",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("request failed"));
}
