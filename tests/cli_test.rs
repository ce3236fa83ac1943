//! Integration tests for the featprobe binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("probes.yml"), manifest).unwrap();
    temp
}

fn featprobe(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("featprobe"));
    cmd.current_dir(temp.path())
        .env_remove("FEATPROBE_CXX")
        .env_remove("FEATPROBE_CXXFLAGS")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

const MANIFEST: &str = r##"
header: include/config.h
checks:
  - kind: header
    required: true
    message: thread required.
    candidates: [thread]
  - kind: code
    candidates:
      - name: std::unique_ptr
        header: [memory]
        struct: std::unique_ptr<int>
macros:
  - { name: FEATPROBE_VERSION, value: "1" }
macro_code:
  - "#define USE_PROBED_FEATURES"
"##;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("featprobe"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Compile-time feature probing"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("featprobe"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_list_shows_macros() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    featprobe(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("thread (required)"))
        .stdout(predicate::str::contains("HAVE_STD_UNIQUE_PTR"));
    Ok(())
}

#[test]
fn cli_list_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    let output = featprobe(&temp).args(["list", "--json"]).output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json[0]["variants"][0]["macro"], "HAVE_THREAD");
    assert_eq!(json[1]["required"], false);
    Ok(())
}

#[test]
fn cli_missing_manifest_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("featprobe"));
    cmd.current_dir(temp.path()).env("NO_COLOR", "1");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Manifest not found"));
    Ok(())
}

#[test]
fn cli_invalid_manifest_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("checks:\n  - kind: code\n    candidates: [decltype]\n");
    featprobe(&temp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid manifest"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("featprobe"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("featprobe"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_run_writes_header() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    featprobe(&temp)
        .args(["run", "--compiler", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checking for thread... yes"))
        .stdout(predicate::str::contains("checking for std::unique_ptr... yes"));

    let header = fs::read_to_string(temp.path().join("include/config.h"))?;
    assert!(header.starts_with("#ifndef INCLUDE_CONFIG_H_\n#define INCLUDE_CONFIG_H_\n"));
    assert!(header.contains("#define HAVE_THREAD\n"));
    assert!(header.contains("#define HAVE_STD_UNIQUE_PTR\n"));
    assert!(header.contains("#define FEATPROBE_VERSION 1\n"));
    assert!(header.contains("#define USE_PROBED_FEATURES\n"));
    assert!(header.ends_with("#endif\n"));
    assert!(temp.path().join(".config.tmp/thread.cc").is_file());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_run_is_default_command() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    featprobe(&temp)
        .env("FEATPROBE_CXX", "true")
        .assert()
        .success();
    assert!(temp.path().join("include/config.h").is_file());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_mandatory_failure_exits_without_header() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    featprobe(&temp)
        .args(["run", "--compiler", "false"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("checking for thread... no"))
        .stderr(predicate::str::contains("thread required."));

    assert!(!temp.path().join("include/config.h").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_required_pair_failure_exits() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        "checks:\n  - kind: lib_and_header\n    required: true\n    message: zlib required.\n    candidates:\n      - { name: z, header: [zlib.h] }\n",
    );
    featprobe(&temp)
        .args(["run", "--compiler", "false"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("checking for zlib.h... no"))
        .stdout(predicate::str::contains("checking for z... no"))
        .stderr(predicate::str::contains("zlib required."));

    assert!(!temp.path().join("config.h").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_quiet_hides_progress() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    featprobe(&temp)
        .args(["run", "--quiet", "--compiler", "true"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_existing_header_is_kept() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    let header = temp.path().join("include/config.h");
    fs::create_dir_all(header.parent().unwrap())?;
    fs::write(&header, "// hand written\n")?;

    featprobe(&temp)
        .args(["run", "--compiler", "/nonexistent/featprobe-cxx"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&header)?, "// hand written\n");
    Ok(())
}

#[test]
fn cli_unspawnable_compiler_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MANIFEST);
    featprobe(&temp)
        .args(["run", "--force", "--compiler", "/nonexistent/featprobe-cxx"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to run toolchain"));

    assert!(!temp.path().join("include/config.h").exists());
    Ok(())
}
