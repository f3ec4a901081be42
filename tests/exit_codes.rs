use std::fs;
use std::process::Command;

fn run_lazywp(args: &[&str]) -> i32 {
    let exe = env!("CARGO_BIN_EXE_lazywp");
    let status = Command::new(exe).args(args).status().expect("run lazywp");
    status.code().unwrap_or(1)
}

#[test]
fn check_config_accepts_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazywp.toml");
    let body = "wp_bin = \"wp\"\nmenu_width = 30\n[colors]\nhover = \"black,cyan\"\n";
    fs::write(&path, body).unwrap();
    let code = run_lazywp(&["--config", path.to_str().unwrap(), "check-config"]);
    assert_eq!(code, 0);
}

#[test]
fn check_config_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazywp.yaml");
    fs::write(&path, "wp_bin: \"\"\nmenu_width: 3\n").unwrap();
    let code = run_lazywp(&["--config", path.to_str().unwrap(), "check-config"]);
    assert_eq!(code, 1);
}

#[test]
fn check_config_reports_missing_file() {
    let code = run_lazywp(&["--config", "/nonexistent/lazywp-123456.toml", "check-config"]);
    assert_eq!(code, 1);
}
