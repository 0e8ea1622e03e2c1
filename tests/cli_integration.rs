use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tg-members"))
        .args(args)
        .env_remove("TG_API_ID")
        .env_remove("TG_API_HASH")
        .env_remove("TG_PHONE")
        .env_remove("TG_CHAT_TITLE")
        .env_remove("TG_SESSION_PATH")
        .output()
        .expect("failed to execute tg-members binary")
}

#[test]
fn help_lists_settings() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--api-id", "--api-hash", "--phone", "--chat-title", "--session", "--json"] {
        assert!(stdout.contains(flag), "missing {flag} in help:\n{stdout}");
    }
}

#[test]
fn missing_settings_fail_without_output() {
    let output = run_cli(&["--chat-title", "Team"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--api-id"));
}

#[test]
fn invalid_config_exits_with_one() {
    let output = run_cli(&[
        "--api-id=-1",
        "--api-hash",
        "your hash",
        "--phone",
        "+15550000000",
        "--chat-title",
        "Team",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("api id must be positive"));
}
