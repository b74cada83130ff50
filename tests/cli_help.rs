use std::process::Command;

#[test]
fn test_help_lists_every_subcommand() {
    let bin = env!("CARGO_BIN_EXE_vmconf");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["ping", "deploy", "run", "push", "exec", "rollback", "backups"] {
        assert!(
            stdout.contains(command),
            "help output should list `{}`; got:\n{}",
            command,
            stdout
        );
    }
}

#[test]
fn test_version_flag() {
    let bin = env!("CARGO_BIN_EXE_vmconf");

    let output = Command::new(bin).arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let bin = env!("CARGO_BIN_EXE_vmconf");

    let output = Command::new(bin).output().unwrap();

    assert!(!output.status.success());
}
