use assert_cmd::Command;

fn jex() -> Command {
    Command::cargo_bin("jex").unwrap()
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    let output = jex().env("PATH", "").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Jinja2 Expression Tester (JEX)"));
    // help never reaches ansible
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Running command"));
}

#[test]
fn help_flags_print_usage() {
    for flag in ["-h", "--help"] {
        let output = jex().arg(flag).arg("{{ 1 }}").output().unwrap();
        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&output.stdout).contains("Examples:"));
    }
}

#[test]
fn missing_ansible_exits_one_without_trace() {
    let empty = tempfile::tempdir().unwrap();
    let traces = tempfile::tempdir().unwrap();
    let output = jex()
        .env("PATH", empty.path())
        .env("TMPDIR", traces.path())
        .args(["{{ 1 + 1 }}", "-e", "x=1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let echo = concat!(
        "--- Running command: ansible localhost -i /dev/null -m debug ",
        "-a msg=\"{{ 1 + 1 }}\" -e x=1",
    );
    assert!(stderr.contains(echo), "{}", stderr);
    assert!(stderr.contains("'ansible' command not found"), "{}", stderr);
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_dir(traces.path()).unwrap().count(), 0);
}

#[cfg(unix)]
fn fake_ansible(dir: &std::path::Path, body: &str) {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ansible");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "#!/bin/sh\n{}", body).unwrap();
    drop(f);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
#[cfg(unix)]
fn success_output_is_relayed_unchanged() {
    let bin = tempfile::tempdir().unwrap();
    fake_ansible(
        bin.path(),
        "printf 'localhost | SUCCESS => {\\n    \"msg\": \"%s\"\\n}\\n' \"$7\"",
    );

    let output = jex()
        .env("PATH", bin.path())
        .arg("hello")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "localhost | SUCCESS => {\n    \"msg\": \"msg=\"hello\"\"\n}\n"
    );
}

#[test]
#[cfg(unix)]
fn missing_module_failure_is_reported_and_traced() {
    let bin = tempfile::tempdir().unwrap();
    let traces = tempfile::tempdir().unwrap();
    fake_ansible(
        bin.path(),
        "echo \"localhost | FAILED! => No module named 'netaddr'\" >&2\nexit 2",
    );

    let output = jex()
        .env("PATH", bin.path())
        .env("TMPDIR", traces.path())
        .arg("{{ '10.0.0.1' | ipaddr }}")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pip install netaddr"), "{}", stderr);

    let files: Vec<_> = std::fs::read_dir(traces.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    assert_eq!(
        std::fs::read_to_string(&files[0]).unwrap(),
        "localhost | FAILED! => No module named 'netaddr'\n"
    );
}
