use std::process::Command;

#[test]
fn test_failing_command_reports_error_once() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("missing.json");

    let output = Command::new(env!("CARGO_BIN_EXE_lexicard"))
        .current_dir(dir.path())
        .env_remove("LEXICARD_ANALYZER")
        .env_remove("LEXICARD_WORDNET")
        .arg("--dataset")
        .arg(&dataset)
        .arg("coverage")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("cannot open dataset").count(), 1, "{stderr}");
}
