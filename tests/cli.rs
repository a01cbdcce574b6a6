use assert_cmd::Command;
use predicates::str::contains;
use std::path::PathBuf;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("saca-review").unwrap();
    // Keep the ambient environment out of the contract under test.
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("SACA_MOCK")
        .env_remove("SACA_MODEL")
        .env_remove("SACA_OPENAI_BASE_URL");
    cmd
}

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// stdout must be exactly one JSON line with the two contract keys.
fn parse_stdout(stdout: &[u8]) -> serde_json::Value {
    let text = std::str::from_utf8(stdout).unwrap();
    let mut lines = text.lines();
    let line = lines.next().expect("stdout should carry one JSON line");
    assert!(lines.next().is_none(), "stdout had more than one line");

    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert!(obj.contains_key("report_markdown"));
    assert!(obj.contains_key("revised_code"));
    value
}

#[test]
fn mock_mode_reviews_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.c", "int main(void) { return 0; }\n");

    let assert = cmd().arg(&file).env("SACA_MOCK", "1").assert().success();

    let value = parse_stdout(&assert.get_output().stdout);
    assert!(value["report_markdown"]
        .as_str()
        .unwrap()
        .contains("MOCK Review"));
    assert_eq!(
        value["revised_code"],
        "// MOCK REVISION ADDED BY saca-review\nint main(void) { return 0; }\n"
    );
}

#[test]
fn mock_mode_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.py", "print('hi')\n");

    let run = || {
        cmd()
            .arg(&file)
            .env("SACA_MOCK", "1")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn missing_file_fails_even_in_mock_mode() {
    let assert = cmd()
        .arg("definitely/not/here.rs")
        .env("SACA_MOCK", "1")
        .assert()
        .code(2);

    let value = parse_stdout(&assert.get_output().stdout);
    assert!(value["report_markdown"]
        .as_str()
        .unwrap()
        .contains("file not found"));
    assert!(value["revised_code"].is_null());
}

#[test]
fn missing_credential_fails_without_mock_mode() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.rs", "fn main() {}\n");

    let assert = cmd().arg(&file).assert().code(2);

    let value = parse_stdout(&assert.get_output().stdout);
    assert!(value["report_markdown"]
        .as_str()
        .unwrap()
        .contains("OPENAI_API_KEY not set"));
    assert!(value["revised_code"].is_null());
}

#[test]
fn mock_mode_requires_the_exact_value_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.rs", "fn main() {}\n");

    // "true" is not "1": the credential check still applies.
    cmd()
        .arg(&file)
        .env("SACA_MOCK", "true")
        .assert()
        .code(2)
        .stdout(contains("OPENAI_API_KEY not set"));
}

#[test]
fn json_flag_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.rs", "fn main() {}\n");

    cmd()
        .arg(&file)
        .arg("--json")
        .env("SACA_MOCK", "1")
        .assert()
        .success();
}

#[test]
fn diagnostics_go_to_stderr_only() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.rs", "fn main() {}\n");

    let assert = cmd()
        .arg(&file)
        .env("SACA_MOCK", "1")
        .assert()
        .success()
        .stderr(contains("SACA_MOCK mode? true"))
        .stderr(contains("Target file:"));

    // Anything on stdout besides the result line would corrupt the caller.
    parse_stdout(&assert.get_output().stdout);
}

#[test]
fn model_defaults_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.rs", "fn main() {}\n");

    cmd()
        .arg(&file)
        .env("SACA_MOCK", "1")
        .env("SACA_MODEL", "my-custom-model")
        .assert()
        .success()
        .stderr(contains("Model: my-custom-model"));
}

#[test]
fn model_flag_overrides_environment() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir, "demo.rs", "fn main() {}\n");

    cmd()
        .arg(&file)
        .args(["--model", "flag-model"])
        .env("SACA_MOCK", "1")
        .env("SACA_MODEL", "env-model")
        .assert()
        .success()
        .stderr(contains("Model: flag-model"));
}

#[test]
fn invalid_utf8_is_replaced_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.c");
    std::fs::write(&path, b"// caf\xe9\nint x;\n").unwrap();

    let assert = cmd().arg(&path).env("SACA_MOCK", "1").assert().success();

    let value = parse_stdout(&assert.get_output().stdout);
    let revised = value["revised_code"].as_str().unwrap();
    assert!(revised.ends_with("// caf\u{FFFD}\nint x;\n"));
}
