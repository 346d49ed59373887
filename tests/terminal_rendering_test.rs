use assert_cmd::cargo;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

const DOC: &str = "## Title\n\nA **bold** claim.\n";

#[test]
#[serial]
fn test_render_with_no_color() {
    let temp_dir = TempDir::new().unwrap();

    std::env::set_var("NO_COLOR", "1");

    let mut cmd = cargo::cargo_bin_cmd!("termark");
    cmd.current_dir(temp_dir.path())
        .args(["render", "--text-sizing", "off"])
        .write_stdin(DOC)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Title"))
        .stdout(predicate::str::contains("**bold**"))
        .stdout(predicate::str::contains("\x1b[").not());

    std::env::remove_var("NO_COLOR");
}

#[test]
#[serial]
fn test_render_with_clicolor_force() {
    let temp_dir = TempDir::new().unwrap();

    std::env::remove_var("NO_COLOR");
    std::env::set_var("CLICOLOR_FORCE", "1");

    let mut cmd = cargo::cargo_bin_cmd!("termark");
    cmd.current_dir(temp_dir.path())
        .env("COLORTERM", "truecolor")
        .args(["render", "--text-sizing", "off"])
        .write_stdin(DOC)
        .assert()
        .success()
        .stdout(predicate::str::contains("Title"))
        .stdout(predicate::str::contains("\x1b["));

    std::env::remove_var("CLICOLOR_FORCE");
}

#[test]
#[serial]
fn test_rich_render_failure_falls_back_to_plain() {
    let temp_dir = TempDir::new().unwrap();
    let theme = temp_dir.path().join("broken.json");
    std::fs::write(&theme, r#"{"hr":{"format":"{{ .nope }}"}}"#).unwrap();
    let doc = "Above\n\n---\n\nBelow\n";

    std::env::set_var("NO_COLOR", "1");

    let mut cmd = cargo::cargo_bin_cmd!("termark");
    cmd.current_dir(temp_dir.path())
        .args(["render", "--text-sizing", "off", "--style"])
        .arg(theme.to_str().unwrap())
        .write_stdin(doc)
        .assert()
        .success()
        .stdout(predicate::str::diff(doc))
        .stderr(predicate::str::contains("using plain output"));

    std::env::remove_var("NO_COLOR");
}
