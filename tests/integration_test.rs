use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to convert path to forward slashes for TOML compatibility on Windows
fn path_to_toml_string(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "/")
}

const SAMPLE: &str = "# Hello\n\nSome *text* here.\n\n- one\n- two\n\n1. first\n2. second\n";

#[test]
fn test_config_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("termark.toml");

    cargo::cargo_bin_cmd!("termark")
        .args(["config", "init", "--path", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    assert!(config_path.exists());
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("text_sizing = \"auto\""));
}

#[test]
fn test_config_init_keeps_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("termark.toml");
    fs::write(&config_path, "word_wrap = 42\n").unwrap();

    cargo::cargo_bin_cmd!("termark")
        .args(["config", "init", "--path", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "word_wrap = 42\n");
}

#[test]
fn test_render_file() {
    let temp_dir = TempDir::new().unwrap();
    let doc = temp_dir.path().join("doc.md");
    fs::write(&doc, SAMPLE).unwrap();

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .env("NO_COLOR", "1")
        .args(["render", doc.to_str().unwrap(), "--style", "ascii"])
        .args(["--width", "40", "--text-sizing", "off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Hello"))
        .stdout(predicate::str::contains("Some *text* here."))
        .stdout(predicate::str::contains("• one"))
        .stdout(predicate::str::contains("2. second"));
}

#[test]
fn test_render_stdin() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .env("NO_COLOR", "1")
        .arg("render")
        .write_stdin("## From stdin\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("## From stdin"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_render_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .args(["render", "missing.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: "))
        .stderr(predicate::str::contains("missing.md"));
}

#[test]
fn test_render_with_missing_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nope.toml");

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .args(["render", "--config", config_path.to_str().unwrap()])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run 'termark config init'"));
}

#[test]
fn test_render_uses_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("termark.toml");
    fs::write(
        &config_path,
        "style = \"ascii\"\nlink_numbers = true\ntext_sizing = \"off\"\n",
    )
    .unwrap();

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .args(["render", "--config", config_path.to_str().unwrap()])
        .write_stdin("[docs](https://example.com/docs)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1]"))
        .stdout(predicate::str::contains(
            "\x1b]8;;https://example.com/docs\x1b\\docs\x1b]8;;\x1b\\",
        ));
}

#[test]
fn test_render_scaled_heading() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .env("CLICOLOR_FORCE", "1")
        .env_remove("NO_COLOR")
        .args(["render", "--style", "dark", "--text-sizing", "on"])
        .write_stdin("# Big\n\nbody\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b]66;s=2; Big \x07"))
        .stdout(predicate::str::contains("KITTY_TEXT_SIZE").not());
}

#[test]
fn test_render_invalid_text_sizing_mode() {
    cargo::cargo_bin_cmd!("termark")
        .args(["render", "--text-sizing", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid text sizing mode"));
}

#[test]
fn test_render_image_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("images.toml");
    fs::write(
        &manifest_path,
        "[images.\"cat.png\"]\nid = 42\ncols = 3\nrows = 2\n",
    )
    .unwrap();

    let config_path = temp_dir.path().join("termark.toml");
    fs::write(
        &config_path,
        format!(
            "style = \"ascii\"\ntext_sizing = \"off\"\n\n[images]\nenabled = true\nmanifest = \"{}\"\n",
            path_to_toml_string(&manifest_path)
        ),
    )
    .unwrap();

    let output = cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .args(["render", "--config", config_path.to_str().unwrap()])
        .write_stdin("![a cat](cat.png)\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches('\u{10EEEE}').count(), 6);
    assert!(stdout.contains("\x1b[38;2;0;0;42m"));
    assert!(!stdout.contains("a cat"));
}

#[test]
fn test_unknown_image_renders_like_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("images.toml");
    fs::write(&manifest_path, "[images.\"cat.png\"]\nid = 42\ncols = 3\nrows = 2\n").unwrap();

    let enabled = temp_dir.path().join("enabled.toml");
    fs::write(
        &enabled,
        format!(
            "style = \"ascii\"\ntext_sizing = \"off\"\n\n[images]\nenabled = true\nmanifest = \"{}\"\n",
            path_to_toml_string(&manifest_path)
        ),
    )
    .unwrap();
    let disabled = temp_dir.path().join("disabled.toml");
    fs::write(&disabled, "style = \"ascii\"\ntext_sizing = \"off\"\n").unwrap();

    let render = |config: &std::path::Path| {
        let output = cargo::cargo_bin_cmd!("termark")
            .current_dir(temp_dir.path())
            .args(["render", "--config", config.to_str().unwrap()])
            .write_stdin("Look: ![a dog](dog.png)\n")
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let with_images = render(&enabled);
    assert_eq!(with_images, render(&disabled));
    assert!(with_images.contains("Image: a dog → dog.png"));
}

#[test]
fn test_probe_without_terminal() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .args(["probe", "--timeout-ms", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Text sizing support: none"));
}

#[test]
fn test_probe_enable_leaves_config_alone_without_support() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("termark.toml");

    cargo::cargo_bin_cmd!("termark")
        .current_dir(temp_dir.path())
        .args(["probe", "--enable"])
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration left unchanged"));

    assert!(!config_path.exists());
}
