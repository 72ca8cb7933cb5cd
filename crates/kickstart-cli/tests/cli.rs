//! End-to-end tests for the `wpkickstart` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MAIN_FILE: &str = "<?php\n\
/**\n\
 * Plugin Name: My Plugin\n\
 * Version:     0.1.0\n\
 */\n";

const APP_FILE: &str = "<?php\n\
\t\t$this->shared = new Shared();\n\
\t\t// An example service so you can see how things work, below cli command should remove this.\n\
\t\t$this->example_service = new Service\\Example_Service();\n\
\t\t$this->replace_cli = new Service\\Replace_CLI();\n";

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A generated plugin under `<tmp>/my-plugin`.
fn plugin_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("my-plugin");
    write(&root, "my-plugin.php", MAIN_FILE);
    write(&root, "app/class-app.php", APP_FILE);
    write(&root, "services/replace-cli/class-replace-cli.php", "<?php\n");
    write(&root, "vendor/pkg/class-lib.php", APP_FILE);
    write(&root, "notes.txt", APP_FILE);
    dir
}

/// The binary, isolated from the caller's environment and config.
fn wpkickstart(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wpkickstart").unwrap();
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("KICKSTART_PLUGIN_FILE")
        .env_remove("WP_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    wpkickstart(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kickstart"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    wpkickstart(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn kickstart_rewrites_only_eligible_files() {
    let dir = plugin_dir();
    let root = dir.path().join("my-plugin");

    wpkickstart(dir.path())
        .args(["-p", "my-plugin/my-plugin.php", "kickstart", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 line(s) from 1 file(s)"));

    assert_eq!(
        fs::read_to_string(root.join("app/class-app.php")).unwrap(),
        "<?php\n\t\t$this->shared = new Shared();\n\t\t$this->replace_cli = new Service\\Replace_CLI();\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("vendor/pkg/class-lib.php")).unwrap(),
        APP_FILE
    );
    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), APP_FILE);
}

#[test]
fn kickstart_honours_numeric_no_color() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .env("NO_COLOR", "1")
        .args(["-p", "my-plugin/my-plugin.php", "kickstart", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from 1 file(s)"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn kickstart_without_stdin_declines() {
    let dir = plugin_dir();
    let root = dir.path().join("my-plugin");

    wpkickstart(dir.path())
        .args(["-p", "my-plugin/my-plugin.php", "kickstart"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Operation cancelled"));

    assert_eq!(
        fs::read_to_string(root.join("app/class-app.php")).unwrap(),
        APP_FILE
    );
}

#[test]
fn kickstart_twice_is_a_no_op() {
    let dir = plugin_dir();

    for expected in ["from 1 file(s)", "Removed 0 line(s) from 0 file(s)"] {
        wpkickstart(dir.path())
            .args(["-p", "my-plugin/my-plugin.php", "kickstart", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

#[test]
fn kickstart_json_reports_modified_files() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .args([
            "--output-format",
            "json",
            "-p",
            "my-plugin/my-plugin.php",
            "kickstart",
            "--since",
            "0.1.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"since\": \"0.1.0\""))
        .stdout(predicate::str::contains("class-app.php"))
        .stdout(predicate::str::contains("\"occurrences_removed\": 2"));
}

#[test]
fn kickstart_declined_changes_nothing() {
    let dir = plugin_dir();
    let root = dir.path().join("my-plugin");

    wpkickstart(dir.path())
        .args(["-p", "my-plugin/my-plugin.php", "kickstart"])
        .write_stdin("n\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Operation cancelled"));

    assert_eq!(
        fs::read_to_string(root.join("app/class-app.php")).unwrap(),
        APP_FILE
    );
}

#[test]
fn plugin_file_from_environment() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .env("KICKSTART_PLUGIN_FILE", "my-plugin/my-plugin.php")
        .args(["kickstart", "-y"])
        .assert()
        .success();
}

#[test]
fn missing_plugin_file_flag_is_user_error() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path())
        .arg("kickstart")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No plugin file given"))
        .stderr(predicate::str::contains("--plugin-file").or(predicate::str::contains("-p")));
}

#[test]
fn absent_plugin_file_is_not_found() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path())
        .args(["-p", "nope/nope.php", "info"])
        .assert()
        .code(3);
}

#[test]
fn resolve_prints_class_file() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .args([
            "-p",
            "my-plugin/my-plugin.php",
            "resolve",
            "Vendor\\Plugin\\Service\\Replace_CLI",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "services/replace-cli/class-replace-cli.php",
        ));
}

#[test]
fn resolve_miss_exits_not_found() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .args(["-p", "my-plugin/my-plugin.php", "resolve", "Vendor\\Stray"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not resolve Vendor\\Stray"));
}

#[test]
fn resolve_explain_lists_candidates() {
    let dir = plugin_dir();

    wpkickstart(&dir.path().join("my-plugin"))
        .args(["resolve", "Vendor\\Plugin\\Service\\Widget", "--explain"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("app/class-widget.php"))
        .stdout(predicate::str::contains("services/widget/class-widget.php"));
}

#[test]
fn resolve_malformed_identifier_is_user_error() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path())
        .args(["resolve", "Vendor\\\\Widget"])
        .assert()
        .code(2);
}

#[test]
fn info_json_lists_attachments_and_commands() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .args([
            "-p",
            "my-plugin/my-plugin.php",
            "--output-format",
            "json",
            "info",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"basename\": \"my-plugin/my-plugin.php\""))
        .stdout(predicate::str::contains("Replace_CLI"))
        .stdout(predicate::str::contains("\"name\": \"kickstart\""))
        .stdout(predicate::str::contains("\"hook\": \"init\""));
}

#[test]
fn info_plain_shows_headers() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .args(["-p", "my-plugin/my-plugin.php", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My Plugin"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn deactivate_reaches_example_service() {
    let dir = plugin_dir();

    wpkickstart(dir.path())
        .args(["-p", "my-plugin/my-plugin.php", "deactivate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Example_Service"));
}

#[test]
fn config_file_supplies_plugin_file() {
    let dir = plugin_dir();
    let config = dir.path().join("wpk.toml");
    fs::write(&config, "[output]\nno_color = true\n").unwrap();

    wpkickstart(dir.path())
        .args(["-c", "wpk.toml", "config", "set", "plugin.file", "my-plugin/my-plugin.php"])
        .assert()
        .success();
    assert!(fs::read_to_string(&config).unwrap().contains("no_color = true"));

    wpkickstart(dir.path())
        .args(["-c", "wpk.toml", "config", "get", "plugin.file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my-plugin/my-plugin.php"));

    wpkickstart(dir.path())
        .args(["-c", "wpk.toml", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My Plugin"));
}

#[test]
fn missing_explicit_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path())
        .args(["-c", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_local_writes_config() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join(".wpkickstart.toml")).unwrap();
    assert!(text.contains("base_url"));
}

#[test]
fn completions_generate_script() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wpkickstart"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();

    wpkickstart(dir.path()).arg("frobnicate").assert().code(2);
}
