//! End-to-end bootstrap on a real plugin directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use kickstart_adapters::{FileHeaderReader, KICKSTART_COMMAND, LocalFilesystem, builtin_registry};
use kickstart_core::application::services::AppState;
use kickstart_core::prelude::*;
use tempfile::TempDir;

const MAIN_FILE: &str = "<?php\n\
/**\n\
 * Plugin Name: My Plugin\n\
 * Version:     0.1.0\n\
 */\n";

const APP_FILE: &str = "<?php\n\
\t\t// An example service so you can see how things work, below cli command should remove this.\n\
\t\t$this->example_service = new Service\\Example_Service();\n\
\t\t$this->replace_cli = new Service\\Replace_CLI();\n";

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn plugin_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("my-plugin");
    write(&root, "my-plugin.php", MAIN_FILE);
    write(&root, "app/class-app.php", APP_FILE);
    write(&root, "services/replace-cli/class-replace-cli.php", "<?php\n");
    write(&root, "vendor/autoload.php", APP_FILE);
    dir
}

fn application(dir: &TempDir) -> Application {
    Application::new(
        dir.path().join("my-plugin/my-plugin.php"),
        AppOptions::default(),
        Arc::new(LocalFilesystem::new()),
        &FileHeaderReader::new(),
    )
    .unwrap()
}

#[test]
fn constructs_from_main_file() {
    let dir = plugin_dir();
    let app = application(&dir);

    assert_eq!(app.info().basename, "my-plugin/my-plugin.php");
    assert_eq!(app.version(), "0.1.0");
    assert_eq!(app.header("Plugin Name"), "My Plugin");
    assert!(app.info().url.ends_with("/my-plugin/"));
    assert_eq!(app.state(), AppState::Constructed);
}

#[test]
fn resolves_builtin_identifiers_on_disk() {
    let dir = plugin_dir();
    let app = application(&dir);

    let found = app
        .resolve(&ClassIdentifier::parse("Kickstart\\Plugin\\Service\\Replace_CLI").unwrap())
        .unwrap();
    assert!(found.ends_with("services/replace-cli/class-replace-cli.php"));
}

#[test]
fn kickstart_rewrites_eligible_files_only() {
    let dir = plugin_dir();
    let mut app = application(&dir);
    let mut host = Host::new();

    app.start(&builtin_registry(), &mut host).unwrap();
    let outcome = host
        .invoke(
            KICKSTART_COMMAND,
            app.info(),
            CommandArgs::new().with("since", "0.1.0"),
        )
        .unwrap();

    let root = dir.path().join("my-plugin");
    assert_eq!(
        fs::read_to_string(root.join("app/class-app.php")).unwrap(),
        "<?php\n\t\t$this->replace_cli = new Service\\Replace_CLI();\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("vendor/autoload.php")).unwrap(),
        APP_FILE
    );
    assert_eq!(outcome.args["since"], "0.1.0");
    assert_eq!(outcome.report.unwrap().files_modified(), 1);
}

#[test]
fn missing_main_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = Application::new(
        dir.path().join("absent.php"),
        AppOptions::default(),
        Arc::new(LocalFilesystem::new()),
        &FileHeaderReader::new(),
    );
    assert!(matches!(result, Err(KickstartError::Domain(_))));
}
