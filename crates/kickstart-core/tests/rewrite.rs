//! RewriteEngine behaviour against real and in-memory trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kickstart_adapters::{LocalFilesystem, MemoryFilesystem};
use kickstart_core::application::{ApplicationError, RewriteEngine};
use kickstart_core::domain::{BUILTIN_REMOVALS, FileFilter, RemovalRule};
use kickstart_core::error::KickstartError;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn local_engine() -> RewriteEngine {
    RewriteEngine::new(Arc::new(LocalFilesystem::new()))
}

#[test]
fn removes_matching_line() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.php", "X\nY\n");

    let report = local_engine()
        .rewrite(dir.path(), &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(fs::read_to_string(&a).unwrap(), "Y\n");
    assert_eq!(report.files_modified(), 1);
    assert_eq!(report.occurrences_removed, 1);
}

#[test]
fn ignored_directory_is_untouched() {
    let dir = TempDir::new().unwrap();
    let eligible = write(dir.path(), "app/class-app.php", "keep\nX\n");
    let ignored = write(dir.path(), "vendor/pkg/class-lib.php", "keep\nX\n");

    let report = local_engine()
        .rewrite(dir.path(), &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(fs::read_to_string(&eligible).unwrap(), "keep\n");
    assert_eq!(fs::read_to_string(&ignored).unwrap(), "keep\nX\n");
    assert_eq!(report.modified, vec![eligible]);
    assert_eq!(report.skipped_ignored, 1);
}

#[test]
fn disallowed_extension_is_untouched() {
    let dir = TempDir::new().unwrap();
    let txt = write(dir.path(), "notes.txt", "X\n");
    let bak = write(dir.path(), "a.php.bak", "X\n");
    let js = write(dir.path(), "assets/app.js", "X\n");

    let report = local_engine()
        .rewrite(dir.path(), &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(fs::read_to_string(&txt).unwrap(), "X\n");
    assert_eq!(fs::read_to_string(&bak).unwrap(), "X\n");
    assert_eq!(fs::read_to_string(&js).unwrap(), "");
    assert_eq!(report.skipped_extension, 2);
}

#[test]
fn removes_all_k_occurrences_and_nothing_else() {
    let dir = TempDir::new().unwrap();
    let body = "alpha\nREMOVE\nbeta\nREMOVE\nREMOVE\ngamma\n";
    let path = write(dir.path(), "README.md", body);

    let report = local_engine()
        .rewrite(
            dir.path(),
            &[RemovalRule::line("REMOVE")],
            &FileFilter::builtin(),
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nbeta\ngamma\n");
    assert_eq!(report.occurrences_removed, 3);
}

#[test]
fn second_run_changes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app/class-app.php", "a\nX\nb\nY\n");
    write(dir.path(), "README.md", "X\n");
    let rules = [RemovalRule::line("X"), RemovalRule::line("Y")];

    let engine = local_engine();
    let first = engine
        .rewrite(dir.path(), &rules, &FileFilter::builtin())
        .unwrap();
    let second = engine
        .rewrite(dir.path(), &rules, &FileFilter::builtin())
        .unwrap();

    assert_eq!(first.files_modified(), 2);
    assert_eq!(second.files_modified(), 0);
    assert_eq!(second.occurrences_removed, 0);
    assert_eq!(second.unchanged, 2);
}

#[test]
fn unchanged_files_are_not_written() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/p/a.php", "nothing to see\n")
        .add_file("/p/b.php", "X\n");

    let report = RewriteEngine::new(Arc::new(fs.clone()))
        .rewrite("/p", &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(fs.write_count(), 1);
    assert_eq!(report.unchanged, 1);
    assert_eq!(fs.read_file("/p/b.php").as_deref(), Some(""));
}

#[test]
fn failures_are_recorded_and_walk_continues() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/p/a.php", "X\n")
        .add_file("/p/b.php", "X\n")
        .add_file("/p/c.php", "X\n")
        .add_broken_entry("/p/locked/d.php")
        .deny_read("/p/a.php")
        .deny_write("/p/b.php");

    let report = RewriteEngine::new(Arc::new(fs.clone()))
        .rewrite("/p", &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(report.modified, vec![PathBuf::from("/p/c.php")]);
    assert_eq!(report.failures.len(), 3);
    let failed: Vec<_> = report.failures.iter().map(|f| f.path.clone()).collect();
    assert!(failed.contains(&PathBuf::from("/p/a.php")));
    assert!(failed.contains(&PathBuf::from("/p/b.php")));
    assert!(failed.contains(&PathBuf::from("/p/locked/d.php")));
    assert_eq!(fs.read_file("/p/b.php").as_deref(), Some("X\n"));
    assert!(report.has_failures());
}

#[test]
fn symlink_leaving_root_is_skipped() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/outside/shared.php", "X\n")
        .add_file("/p/a.php", "X\n")
        .add_symlink("/p/link.php", "/outside/shared.php");

    let report = RewriteEngine::new(Arc::new(fs.clone()))
        .rewrite("/p", &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(report.skipped_outside_root, 1);
    assert_eq!(fs.read_file("/outside/shared.php").as_deref(), Some("X\n"));
    assert_eq!(fs.read_file("/p/a.php").as_deref(), Some(""));
}

#[test]
fn symlink_into_ignored_directory_is_skipped() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/p/vendor/pkg/lib.php", "X\n")
        .add_file("/p/app/a.php", "X\n")
        .add_symlink("/p/app/lib.php", "/p/vendor/pkg/lib.php");

    let report = RewriteEngine::new(Arc::new(fs.clone()))
        .rewrite("/p", &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(report.modified, vec![PathBuf::from("/p/app/a.php")]);
    assert_eq!(report.skipped_ignored, 2);
    assert_eq!(fs.read_file("/p/vendor/pkg/lib.php").as_deref(), Some("X\n"));
}

#[cfg(unix)]
#[test]
fn real_symlink_into_vendor_is_untouched() {
    let dir = TempDir::new().unwrap();
    let vendored = write(dir.path(), "vendor/pkg/lib.php", "X\n");
    fs::create_dir_all(dir.path().join("app")).unwrap();
    std::os::unix::fs::symlink(&vendored, dir.path().join("app/lib.php")).unwrap();

    let report = local_engine()
        .rewrite(dir.path(), &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert!(report.modified.is_empty());
    assert_eq!(fs::read_to_string(&vendored).unwrap(), "X\n");
}

#[test]
fn root_must_be_a_directory() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "a.php", "");

    let err = local_engine()
        .rewrite(&file, BUILTIN_REMOVALS, &FileFilter::builtin())
        .unwrap_err();

    assert!(matches!(
        err,
        KickstartError::Application(ApplicationError::NotADirectory { .. })
    ));
}

#[test]
fn root_named_like_ignored_dir_still_rewrites() {
    let outer = TempDir::new().unwrap();
    let root = outer.path().join("vendor").join("my-plugin");
    let path = write(&root, "app/class-app.php", "X\n");

    let report = local_engine()
        .rewrite(&root, &[RemovalRule::line("X")], &FileFilter::builtin())
        .unwrap();

    assert_eq!(report.files_modified(), 1);
    assert_eq!(fs::read_to_string(path).unwrap(), "");
}

#[test]
fn builtin_rules_strip_example_service_wiring() {
    let dir = TempDir::new().unwrap();
    let source = "\t\t$this->shared = new Shared();\n\
\t\t// An example service so you can see how things work, below cli command should remove this.\n\
\t\t$this->example_service = new Service\\Example_Service();\n\
\t\t$this->replace_cli = new Service\\Replace_CLI();\n";
    let path = write(dir.path(), "app/class-app.php", source);

    let report = local_engine()
        .rewrite(dir.path(), BUILTIN_REMOVALS, &FileFilter::builtin())
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\t\t$this->shared = new Shared();\n\t\t$this->replace_cli = new Service\\Replace_CLI();\n"
    );
    assert_eq!(report.occurrences_removed, 2);
}
