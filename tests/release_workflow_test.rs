// tests/release_workflow_test.rs
use std::fs;
use std::path::PathBuf;

use release_it::cli::{default_version_finder, ReleaseOptions, ReleaseOutcome, ReleaseWorkflow};
use release_it::config::Config;
use release_it::domain::{Key, Version};
use release_it::error::ReleaseError;
use release_it::repository::{MockRepository, Repository};
use release_it::ui::ScriptedConsole;
use tempfile::TempDir;

const COMPOSER_JSON: &str = r#"{"extra": {"branch-alias": {"dev-master": "1.0.x-dev"}}}"#;

fn package_dir() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("composer.json");
    fs::write(&manifest, COMPOSER_JSON).unwrap();
    (dir, manifest)
}

#[test]
fn test_missing_manifest_is_invalid_package() {
    let dir = TempDir::new().unwrap();
    let console = ScriptedConsole::new();
    let finder = default_version_finder(&Config::default(), &console);
    let workflow = ReleaseWorkflow::new(&console, &finder, ReleaseOptions::default());
    let mut opened = false;

    let outcome = workflow
        .run(&dir.path().join("composer.json"), || {
            opened = true;
            Ok(MockRepository::new())
        })
        .unwrap();

    assert_eq!(outcome, ReleaseOutcome::InvalidPackage);
    assert_eq!(outcome.exit_code(), 21);
    assert!(!opened);
    assert_eq!(
        console.errors(),
        vec!["No composer.json found - are you sure this is a composer package?".to_string()]
    );
}

#[test]
fn test_broken_manifest_is_invalid_package() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("composer.json");
    fs::write(&manifest, "{ not json").unwrap();
    let console = ScriptedConsole::new();
    let finder = default_version_finder(&Config::default(), &console);
    let workflow = ReleaseWorkflow::new(&console, &finder, ReleaseOptions::default());

    let outcome = workflow.run(&manifest, || Ok(MockRepository::new())).unwrap();

    assert_eq!(outcome, ReleaseOutcome::InvalidPackage);
    assert_eq!(console.errors().len(), 1);
}

#[test]
fn test_dirty_repository_is_refused() {
    let (_dir, manifest) = package_dir();
    let console = ScriptedConsole::new();
    let repository = MockRepository::new()
        .with_branch("master")
        .dirty([" M src/Widget.php", "?? notes.txt"]);
    let finder = default_version_finder(&Config::default(), &console);
    let workflow = ReleaseWorkflow::new(&console, &finder, ReleaseOptions::default());

    let outcome = workflow.run(&manifest, || Ok(&repository)).unwrap();

    assert_eq!(outcome.exit_code(), 22);
    assert_eq!(
        console.errors(),
        vec![
            "Can't create release, working directory not clean.".to_string(),
            " M src/Widget.php".to_string(),
            "?? notes.txt".to_string(),
        ]
    );
    assert!(console.prompts().is_empty());
    assert!(repository.created_releases().is_empty());
}

#[test]
fn test_no_version_found() {
    let (_dir, manifest) = package_dir();
    let console = ScriptedConsole::with_answers(["no"]);
    let repository = MockRepository::new().with_branch("master");
    let config = Config {
        finders: vec![release_it::config::FinderKind::NextSeries],
        ..Config::default()
    };
    let finder = default_version_finder(&config, &console);
    let workflow = ReleaseWorkflow::new(&console, &finder, ReleaseOptions::default());

    let outcome = workflow.run(&manifest, || Ok(&repository)).unwrap();

    assert_eq!(outcome, ReleaseOutcome::NoVersion);
    assert_eq!(outcome.exit_code(), 23);
    assert_eq!(
        console.errors(),
        vec!["Can not create release, unable to find a version for this release.".to_string()]
    );
    assert!(repository.created_releases().is_empty());
}

#[test]
fn test_release_is_created_with_key() {
    let (_dir, manifest) = package_dir();
    let console = ScriptedConsole::with_answers(["y"]);
    let repository = MockRepository::new()
        .with_branch("master")
        .with_releases(["v1.0.0"])
        .with_release_output(["Created tag v1.0.1"]);
    let finder = default_version_finder(&Config::default(), &console);
    let options = ReleaseOptions {
        key: Some(Key::new("0xCAFE")),
        dry_run: false,
    };
    let workflow = ReleaseWorkflow::new(&console, &finder, options);

    let outcome = workflow.run(&manifest, || Ok(&repository)).unwrap();

    let version = Version::new(1, 0, 1);
    assert_eq!(outcome, ReleaseOutcome::Released(version.clone()));
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(
        repository.created_releases(),
        vec![(version, Some(Key::new("0xCAFE")))]
    );
    let output = console.output();
    assert_eq!(
        output[output.len() - 2..].to_vec(),
        vec![
            "Created tag v1.0.1".to_string(),
            "Successfully created release v1.0.1".to_string(),
        ]
    );
}

#[test]
fn test_dry_run_does_not_touch_repository() {
    let (_dir, manifest) = package_dir();
    let console = ScriptedConsole::with_answers(["y"]);
    let repository = MockRepository::new().with_branch("master");
    let finder = default_version_finder(&Config::default(), &console);
    let options = ReleaseOptions {
        key: None,
        dry_run: true,
    };
    let workflow = ReleaseWorkflow::new(&console, &finder, options);

    let outcome = workflow.run(&manifest, || Ok(&repository)).unwrap();

    assert_eq!(outcome, ReleaseOutcome::DryRun(Version::new(1, 0, 0)));
    assert!(repository.created_releases().is_empty());
    assert_eq!(console.output().last().unwrap(), "Would create release v1.0.0");
}

#[test]
fn test_repository_failure_is_an_error() {
    let (_dir, manifest) = package_dir();
    let console = ScriptedConsole::new();
    let finder = default_version_finder(&Config::default(), &console);
    let workflow = ReleaseWorkflow::new(&console, &finder, ReleaseOptions::default());

    let result = workflow.run(&manifest, || -> release_it::Result<Box<dyn Repository>> {
        Err(ReleaseError::repository("Not a git repository: /nowhere"))
    });

    assert!(matches!(result, Err(ReleaseError::Repository { .. })));
}
