// tests/package_test.rs
use std::fs;

use release_it::domain::Series;
use release_it::error::ReleaseError;
use release_it::package::Package;
use tempfile::TempDir;

#[test]
fn test_package_from_manifest_file() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("composer.json");
    fs::write(
        &manifest,
        r#"{
    "name": "acme/widgets",
    "extra": {
        "branch-alias": {
            "dev-master": "2.1.x-dev",
            "dev-legacy": "1.x-dev"
        }
    }
}"#,
    )
    .unwrap();

    let package = Package::from_file(&manifest).unwrap();

    assert_eq!(package.series("dev-master").unwrap(), Some(Series::parse("2.1").unwrap()));
    assert_eq!(package.series("dev-legacy").unwrap(), Some(Series::parse("1").unwrap()));
    assert_eq!(package.series("dev-feature").unwrap(), None);
}

#[test]
fn test_missing_manifest_names_the_file() {
    let dir = TempDir::new().unwrap();

    let err = Package::from_file(dir.path().join("composer.json")).unwrap_err();

    assert!(matches!(err, ReleaseError::InvalidPackage(_)));
    assert_eq!(
        err.to_string(),
        "No composer.json found - are you sure this is a composer package?"
    );
}

#[test]
fn test_manifest_directory_is_invalid() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("composer.json")).unwrap();

    let result = Package::from_file(dir.path().join("composer.json"));
    assert!(matches!(result, Err(ReleaseError::InvalidPackage(_))));
}
