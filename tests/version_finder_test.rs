// tests/version_finder_test.rs
use release_it::cli::default_version_finder;
use release_it::config::Config;
use release_it::domain::Version;
use release_it::finder::{AskingVersionFinder, NextSeriesVersionFinder, VersionFinder, VersionFinderChain};
use release_it::package::Package;
use release_it::repository::MockRepository;
use release_it::ui::ScriptedConsole;

const COMPOSER_JSON: &str = r#"{
    "name": "acme/widgets",
    "extra": {
        "branch-alias": {
            "dev-master": "1.0.x-dev"
        }
    }
}"#;

fn package() -> Package {
    Package::from_json(COMPOSER_JSON).unwrap()
}

#[test]
fn test_first_release_of_series() {
    let console = ScriptedConsole::with_answers(["yes"]);
    let repository = MockRepository::new().with_branch("master");

    let version = NextSeriesVersionFinder::new(&console)
        .find(&package(), &repository)
        .unwrap();

    assert_eq!(version, Some(Version::parse("v1.0.0").unwrap()));
    assert_eq!(
        console.output(),
        vec!["No release in series v1.0 yet, determined v1.0.0 as first version number.".to_string()]
    );
}

#[test]
fn test_next_release_of_series() {
    let console = ScriptedConsole::with_answers(["yes"]);
    let repository = MockRepository::new()
        .with_branch("master")
        .with_releases(["v0.9.0", "v1.0.0", "v1.0.1"]);

    let version = NextSeriesVersionFinder::new(&console)
        .find(&package(), &repository)
        .unwrap();

    assert_eq!(version, Some(Version::parse("v1.0.2").unwrap()));
    assert_eq!(
        console.output(),
        vec![
            "Last release in series v1.0 was v1.0.1, determined v1.0.2 as next version number."
                .to_string()
        ]
    );
}

#[test]
fn test_unmapped_branch_has_no_series() {
    let console = ScriptedConsole::new();
    let repository = MockRepository::new()
        .with_branch("cool-new-feature")
        .with_releases(["v1.0.0"]);

    let version = NextSeriesVersionFinder::new(&console)
        .find(&package(), &repository)
        .unwrap();

    assert_eq!(version, None);
    assert_eq!(
        console.output(),
        vec!["Can not determine current series for branch cool-new-feature".to_string()]
    );
    assert!(console.prompts().is_empty());
    assert!(repository.release_queries().is_empty());
}

#[test]
fn test_asking_reprompts_after_invalid_input() {
    let console = ScriptedConsole::with_answers(["foo", "v1.1.0"]);
    let repository = MockRepository::new();

    let version = AskingVersionFinder::new(&console)
        .find(&package(), &repository)
        .unwrap();

    assert_eq!(version, Some(Version::parse("v1.1.0").unwrap()));
    assert_eq!(console.prompts().len(), 2);
    assert!(console
        .output()
        .contains(&"Given value foo is not a valid version number".to_string()));
}

#[test]
fn test_declined_series_version_falls_back_to_asking() {
    let console = ScriptedConsole::with_answers(["n", "v2.0.0"]);
    let repository = MockRepository::new()
        .with_branch("master")
        .with_releases(["v1.0.1"]);
    let chain = VersionFinderChain::new(vec![
        Box::new(NextSeriesVersionFinder::new(&console)),
        Box::new(AskingVersionFinder::new(&console)),
    ]);

    let version = chain.find(&package(), &repository).unwrap();

    assert_eq!(version, Some(Version::new(2, 0, 0)));
    assert_eq!(console.remaining_answers(), 0);
    assert!(console.output().contains(&"Last 5 releases:".to_string()));
}

#[test]
fn test_confirmed_series_version_skips_asking() {
    let console = ScriptedConsole::with_answers(["y", "v9.9.9"]);
    let repository = MockRepository::new().with_branch("master");

    let finder = default_version_finder(&Config::default(), &console);
    let version = finder.find(&package(), &repository).unwrap();

    assert_eq!(version, Some(Version::new(1, 0, 0)));
    assert_eq!(console.remaining_answers(), 1);
    assert!(!console.output().contains(&"Last 5 releases:".to_string()));
}

#[test]
fn test_manifest_without_aliases_goes_straight_to_asking() {
    let console = ScriptedConsole::with_answers(["1.0.0"]);
    let repository = MockRepository::new().with_branch("master");
    let package = Package::from_json(r#"{"name": "acme/widgets"}"#).unwrap();

    let version = default_version_finder(&Config::default(), &console)
        .find(&package, &repository)
        .unwrap();

    assert_eq!(version, Some(Version::new(1, 0, 0)));
    assert_eq!(console.output()[0], "Can not determine current series for branch master");
}

#[test]
fn test_last_release_at_maximum_patch_level_is_an_error() {
    let console = ScriptedConsole::with_answers(["yes"]);
    let repository = MockRepository::new()
        .with_branch("master")
        .with_releases(["v1.0.18446744073709551615"]);

    let result = NextSeriesVersionFinder::new(&console).find(&package(), &repository);

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Given value v1.0.18446744073709551615 is not a valid version number"
    );
    assert_eq!(console.remaining_answers(), 1);
}
