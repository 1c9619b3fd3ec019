use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_it::cli::{default_version_finder, resolve_key, ReleaseOptions, ReleaseWorkflow};
use release_it::config;
use release_it::repository::RepositoryDetector;
use release_it::ui::{self, Terminal};

#[derive(clap::Parser)]
#[command(
    name = "release-it",
    about = "Create composer package releases from your checkout"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Directory of the package to release")]
    dir: PathBuf,

    #[arg(short, long, help = "Sign the release with the default key")]
    sign: bool,

    #[arg(short, long, help = "Sign the release with the given key id")]
    key: Option<String>,

    #[arg(long, help = "Create the release tag without pushing it")]
    no_push: bool,

    #[arg(long, help = "Determine the version without creating the release")]
    dry_run: bool,

    #[arg(long, help = "Log what is going on to stderr")]
    verbose: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-it {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref(), &args.dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let mut git = config.git.clone();
    if args.no_push {
        git.push = false;
    }
    let detector = RepositoryDetector::new(git);

    let console = Terminal::new();
    let finder = default_version_finder(&config, &console);
    let options = ReleaseOptions {
        key: resolve_key(args.sign, args.key.as_deref(), &config.signing),
        dry_run: args.dry_run,
    };
    let workflow = ReleaseWorkflow::new(&console, &finder, options);

    let manifest = args.dir.join(&config.manifest);
    let outcome = workflow
        .run(&manifest, || detector.detect(&args.dir))
        .context("Failure while creating release")?;

    match outcome.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}
