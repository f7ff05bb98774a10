use std::path::PathBuf;
use std::process::ExitCode;

use axum::http::HeaderMap;
use clap::{Parser, Subcommand};
use semver_router::config::{load_config, LoadError};
use semver_router::guard::{Decision, GuardConfig};

#[derive(Parser)]
#[command(name = "semver-cli")]
#[command(about = "Check versions against semver route ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide how a route registered with RANGE treats VERSION
    Check {
        #[arg(short, long)]
        range: String,

        /// Omit to see how a request without a version is treated
        #[arg(short, long)]
        version: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { range, version } => check(&range, version.as_deref()),
        Commands::Validate { config } => validate(&config),
    }
}

fn check(range: &str, version: Option<&str>) -> ExitCode {
    let guard = match GuardConfig::default().range(range) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut headers = HeaderMap::new();
    if let Some(version) = version {
        match version.parse() {
            Ok(value) => {
                headers.insert(semver_router::guard::DEFAULT_VERSION_HEADER, value);
            }
            Err(_) => {
                eprintln!("Error: version is not a valid header value");
                return ExitCode::from(2);
            }
        }
    }

    match guard.decide(&headers) {
        Decision::Proceed(v) => println!("proceed: {} satisfies {}", v, guard.range()),
        Decision::Skip(v) => println!("skip: {} does not satisfy {}", v, guard.range()),
        Decision::Fail(e) => {
            println!("fail: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn validate(path: &std::path::Path) -> ExitCode {
    match load_config(path) {
        Ok(config) => {
            println!("{}: ok ({} routes)", path.display(), config.routes.len());
            ExitCode::SUCCESS
        }
        Err(LoadError::Validation(errors)) => {
            eprintln!("{}: {} problem(s)", path.display(), errors.len());
            for err in errors {
                eprintln!("  - {}", err);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
