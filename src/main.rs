use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use portage_versions::commands::{self, Extreme};
use portage_versions::config::Config;
use portage_versions::logging;

#[derive(Parser)]
#[command(name = "portage-versions")]
#[command(version, about = "Query ebuild versions in a portage tree")]
struct Cli {
    /// Repository to use instead of the configured PORTDIR
    #[arg(long, global = true)]
    portdir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every version of each package, oldest first
    Versions {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Print the path of the newest ebuild of each package
    Which {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Print the newest version of a package
    Newest { package: String },
    /// Print the oldest version of a package
    Oldest { package: String },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref(), cli.json_log)?;

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(portdir) = cli.portdir {
        config.portdir = portdir;
    }
    let repos = config.repositories();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let (packages, failures) = match cli.command {
        Command::Versions { packages } => {
            let failures = commands::for_each_package(&packages, |pkg| {
                commands::versions(&mut out, &repos, pkg)
            });
            (packages.len(), failures)
        }
        Command::Which { packages } => {
            let failures = commands::for_each_package(&packages, |pkg| {
                commands::which(&mut out, &repos, pkg)
            });
            (packages.len(), failures)
        }
        Command::Newest { package } => {
            let failures = commands::for_each_package(&[package], |pkg| {
                commands::extreme(&mut out, &repos, pkg, Extreme::Newest)
            });
            (1, failures)
        }
        Command::Oldest { package } => {
            let failures = commands::for_each_package(&[package], |pkg| {
                commands::extreme(&mut out, &repos, pkg, Extreme::Oldest)
            });
            (1, failures)
        }
    };
    out.flush()?;

    // Partial failures were already reported per package
    if failures == packages {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
