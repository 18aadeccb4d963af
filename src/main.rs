//! CLI entry point and command dispatch for prvet.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

#[derive(Parser)]
#[command(name = "prvet")]
#[command(version)]
#[command(about = "Pull request standards checker", long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    GITHUB_TOKEN          Token used for API requests (or pass --token)\n    GITHUB_REPOSITORY     Repository slug, set automatically on GitHub Actions\n    GITHUB_EVENT_PATH     Event payload path, set automatically on GitHub Actions\n    PRVET_QUIET           Set to 1 to print failures only\n\nRule options may also come from .prvet.yml in the working directory or\n~/.config/prvet/config.yml; CLI flags override both."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a pull request's title and commit messages against the
    /// configured standards
    ///
    /// On GitHub Actions the pull request is discovered from the event
    /// payload; elsewhere pass --repo and --pr. The exit status is 1 when
    /// any configured rule fails, after the full report is printed.
    Check(cmd::check::CheckArgs),
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Also show commit hash and build date
        #[arg(long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            let failed = cmd::check::cmd_check(&args)?;
            if failed {
                // Non-zero exit only after the full report was produced
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Completion { shell } => cmd_completion(shell),
        Commands::Version { verbose } => cmd::util::cmd_version(verbose),
    }
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "prvet", &mut io::stdout());
    Ok(())
}
