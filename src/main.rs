use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{activate, cleanup, current, install, releases, rollback, setup};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "slipway")]
#[command(version = VERSION)]
#[command(about = "Manage timestamped release directories on remote servers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List releases, newest first
    Releases(releases::ReleasesArgs),
    /// Show the currently active release
    Current(current::CurrentArgs),
    /// Point the 'current' symlink at a release
    Activate(activate::ActivateArgs),
    /// Roll back to the release before the current one
    Rollback(rollback::RollbackArgs),
    /// Remove old releases beyond the retention count
    Cleanup(cleanup::CleanupArgs),
    /// Create project directories and normalize permissions
    Setup(setup::SetupArgs),
    /// Upload artifacts into a release directory
    Install(install::InstallArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Releases(args) => output::print_result(releases::run(args)),
        Commands::Current(args) => output::print_result(current::run(args)),
        Commands::Activate(args) => output::print_result(activate::run(args)),
        Commands::Rollback(args) => output::print_result(rollback::run(args)),
        Commands::Cleanup(args) => output::print_result(cleanup::run(args)),
        Commands::Setup(args) => output::print_result(setup::run(args)),
        Commands::Install(args) => output::print_result(install::run(args)),
    };

    std::process::ExitCode::from(exit_code)
}
