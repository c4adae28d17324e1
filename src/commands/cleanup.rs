use clap::Args;
use serde::Serialize;

use slipway::release::{CleanupReport, DEFAULT_KEEP};

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct CleanupArgs {
    /// Number of recent releases to keep
    #[arg(long, default_value_t = DEFAULT_KEEP)]
    pub keep: usize,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct CleanupOutput {
    pub command: &'static str,
    pub keep: usize,
    #[serde(flatten)]
    pub report: CleanupReport,
}

pub fn run(args: CleanupArgs) -> CmdResult<CleanupOutput> {
    let manager = args.target.manager()?;

    let report = manager.cleanup(args.keep)?;
    let exit_code = if report.failed.is_empty() { 0 } else { 1 };

    Ok((
        CleanupOutput {
            command: "cleanup",
            keep: args.keep,
            report,
        },
        exit_code,
    ))
}
