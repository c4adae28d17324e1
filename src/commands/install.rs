use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use slipway::install::{ArtifactInstall, InstallReport};
use slipway::release_id;

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct InstallArgs {
    /// Local artifact files to upload into the release directory
    #[arg(required = true)]
    pub artifacts: Vec<PathBuf>,

    /// Install into an existing release ID instead of generating one
    #[arg(long, conflicts_with = "version")]
    pub release: Option<String>,

    /// Version to embed in the generated release ID
    #[arg(long)]
    pub version: Option<String>,

    /// Point the 'current' symlink at the release after installing
    #[arg(long)]
    pub activate: bool,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct InstallOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub report: InstallReport,
    pub activated: bool,
}

pub fn run(args: InstallArgs) -> CmdResult<InstallOutput> {
    let release = args
        .release
        .clone()
        .unwrap_or_else(|| release_id::generate(args.version.as_deref()));

    let install = ArtifactInstall::new(
        &args.target.base,
        args.artifacts.clone(),
        args.target.client()?,
    )?;
    let report = install.install(&release)?;

    if args.activate {
        args.target.manager()?.set_current_release(&release)?;
    }

    Ok((
        InstallOutput {
            command: "install",
            report,
            activated: args.activate,
        },
        0,
    ))
}
