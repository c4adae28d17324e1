use clap::Args;
use serde::Serialize;

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct ReleasesArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct ReleasesOutput {
    pub command: &'static str,
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    pub releases: Vec<String>,
}

pub fn run(args: ReleasesArgs) -> CmdResult<ReleasesOutput> {
    let manager = args.target.manager()?;

    let releases = manager.list_releases()?;
    let current = manager.current_release()?;

    Ok((
        ReleasesOutput {
            command: "releases",
            base: args.target.base.clone(),
            current,
            releases,
        },
        0,
    ))
}
