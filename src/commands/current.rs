use clap::Args;
use serde::Serialize;

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct CurrentArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct CurrentOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// True when the pointer names a release that is no longer present
    /// under the releases directory.
    pub dangling: bool,
}

pub fn run(args: CurrentArgs) -> CmdResult<CurrentOutput> {
    let manager = args.target.manager()?;

    let current = manager.current_release()?;
    let dangling = match &current {
        Some(id) => !manager.list_releases()?.contains(id),
        None => false,
    };

    Ok((
        CurrentOutput {
            command: "current",
            current,
            dangling,
        },
        0,
    ))
}
