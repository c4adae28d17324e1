use clap::Args;
use serde::Serialize;

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct ActivateArgs {
    /// Release ID to mark as current
    pub release_id: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct ActivateOutput {
    pub command: &'static str,
    pub activated: String,
}

pub fn run(args: ActivateArgs) -> CmdResult<ActivateOutput> {
    let manager = args.target.manager()?;

    manager.set_current_release(&args.release_id)?;

    Ok((
        ActivateOutput {
            command: "activate",
            activated: args.release_id.clone(),
        },
        0,
    ))
}
