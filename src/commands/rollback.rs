use clap::Args;
use serde::Serialize;

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct RollbackArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct RollbackOutput {
    pub command: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolled_back_to: Option<String>,
}

pub fn run(args: RollbackArgs) -> CmdResult<RollbackOutput> {
    let manager = args.target.manager()?;

    // "No previous release" is a reportable condition, not a crash:
    // it covers first deploys, single-release histories, and dangling
    // pointers alike.
    let Some(previous) = manager.previous_release()? else {
        return Ok((
            RollbackOutput {
                command: "rollback",
                status: "no-previous-release",
                rolled_back_to: None,
            },
            1,
        ));
    };

    manager.set_current_release(&previous)?;

    Ok((
        RollbackOutput {
            command: "rollback",
            status: "rolled-back",
            rolled_back_to: Some(previous),
        },
        0,
    ))
}
