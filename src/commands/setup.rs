use clap::Args;
use serde::Serialize;

use slipway::setup::{ProjectSetup, DIR_PERMS_DEFAULT, FILE_PERMS_DEFAULT};

use super::{CmdResult, TargetArgs};

#[derive(Args)]
pub struct SetupArgs {
    /// Owner to set recursively, in 'user:group' form
    #[arg(long)]
    pub owner: Option<String>,

    /// Permissions for files in the code deploy
    #[arg(long, default_value = FILE_PERMS_DEFAULT)]
    pub file_perms: String,

    /// Permissions for the base and releases directories
    #[arg(long, default_value = DIR_PERMS_DEFAULT)]
    pub dir_perms: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Serialize)]
pub struct SetupOutput {
    pub command: &'static str,
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

pub fn run(args: SetupArgs) -> CmdResult<SetupOutput> {
    let setup = ProjectSetup::new(&args.target.base, args.target.client()?)?;

    setup.setup_directories()?;
    setup.set_permissions(args.owner.as_deref(), &args.file_perms, &args.dir_perms)?;

    Ok((
        SetupOutput {
            command: "setup",
            base: args.target.base.clone(),
            owner: args.owner.clone(),
        },
        0,
    ))
}
