use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct MemberCommand {
    #[command(subcommand)]
    command: MemberSubcommand,
}

#[derive(Debug, Subcommand)]
enum MemberSubcommand {
    /// Register a member
    Create(create::CreateMemberArgs),
}

pub(crate) async fn run(command: MemberCommand) -> Result<(), String> {
    match command.command {
        MemberSubcommand::Create(args) => create::run(args).await,
    }
}
