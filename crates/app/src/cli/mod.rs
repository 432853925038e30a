use clap::{Parser, Subcommand};

mod db;
mod member;

#[derive(Debug, Parser)]
#[command(name = "readitagain-app", about = "ReadItAgain CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Member(member::MemberCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Member(command) => member::run(command).await,
        }
    }
}
