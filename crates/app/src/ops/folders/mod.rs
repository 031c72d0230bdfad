use clap::{Args, Subcommand};

pub mod ls;

use crate::op::Op;
use service::FolderQuery;

crate::command_enum! {
    (Ls, FolderQuery),
}

pub type FoldersCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Folders {
    #[command(subcommand)]
    pub command: FoldersCommand,
}

#[async_trait::async_trait]
impl Op for Folders {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
