use clap::{Args, Subcommand};

pub mod filter;

use crate::op::Op;
use filter::Filter;

crate::command_enum! {
    (Filter, Filter),
}

pub type RecordsCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Records {
    #[command(subcommand)]
    pub command: RecordsCommand,
}

#[async_trait::async_trait]
impl Op for Records {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
