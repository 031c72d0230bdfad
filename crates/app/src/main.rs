mod args;
mod op;
mod ops;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::{Op, OpContext};
use ops::{Demo, Folders, Init, Records, Version};

command_enum! {
    (Init, Init),
    (Version, Version),
    (Records, Records),
    (Folders, Folders),
    (Demo, Demo),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let ctx = match OpContext::new(args.config_dir.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let guard = service::init_tracing(ctx.service.log_level);

    let result = args.command.execute(&ctx).await;
    drop(guard);

    match result {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
