use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "skycloud")]
#[command(about = "Records and folders from the SkyCloud dashboard, on the command line")]
pub struct Args {
    /// Directory holding config.toml (defaults to ~/.skycloud)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
