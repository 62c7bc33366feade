use std::path::PathBuf;

use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Log every expansion step (same as `DEBUG: true` in the config)
    #[arg(short, long)]
    pub debug: bool,

    /// Initial editor contents
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Additional configuration file, applied over the config directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
