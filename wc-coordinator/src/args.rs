use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The port for the coordinator to listen on.
    #[arg(short, long, default_value = "8030")]
    pub port: u16,

    /// Directory for intermediate files; defaults to the system temp dir.
    #[arg(short, long)]
    pub scratch_dir: Option<PathBuf>,
}
