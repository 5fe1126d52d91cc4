use std::path::PathBuf;

use clap::Parser;

//
// For parsing the submit invocation.
//
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Endpoint of the coordinator.
    #[arg(short, long, default_value = "http://[::1]:8030")]
    pub coordinator: String,

    /// Path to the cluster configuration file.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Input files to count words in.
    #[arg(required = true)]
    pub files: Vec<String>,
}
