mod args;
use args::Args;

mod core;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    core::submit(&args.coordinator, &args.config, args.files).await
}
