mod args;

use args::Args;
use clap::Parser;
use tonic::transport::Server;
use tracing::info;

use wc_coordinator::core::{CoordinatorServer, WordCountCoordinator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let addr = format!("[::1]:{}", args.port).parse()?;
    let scratch_dir = args.scratch_dir.unwrap_or_else(std::env::temp_dir);

    info!("Coordinator listening on {}", addr);

    Server::builder()
        .add_service(CoordinatorServer::new(WordCountCoordinator::new(scratch_dir)))
        .serve(addr)
        .await?;

    Ok(())
}
