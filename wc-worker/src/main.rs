mod args;

use args::Args;
use clap::Parser;
use tonic::transport::Server;
use tracing::info;

use wc_worker::core::{WordCountWorker, WorkerServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let addr = format!("[::1]:{}", args.port).parse()?;
    info!("Worker listening on {}", addr);

    Server::builder()
        .add_service(WorkerServer::new(WordCountWorker::default()))
        .serve(addr)
        .await?;

    Ok(())
}
