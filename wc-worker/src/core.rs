//
// Import gRPC stubs/definitions.
//
pub use worker::worker_server::{Worker, WorkerServer};
pub use worker::{MapTaskRequest, MapTaskResponse, ReduceTaskRequest, ReduceTaskResponse};
pub mod worker {
    tonic::include_proto!("worker");
}

use std::path::PathBuf;

use tonic::{Request, Response, Status};
use tracing::{error, info};

use common::JobError;

use crate::{map, reduce};

/// gRPC surface of a worker process.
///
/// The service keeps no state between calls: every invocation receives all
/// of its inputs as explicit arguments and leaves nothing behind, so task
/// handlers can safely run concurrently.
#[derive(Debug, Default)]
pub struct WordCountWorker;

#[tonic::async_trait]
impl Worker for WordCountWorker {
    async fn map(
        &self,
        request: Request<MapTaskRequest>,
    ) -> Result<Response<MapTaskResponse>, Status> {
        let request = request.into_inner();
        info!(
            "map task: {} input file(s) across {} shard(s)",
            request.input_files.len(),
            request.output_shards.len()
        );

        let inputs: Vec<PathBuf> = request.input_files.into_iter().map(PathBuf::from).collect();
        let shards: Vec<PathBuf> = request.output_shards.into_iter().map(PathBuf::from).collect();
        run_task(move || map::run_map_task(&inputs, &shards)).await?;

        Ok(Response::new(MapTaskResponse {}))
    }

    async fn reduce(
        &self,
        request: Request<ReduceTaskRequest>,
    ) -> Result<Response<ReduceTaskResponse>, Status> {
        let request = request.into_inner();
        info!("reduce task: {} shard file(s)", request.input_shards.len());

        let inputs: Vec<PathBuf> = request.input_shards.into_iter().map(PathBuf::from).collect();
        let output = PathBuf::from(request.output_file);
        run_task(move || reduce::run_reduce_task(&inputs, &output)).await?;

        Ok(Response::new(ReduceTaskResponse {}))
    }
}

/// Run a blocking task off the async runtime and translate its error for
/// the wire.
async fn run_task<F>(task: F) -> Result<(), Status>
where
    F: FnOnce() -> Result<(), JobError> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("task failed: {e}");
            Err(Status::internal(e.to_string()))
        }
        Err(e) => Err(Status::internal(format!("task aborted: {e}"))),
    }
}
