//
// Import gRPC stubs/definitions.
//
pub use coordinator::coordinator_server::{Coordinator, CoordinatorServer};
pub use coordinator::{JobConfig, RunJobRequest, RunJobResponse};
pub mod coordinator {
    tonic::include_proto!("coordinator");
}

pub mod worker {
    tonic::include_proto!("worker");
}

use std::path::PathBuf;

use tonic::{Request, Response, Status};
use tracing::{error, info};

use common::{Config, JobError};

use crate::job::JobRunner;
use crate::transport::GrpcTransport;

/// gRPC surface of the coordinator process.
pub struct WordCountCoordinator {
    scratch_dir: PathBuf,
}

impl WordCountCoordinator {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
        }
    }
}

#[tonic::async_trait]
impl Coordinator for WordCountCoordinator {
    async fn run_job(
        &self,
        request: Request<RunJobRequest>,
    ) -> Result<Response<RunJobResponse>, Status> {
        let request = request.into_inner();
        let config = request
            .config
            .ok_or_else(|| Status::invalid_argument("missing job configuration"))?;
        let config = Config {
            mappers: config.mappers,
            reducers: config.reducers,
            output_dir: config.output_dir,
        };
        config
            .validate()
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        info!(
            "job accepted: {} input file(s), {} mapper(s), {} reducer(s)",
            request.input_files.len(),
            config.mappers.len(),
            config.reducers.len()
        );

        let runner = JobRunner::new(GrpcTransport, self.scratch_dir.clone());
        match runner.run(&request.input_files, &config).await {
            Ok(output_files) => Ok(Response::new(RunJobResponse { output_files })),
            Err(e) => {
                error!("job failed: {e}");
                Err(to_status(e))
            }
        }
    }
}

/// Map the first job failure onto a wire status.
fn to_status(err: JobError) -> Status {
    let message = err.to_string();
    match err {
        JobError::Connection { .. } => Status::unavailable(message),
        JobError::Storage { .. } | JobError::Io { .. } => Status::internal(message),
        JobError::RemoteTask { .. } => Status::aborted(message),
    }
}
