use async_trait::async_trait;
use tonic::transport::Channel;

use common::{JobError, TaskKind};

use crate::core::worker::worker_client::WorkerClient;
use crate::core::worker::{MapTaskRequest, ReduceTaskRequest};

/// Dials worker endpoints on behalf of the job runner.
///
/// The runner never talks to tonic directly: it asks the transport for one
/// connection per configured endpoint and issues the two worker calls
/// through it. Tests substitute an in-process implementation.
#[async_trait]
pub trait WorkerTransport: Send + Sync {
    type Conn: WorkerConnection;

    /// Establish a connection to a worker endpoint.
    async fn connect(&self, addr: &str) -> Result<Self::Conn, JobError>;
}

/// One established worker connection.
///
/// Connections are cheap to clone so that a call can be moved onto a
/// spawned task; dropping the last clone closes the underlying channel.
#[async_trait]
pub trait WorkerConnection: Clone + Send + Sync + 'static {
    async fn run_map(
        &mut self,
        input_files: Vec<String>,
        output_shards: Vec<String>,
    ) -> Result<(), JobError>;

    async fn run_reduce(
        &mut self,
        input_shards: Vec<String>,
        output_file: String,
    ) -> Result<(), JobError>;
}

/// Production transport over the generated tonic worker client.
#[derive(Debug, Default)]
pub struct GrpcTransport;

#[derive(Clone)]
pub struct GrpcConnection {
    addr: String,
    client: WorkerClient<Channel>,
}

#[async_trait]
impl WorkerTransport for GrpcTransport {
    type Conn = GrpcConnection;

    async fn connect(&self, addr: &str) -> Result<GrpcConnection, JobError> {
        let client = WorkerClient::connect(addr.to_owned())
            .await
            .map_err(|e| JobError::Connection {
                addr: addr.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(GrpcConnection {
            addr: addr.to_owned(),
            client,
        })
    }
}

#[async_trait]
impl WorkerConnection for GrpcConnection {
    async fn run_map(
        &mut self,
        input_files: Vec<String>,
        output_shards: Vec<String>,
    ) -> Result<(), JobError> {
        let request = tonic::Request::new(MapTaskRequest {
            input_files,
            output_shards,
        });
        self.client
            .map(request)
            .await
            .map_err(|status| JobError::RemoteTask {
                task: TaskKind::Map,
                addr: self.addr.clone(),
                message: status.message().to_owned(),
            })?;
        Ok(())
    }

    async fn run_reduce(
        &mut self,
        input_shards: Vec<String>,
        output_file: String,
    ) -> Result<(), JobError> {
        let request = tonic::Request::new(ReduceTaskRequest {
            input_shards,
            output_file,
        });
        self.client
            .reduce(request)
            .await
            .map_err(|status| JobError::RemoteTask {
                task: TaskKind::Reduce,
                addr: self.addr.clone(),
                message: status.message().to_owned(),
            })?;
        Ok(())
    }
}
