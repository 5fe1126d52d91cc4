use std::fs;
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;
use tracing::info;
use uuid::Uuid;

use common::{Config, JobError, TaskKind};

use crate::partition;
use crate::storage::{self, IntermediateGrid};
use crate::transport::{WorkerConnection, WorkerTransport};

/// Runs one job end to end against a pool of remote workers.
///
/// The runner is single-threaded orchestration: it fans work out to the
/// pool and blocks on a per-phase barrier. The first error observed in any
/// step aborts the whole job; in-flight calls are left to finish but their
/// results are discarded, and no task is ever retried.
pub struct JobRunner<T> {
    transport: T,
    scratch_dir: PathBuf,
}

impl<T: WorkerTransport> JobRunner<T> {
    pub fn new(transport: T, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Run the full two-phase pipeline and return the output file paths.
    pub async fn run(
        &self,
        input_files: &[String],
        config: &Config,
    ) -> Result<Vec<String>, JobError> {
        let num_shards = config.reducers.len();

        // Every endpoint is dialed before any work is dispatched; a dead
        // worker fails the job while the filesystem is still untouched.
        let mapper_conns = self.connect_all(&config.mappers).await?;
        let reducer_conns = self.connect_all(&config.reducers).await?;

        let ranges = partition::ranges(input_files.len(), mapper_conns.len());
        info!(
            "starting job: {} input file(s), {} active mapper(s), {} reducer(s)",
            input_files.len(),
            ranges.len(),
            num_shards
        );

        let job_dir = self.scratch_dir.join(format!("wc-job-{}", Uuid::new_v4()));
        fs::create_dir_all(&job_dir).map_err(|e| JobError::storage("create", &job_dir, e))?;

        let grid = match storage::allocate_intermediates(&job_dir, ranges.len(), num_shards) {
            Ok(grid) => grid,
            Err(e) => {
                let _ = fs::remove_dir(&job_dir);
                return Err(e);
            }
        };

        // Map phase: each active mapper gets its file range and its row of
        // the grid. Surplus mapper connections stay idle but open.
        let mut calls = JoinSet::new();
        for (row, range) in ranges.iter().enumerate() {
            let mut conn = mapper_conns[row].clone();
            let inputs = input_files[range.clone()].to_vec();
            let shards = as_strings(grid.row(row));
            calls.spawn(async move { conn.run_map(inputs, shards).await });
        }
        if let Err(e) = barrier(TaskKind::Map, calls).await {
            discard(&grid, &job_dir);
            return Err(e);
        }
        info!("map phase complete");

        let outputs = match storage::allocate_outputs(Path::new(&config.output_dir), num_shards) {
            Ok(outputs) => outputs,
            Err(e) => {
                discard(&grid, &job_dir);
                return Err(e);
            }
        };

        // Reduce phase: reducer `shard` merges its column of the grid.
        let mut calls = JoinSet::new();
        for (shard, reducer) in reducer_conns.iter().enumerate() {
            let mut conn = reducer.clone();
            let column = as_strings(&grid.column(shard));
            let output = outputs[shard].display().to_string();
            calls.spawn(async move { conn.run_reduce(column, output).await });
        }
        if let Err(e) = barrier(TaskKind::Reduce, calls).await {
            discard(&grid, &job_dir);
            return Err(e);
        }
        info!("reduce phase complete");

        // On success a cleanup failure is the only error left to report.
        storage::release(&grid)?;
        let _ = fs::remove_dir(&job_dir);

        Ok(outputs.iter().map(|path| path.display().to_string()).collect())
    }

    async fn connect_all(&self, addrs: &[String]) -> Result<Vec<T::Conn>, JobError> {
        let mut conns = Vec::with_capacity(addrs.len());
        for addr in addrs {
            conns.push(self.transport.connect(addr).await?);
        }
        Ok(conns)
    }
}

/// Best-effort cleanup on an abort path. The error that got us here takes
/// precedence, so cleanup failures are swallowed.
fn discard(grid: &IntermediateGrid, job_dir: &Path) {
    let _ = storage::release(grid);
    let _ = fs::remove_dir(job_dir);
}

fn as_strings(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|path| path.display().to_string()).collect()
}

/// Phase barrier: wait until every dispatched call has reported, keeping
/// only the first error. Later calls still run to completion; nothing is
/// cancelled and nothing is retried.
async fn barrier(phase: TaskKind, mut calls: JoinSet<Result<(), JobError>>) -> Result<(), JobError> {
    let mut first_error = None;
    while let Some(joined) = calls.join_next().await {
        let result = joined.unwrap_or_else(|e| {
            Err(JobError::RemoteTask {
                task: phase,
                addr: "<local>".to_owned(),
                message: format!("dispatched call aborted: {e}"),
            })
        });
        if let Err(e) = result {
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
