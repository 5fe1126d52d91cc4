//
// Import gRPC stubs/definitions.
//
use coordinator::coordinator_client::CoordinatorClient;
use coordinator::{JobConfig, RunJobRequest};
pub mod coordinator {
    tonic::include_proto!("coordinator");
}

use std::path::Path;

use anyhow::Context;

use common::Config;

/// Submit a word count job and print where the results landed.
pub async fn submit(
    endpoint: &str,
    config_path: &Path,
    input_files: Vec<String>,
) -> anyhow::Result<()> {
    let config = Config::from_file(config_path)?;

    let mut client = CoordinatorClient::connect(endpoint.to_owned())
        .await
        .with_context(|| format!("failed to connect to coordinator at {endpoint}"))?;

    let request = tonic::Request::new(RunJobRequest {
        input_files,
        config: Some(JobConfig {
            mappers: config.mappers,
            reducers: config.reducers,
            output_dir: config.output_dir,
        }),
    });
    let response = client
        .run_job(request)
        .await
        .map_err(|status| anyhow::anyhow!("job failed: {}", status.message()))?;

    println!("[Results]");
    for path in response.into_inner().output_files {
        println!("{path}");
    }

    Ok(())
}
