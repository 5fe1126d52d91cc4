//! End-to-end tests over real gRPC: worker services are served from
//! in-process listeners on ephemeral ports and the job runner talks to
//! them through the production transport.

use std::collections::HashMap;
use std::fs;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use common::{Config, JobError, TaskKind};
use wc_coordinator::job::JobRunner;
use wc_coordinator::transport::GrpcTransport;
use wc_worker::core::{WordCountWorker, WorkerServer};

/// Serve a worker on an ephemeral local port and return its endpoint URL.
async fn spawn_worker() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        Server::builder()
            .add_service(WorkerServer::new(WordCountWorker::default()))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    format!("http://{addr}")
}

#[tokio::test]
async fn runs_a_job_against_live_workers() {
    let workers = vec![spawn_worker().await, spawn_worker().await];

    let root = tempfile::tempdir().unwrap();
    let scratch = root.path().join("scratch");
    let output_dir = root.path().join("out");
    fs::create_dir(&scratch).unwrap();
    fs::create_dir(&output_dir).unwrap();

    let first = root.path().join("a.txt");
    let second = root.path().join("b.txt");
    fs::write(&first, "the quick brown fox\njumps over the lazy dog").unwrap();
    fs::write(&second, "The DOG barks; the fox runs.").unwrap();
    let files = vec![first.display().to_string(), second.display().to_string()];

    let config = Config {
        mappers: workers.clone(),
        reducers: workers.clone(),
        output_dir: output_dir.display().to_string(),
    };
    let runner = JobRunner::new(GrpcTransport, &scratch);

    let outputs = runner.run(&files, &config).await.unwrap();
    assert_eq!(outputs.len(), 2);

    let mut counts: HashMap<String, u64> = HashMap::new();
    for path in &outputs {
        for line in fs::read_to_string(path).unwrap().lines() {
            let (word, count) = line.split_once(' ').unwrap();
            *counts.entry(word.to_owned()).or_insert(0) += count.parse::<u64>().unwrap();
        }
    }
    assert_eq!(counts.get("the"), Some(&4));
    assert_eq!(counts.get("fox"), Some(&2));
    assert_eq!(counts.get("dog"), Some(&2));
    assert_eq!(counts.get("barks"), Some(&1));
    assert_eq!(counts.values().sum::<u64>(), 15);

    // Scratch space is empty once the job has reported.
    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
}

#[tokio::test]
async fn remote_map_failure_surfaces_as_a_task_error() {
    let worker = spawn_worker().await;

    let root = tempfile::tempdir().unwrap();
    let scratch = root.path().join("scratch");
    let output_dir = root.path().join("out");
    fs::create_dir(&scratch).unwrap();
    fs::create_dir(&output_dir).unwrap();

    let files = vec![root.path().join("missing.txt").display().to_string()];
    let config = Config {
        mappers: vec![worker.clone()],
        reducers: vec![worker],
        output_dir: output_dir.display().to_string(),
    };
    let runner = JobRunner::new(GrpcTransport, &scratch);

    let err = runner.run(&files, &config).await.unwrap_err();

    match err {
        JobError::RemoteTask { task, message, .. } => {
            assert_eq!(task, TaskKind::Map);
            assert!(message.contains("read"), "unexpected message: {message}");
        }
        other => panic!("expected a remote task error, got {other:?}"),
    }
    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
}

#[tokio::test]
async fn dead_endpoint_fails_the_connect_phase() {
    let live = spawn_worker().await;

    // An ephemeral port that nothing listens on.
    let dead = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let root = tempfile::tempdir().unwrap();
    let scratch = root.path().join("scratch");
    fs::create_dir(&scratch).unwrap();

    let input = root.path().join("a.txt");
    fs::write(&input, "hello").unwrap();

    let config = Config {
        mappers: vec![live],
        reducers: vec![dead.clone()],
        output_dir: root.path().display().to_string(),
    };
    let runner = JobRunner::new(GrpcTransport, &scratch);

    let err = runner
        .run(&[input.display().to_string()], &config)
        .await
        .unwrap_err();

    assert!(matches!(err, JobError::Connection { ref addr, .. } if *addr == dead));
    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
}
