//! Worker side of the word count cluster: a stateless gRPC service that
//! executes map and reduce tasks against the local filesystem.

pub mod core;
pub mod map;
pub mod reduce;
