//! Coordinator side of the word count cluster.
//!
//! `RunJob` drives the whole pipeline: split the input files across the
//! mapper pool, fan the map tasks out, wait on the phase barrier, hand
//! each reducer its column of intermediate files, fan the reduce tasks
//! out, wait again, then clean up and report the output locations.

pub mod core;
pub mod job;
pub mod partition;
pub mod storage;
pub mod transport;
