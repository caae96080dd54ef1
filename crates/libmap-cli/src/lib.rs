//! Library components behind the `libmap` binary: run configuration,
//! logging setup and the end-to-end pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
