//! Error types
//!
//! Inspecting a value never fails: anything that cannot be shown is rendered
//! as a marker instead. The only failure is writing the finished dump to its
//! sink.

use thiserror::Error;

/// Errors that can occur while writing a dump
#[derive(Debug, Error)]
pub enum DumpError {
    /// The sink rejected the output
    #[error("failed to write dump output: {0}")]
    Io(#[from] std::io::Error),
}
