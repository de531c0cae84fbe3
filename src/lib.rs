//
// lib.rs
// diffcount
//
// Library entry that re-exports modules so the binary and any external users can access CLI parsing, byte sources, the comparison engine, and reporting.
//
// Thales Matheus Mendonça Santos - November 2025
//
pub mod cli;
pub mod diff;
pub mod error;
pub mod report;
pub mod source;
pub mod utils;

pub use cli::{build_options, Args, Operand, Options, ReportMode};
pub use diff::{
    diff_chunk, run_diffcount, ChunkDiff, CompareRequest, CompareResult, StreamComparator,
    BUFFER_CAPACITY,
};
pub use error::{DiffcountError, Result};
pub use source::{ByteSource, ConstantSource, FileSource};
