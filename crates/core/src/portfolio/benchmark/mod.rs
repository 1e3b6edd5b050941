//! Index-relative performance.

mod benchmark_model;
mod benchmark_service;


pub use benchmark_model::BenchmarkComparison;
pub use benchmark_service::{compare_to_benchmark, index_return_pct, BenchmarkService};
