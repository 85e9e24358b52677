//! # Gradekeeper - Student Records with a Concurrent Batch Report Engine
//!
//! A fast student-records tool written in pure Rust. Gradekeeper keeps an
//! eviction-managed access cache in front of the record stores and fans bulk
//! report generation out across a bounded worker pool with live progress.
//!
//! ## Features
//!
//! - **Batch report engine**: one worker unit per record, per-unit success and
//!   failure tracking, bounded waits, wall-clock timing
//! - **Access cache**: frequency-based eviction with recency tie-break,
//!   staleness sweeps and warm pre-loading
//! - **Multi-format export**: CSV, JSON and binary reports per record
//! - **Live progress**: background sampling with change-only rendering
//!
//! ## Quick Start
//!
//! ```bash
//! # Install gradekeeper
//! cargo install gradekeeper
//!
//! # Generate reports for every record with four workers
//! gradekeeper report -j 4
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod export;
pub mod report;
pub mod store;

pub use cli::{Cli, Output};
pub use config::GradekeeperConfig;

/// Result type alias for gradekeeper operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
