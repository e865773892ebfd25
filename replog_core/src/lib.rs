#![forbid(unsafe_code)]

//! Core domain model and business logic for the replog workout logger.
//!
//! This crate provides:
//! - Domain types (entries, session records, persistence policies)
//! - Session persistence (append-only log and latest-slot backends)
//! - One-rep-max estimation and progressive overload analysis
//! - Rest timer with injectable interrupt strategy
//! - Built-in workout plan and CSV export
//! - Interactive session orchestration

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod input;
pub mod metrics;
pub mod overload;
pub mod timer;
pub mod plan;
pub mod export;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{EntryStore, JsonlStore, LatestSlotStore, SessionStore};
pub use input::{FeedInterrupt, LineFeed};
pub use metrics::estimate_one_rep_max;
pub use overload::{compare, OverloadReport};
pub use timer::{InterruptSource, NeverInterrupt, RestTimer, TimerOutcome};
pub use plan::{build_default_plan, get_default_plan};
pub use export::export_csv;
pub use session::{RestBehavior, SessionController};
