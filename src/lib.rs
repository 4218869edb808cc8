//! Passive traffic exporter.
//!
//! Captured frames are decoded into layer stacks, classified into
//! `(direction, remote, app, layers)` keys and counted; the counters are served
//! in Prometheus text format.

pub mod classify;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod server;
pub mod sniff;

pub use classify::Classifier;
pub use config::{Config, NameTables};
pub use error::{Error, Result};
pub use metrics::Registry;
pub use models::{CapturedFrame, ClassificationKey, Direction, Layer};
pub use sniff::{FrameSource, LocalAddressSet};
