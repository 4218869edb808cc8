//! Error types for the exporter

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for exporter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure that can stop a subsystem.
///
/// None of these are retried. The capture path and the metrics server each
/// stop on their own errors without taking the other one down.
#[derive(Error, Debug)]
pub enum Error {
    /// No interface was given and none is up, broadcast capable and has a
    /// hardware address
    #[error("couldn't find a network interface to listen on")]
    NoSuitableInterface,

    /// Capture device enumeration failed
    #[error("couldn't list pcap devices: {0}")]
    DeviceList(#[source] pcap::Error),

    /// Interface not present among the capture devices
    #[error("capture device '{0}' not found")]
    DeviceNotFound(String),

    /// Opening a live capture or a savefile failed
    #[error("failed to open capture '{target}': {source}")]
    CaptureOpen {
        target: String,
        #[source]
        source: pcap::Error,
    },

    /// Filter expression did not compile
    #[error("failed to parse filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: pcap::Error,
    },

    /// Reading the next frame failed mid-stream
    #[error("packet capture error: {0}")]
    Capture(#[source] pcap::Error),

    /// Config file could not be read
    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the expected shape
    #[error("failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A single configuration value is invalid
    #[error("invalid config value '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// The HTTP server failed to start or stopped with an error
    #[error("metrics server error: {0}")]
    Server(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Network I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
