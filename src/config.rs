//! Exporter configuration
//!
//! Loaded from a YAML file, then overridden by environment variables and
//! finally by command line flags (see `main.rs`).

use std::collections::HashMap;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/pcap-exporter/config.yml";
pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9250;
pub const DEFAULT_FILTER: &str = "ip or ip6";

pub const ENV_HOST: &str = "PCAP_METRICS_HOST";
// Spelling accepted by earlier releases
pub const ENV_HOST_LEGACY: &str = "PCAP_METICS_HOST";
pub const ENV_PORT: &str = "PCAP_METRICS_PORT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_address: String,
    pub port: u16,
    /// Capture interface, auto-detected when unset
    pub interface: Option<String>,
    /// Capture filter expression, empty disables filtering
    pub filter: String,
    /// Remote IP -> friendly name
    pub ip_names: HashMap<String, String>,
    /// Local port -> service name
    pub local_filters: HashMap<u16, String>,
    /// Remote port -> service name
    pub remote_filters: HashMap<u16, String>,
    /// Extra addresses treated as local on top of the interface's own
    pub local_addresses: Vec<IpAddr>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            interface: None,
            filter: DEFAULT_FILTER.to_string(),
            ip_names: HashMap::new(),
            local_filters: HashMap::new(),
            remote_filters: HashMap::new(),
            local_addresses: Vec::new(),
        }
    }
}

impl Config {
    /// Read the YAML file at `path` and apply process environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // an empty file means all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Override listen address and port from variables resolved by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).or_else(|| lookup(ENV_HOST_LEGACY)) {
            self.listen_address = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| Error::InvalidConfig {
                name: ENV_PORT.to_string(),
                reason: format!("'{}' is not a valid port", port),
            })?;
        }
        Ok(())
    }

    /// `host:port` the metrics endpoint binds to
    pub fn listen_addr(&self) -> String {
        if self.listen_address.contains(':') && !self.listen_address.starts_with('[') {
            format!("[{}]:{}", self.listen_address, self.port)
        } else {
            format!("{}:{}", self.listen_address, self.port)
        }
    }

    pub fn name_tables(&self) -> NameTables {
        NameTables::new(
            self.ip_names.clone(),
            self.local_filters.clone(),
            self.remote_filters.clone(),
        )
    }
}

/// Immutable lookup tables consulted by the classifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTables {
    remote_names: HashMap<String, String>,
    local_services: HashMap<u16, String>,
    remote_services: HashMap<u16, String>,
}

impl NameTables {
    pub fn new(
        remote_names: HashMap<String, String>,
        local_services: HashMap<u16, String>,
        remote_services: HashMap<u16, String>,
    ) -> Self {
        // "2001:DB8::0001" must match the "2001:db8::1" the classifier prints
        let remote_names = remote_names
            .into_iter()
            .map(|(ip, name)| match ip.trim().parse::<IpAddr>() {
                Ok(addr) => (addr.to_string(), name),
                Err(_) => (ip, name),
            })
            .collect();
        Self {
            remote_names,
            local_services,
            remote_services,
        }
    }

    pub fn remote_name(&self, ip: &str) -> Option<&str> {
        self.remote_names.get(ip).map(String::as_str)
    }

    pub fn local_service(&self, port: u16) -> Option<&str> {
        self.local_services.get(&port).map(String::as_str)
    }

    pub fn remote_service(&self, port: u16) -> Option<&str> {
        self.remote_services.get(&port).map(String::as_str)
    }
}

/// Config file path: first positional argument, else the system default.
pub fn config_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
