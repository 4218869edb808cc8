use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pcap_exporter::config::{self, Config};
use pcap_exporter::metrics::Registry;
use pcap_exporter::server;
use pcap_exporter::sniff::{self, CaptureOptions, CaptureTarget};

#[derive(Parser)]
#[command(name = "pcap-exporter")]
#[command(about = "Per-direction, per-remote, per-application traffic counters", long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Interface to capture on (default: first up, broadcast capable interface)
    #[arg(long, short = 'i', value_name = "IFACE")]
    interface: Option<String>,
    /// Capture filter expression; pass an empty string to disable
    #[arg(long, value_name = "EXPR")]
    filter: Option<String>,
    /// Address the metrics endpoint listens on
    #[arg(long, value_name = "HOST")]
    listen_address: Option<String>,
    /// Port the metrics endpoint listens on
    #[arg(long, short = 'p')]
    port: Option<u16>,
    /// Read packets from a pcap savefile instead of a live interface
    #[arg(long, value_name = "PATH", conflicts_with = "interface")]
    pcap_file: Option<PathBuf>,
    /// Extra address to treat as local (repeatable)
    #[arg(long = "local-address", value_name = "IP")]
    local_addresses: Vec<IpAddr>,
}

impl Cli {
    fn apply(self, config: &mut Config) -> CaptureTarget {
        if let Some(interface) = self.interface {
            config.interface = Some(interface);
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(listen_address) = self.listen_address {
            config.listen_address = listen_address;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.local_addresses.extend(self.local_addresses);

        match self.pcap_file {
            Some(path) => CaptureTarget::File(path),
            None => CaptureTarget::Interface(config.interface.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut cli = Cli::parse();
    let path = config::config_path(cli.config.take());
    let mut cfg = match Config::load(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, path = %path.display(), "failed to read config");
            return Err(e.into());
        }
    };
    let target = cli.apply(&mut cfg);
    info!(
        listen = %cfg.listen_addr(),
        filter = %cfg.filter,
        ip_names = cfg.ip_names.len(),
        local_services = cfg.local_filters.len(),
        remote_services = cfg.remote_filters.len(),
        "starting server"
    );

    let registry = Arc::new(Registry::new());

    let opts = CaptureOptions {
        target,
        filter: cfg.filter.clone(),
        extra_local_addresses: cfg.local_addresses.clone(),
    };
    let names = cfg.name_tables();
    let capture_registry = registry.clone();
    // detached: the capture thread ends with its source or with the process
    thread::Builder::new()
        .name("capture".into())
        .spawn(move || sniff::capture_and_log(opts, names, &capture_registry))?;

    let listener = match server::bind(&cfg.listen_addr()) {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, listen = %cfg.listen_addr(), "failed to listen");
            return Err(e.into());
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
        info!("shutting down");
    };

    if let Err(e) = server::serve(listener, registry, shutdown).await {
        error!(error = %e, "stopped server");
        return Err(e.into());
    }
    Ok(())
}
