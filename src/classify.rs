//! Frame classification
//!
//! Turns a decoded frame into the `(direction, remote, app, layers)` key the
//! counters are indexed by. Classification is a pure fold over the frame's
//! layers and never fails.

use std::net::IpAddr;

use crate::config::NameTables;
use crate::models::{CapturedFrame, ClassificationKey, Direction, Layer};
use crate::sniff::LocalAddressSet;

pub const UNKNOWN_APP: &str = "unknown";
pub const TCP_CONTROL_APP: &str = "TCP control";

pub struct Classifier {
    local: LocalAddressSet,
    names: NameTables,
}

impl Classifier {
    pub fn new(local: LocalAddressSet, names: NameTables) -> Self {
        Self { local, names }
    }

    pub fn local_addresses(&self) -> &LocalAddressSet {
        &self.local
    }

    pub fn classify(&self, frame: &CapturedFrame) -> ClassificationKey {
        let walk = frame
            .layers
            .iter()
            .fold(Walk::default(), |walk, layer| walk.step(layer, &self.local));

        let remote_ip = walk.remote_ip.map(|ip| ip.to_string()).unwrap_or_default();
        let remote = match self.names.remote_name(&remote_ip) {
            Some(name) => name.to_string(),
            None => remote_ip,
        };

        let (app, resolved) = match self.service_name(walk.local_port, walk.remote_port) {
            Some(name) => (name, true),
            None if walk.local_port == 0 => (UNKNOWN_APP.to_string(), false),
            None if matches!(frame.layers.last(), Some(Layer::Tcp { .. })) => {
                (TCP_CONTROL_APP.to_string(), false)
            }
            None => (format!("{}/{}", walk.local_port, walk.remote_port), false),
        };

        // A named application says more than the stack it rode on, and keeping
        // both multiplies series per distinct stack.
        let layers = if resolved {
            String::new()
        } else {
            frame.layer_path()
        };

        ClassificationKey {
            direction: walk.direction,
            remote,
            app,
            layers,
        }
    }

    /// Service-table lookup, `local/remote` when both sides are known.
    fn service_name(&self, local_port: u16, remote_port: u16) -> Option<String> {
        if local_port == 0 {
            return None;
        }
        match (
            self.names.local_service(local_port),
            self.names.remote_service(remote_port),
        ) {
            (Some(local), Some(remote)) => Some(format!("{}/{}", local, remote)),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Default)]
struct Walk {
    direction: Direction,
    remote_ip: Option<IpAddr>,
    local_port: u16,
    remote_port: u16,
}

impl Walk {
    fn step(mut self, layer: &Layer, local: &LocalAddressSet) -> Self {
        match *layer {
            Layer::Ipv4 {
                source,
                destination,
            } => self.ip(source.into(), destination.into(), local),
            Layer::Ipv6 {
                source,
                destination,
            } => self.ip(source.into(), destination.into(), local),
            Layer::Tcp {
                source_port,
                destination_port,
            }
            | Layer::Udp {
                source_port,
                destination_port,
            } => match self.direction {
                Direction::In => {
                    self.remote_port = source_port;
                    self.local_port = destination_port;
                }
                Direction::Out => {
                    self.remote_port = destination_port;
                    self.local_port = source_port;
                }
            },
            _ => {}
        }
        self
    }

    // the innermost IP header seen so far wins
    fn ip(&mut self, source: IpAddr, destination: IpAddr, local: &LocalAddressSet) {
        if local.contains(&source) {
            self.direction = Direction::Out;
            self.remote_ip = Some(destination);
        } else {
            self.direction = Direction::In;
            self.remote_ip = Some(source);
        }
    }
}
