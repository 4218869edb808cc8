use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// One decoded protocol header, in the order it appeared on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ethernet,
    LinuxSll,
    Loopback,
    Dot1Q,
    Arp,
    Ipv4 {
        source: Ipv4Addr,
        destination: Ipv4Addr,
    },
    Ipv6 {
        source: Ipv6Addr,
        destination: Ipv6Addr,
    },
    Ipv6HopByHop,
    Ipv6Routing,
    Ipv6Fragment,
    Ipv6Destination,
    Tcp {
        source_port: u16,
        destination_port: u16,
    },
    Udp {
        source_port: u16,
        destination_port: u16,
    },
    Icmpv4,
    Icmpv6,
    Vxlan,
    /// Body of a fragmented IP datagram; nothing inside it is decoded
    Fragment,
    /// Bytes past the last header we know how to decode
    Payload,
}

impl Layer {
    /// Name used when building the layer path label
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Ethernet => "Ethernet",
            Layer::LinuxSll => "Linux SLL",
            Layer::Loopback => "Loopback",
            Layer::Dot1Q => "Dot1Q",
            Layer::Arp => "ARP",
            Layer::Ipv4 { .. } => "IPv4",
            Layer::Ipv6 { .. } => "IPv6",
            Layer::Ipv6HopByHop => "IPv6HopByHop",
            Layer::Ipv6Routing => "IPv6Routing",
            Layer::Ipv6Fragment => "IPv6Fragment",
            Layer::Ipv6Destination => "IPv6Destination",
            Layer::Tcp { .. } => "TCP",
            Layer::Udp { .. } => "UDP",
            Layer::Icmpv4 => "ICMPv4",
            Layer::Icmpv6 => "ICMPv6",
            Layer::Vxlan => "VXLAN",
            Layer::Fragment => "Fragment",
            Layer::Payload => "Payload",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A captured packet reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub layers: Vec<Layer>,
    /// Captured byte length
    pub length: usize,
}

impl CapturedFrame {
    pub fn new(layers: Vec<Layer>, length: usize) -> Self {
        Self { layers, length }
    }

    /// `/Ethernet/IPv4/TCP` style rendering of the full stack
    pub fn layer_path(&self) -> String {
        self.layers.iter().map(|layer| format!("/{}", layer)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    #[default]
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation key shared by the packet and byte counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassificationKey {
    pub direction: Direction,
    pub remote: String,
    pub app: String,
    pub layers: String,
}

impl ClassificationKey {
    pub fn new(
        direction: Direction,
        remote: impl Into<String>,
        app: impl Into<String>,
        layers: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            remote: remote.into(),
            app: app.into(),
            layers: layers.into(),
        }
    }
}

impl fmt::Display for ClassificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} remote:{} app:{} layers:{}",
            self.direction, self.remote, self.app, self.layers
        )
    }
}
