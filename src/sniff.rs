// src/sniff.rs
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::PathBuf;

use pcap::{Activated, Capture, Device};
use pnet_datalink::{MacAddr, NetworkInterface};
use tracing::{debug, error, info, warn};

use crate::classify::Classifier;
use crate::config::NameTables;
use crate::error::{Error, Result};
use crate::metrics::Registry;
use crate::models::CapturedFrame;
use crate::parser::{decode_frame, LinkType};

/// Snapshot length for live captures; large enough for any frame.
pub const SNAPSHOT_LEN: i32 = 65535;

/// Addresses that mark a frame's IP source as "us".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalAddressSet {
    addrs: HashSet<IpAddr>,
}

impl LocalAddressSet {
    pub fn new(addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        Self {
            addrs: addrs.into_iter().map(|ip| ip.to_canonical()).collect(),
        }
    }

    /// Membership by canonical form: `::ffff:10.0.0.5` matches `10.0.0.5`.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.addrs.contains(&ip.to_canonical())
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }
}

/// Where a capture reads its frames from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// Live interface, auto-detected when `None`
    Interface(Option<String>),
    /// pcap savefile
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub target: CaptureTarget,
    /// Capture filter, empty for none
    pub filter: String,
    /// Added to whatever the interface reports
    pub extra_local_addresses: Vec<IpAddr>,
}

/// A blocking stream of decoded frames.
pub trait FrameSource {
    /// Next frame in arrival order, `None` once the stream has ended.
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>>;
}

/// Frames from a live or offline pcap handle.
pub struct PcapSource<T: Activated + ?Sized> {
    capture: Capture<T>,
    link: LinkType,
}

impl<T: Activated + ?Sized> PcapSource<T> {
    pub fn new(capture: Capture<T>) -> Self {
        let link = LinkType::from(capture.get_datalink());
        if let LinkType::Unsupported(dlt) = link {
            warn!(linktype = dlt, "unsupported link type, frames will carry no layers");
        }
        Self { capture, link }
    }
}

impl<T: Activated + ?Sized> FrameSource for PcapSource<T> {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>> {
        loop {
            match self.capture.next_packet() {
                Ok(packet) => return Ok(Some(decode_frame(self.link, packet.data))),
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(pcap::Error::NoMorePackets) => return Ok(None),
                Err(e) => return Err(Error::Capture(e)),
            }
        }
    }
}

/// First interface that is up, broadcast capable and has a hardware address.
pub fn default_interface(interfaces: &[NetworkInterface]) -> Option<&NetworkInterface> {
    interfaces.iter().find(|iface| {
        iface.is_up()
            && iface.is_broadcast()
            && matches!(iface.mac, Some(mac) if mac != MacAddr::zero())
    })
}

/// Requested interface name, or the auto-detected one.
pub fn resolve_interface(requested: Option<&str>) -> Result<String> {
    match requested {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => default_interface(&pnet_datalink::interfaces())
            .map(|iface| iface.name.clone())
            .ok_or(Error::NoSuitableInterface),
    }
}

/// Addresses bound to `name` according to the capture device list.
pub fn device_addresses(devices: &[Device], name: &str) -> Result<Vec<IpAddr>> {
    devices
        .iter()
        .find(|device| device.name == name)
        .map(|device| device.addresses.iter().map(|a| a.addr).collect())
        .ok_or_else(|| Error::DeviceNotFound(name.to_string()))
}

fn apply_filter<T: Activated + ?Sized>(capture: &mut Capture<T>, filter: &str) -> Result<()> {
    if filter.is_empty() {
        return Ok(());
    }
    capture.filter(filter, true).map_err(|source| Error::Filter {
        filter: filter.to_string(),
        source,
    })?;
    debug!(filter = %filter, "capture filter applied");
    Ok(())
}

/// Open a non-promiscuous live capture on `iface`.
pub fn open_live(iface: &str, filter: &str) -> Result<PcapSource<pcap::Active>> {
    let open_err = |source: pcap::Error| Error::CaptureOpen {
        target: iface.to_string(),
        source,
    };
    let mut cap = Capture::from_device(iface)
        .map_err(open_err)?
        .promisc(false)
        .snaplen(SNAPSHOT_LEN)
        .open()
        .map_err(open_err)?;
    apply_filter(&mut cap, filter)?;
    Ok(PcapSource::new(cap))
}

pub fn open_file(path: &std::path::Path, filter: &str) -> Result<PcapSource<pcap::Offline>> {
    let mut cap = Capture::from_file(path).map_err(|source| Error::CaptureOpen {
        target: path.display().to_string(),
        source,
    })?;
    apply_filter(&mut cap, filter)?;
    Ok(PcapSource::new(cap))
}

/// Classify and count every frame `source` yields, in order, until it ends.
///
/// Returns the number of frames processed.
pub fn run_capture_loop<S: FrameSource + ?Sized>(
    source: &mut S,
    classifier: &Classifier,
    registry: &Registry,
) -> Result<u64> {
    let mut processed = 0u64;
    while let Some(frame) = source.next_frame()? {
        let key = classifier.classify(&frame);
        registry.observe(key, frame.length as u64);
        processed += 1;
    }
    Ok(processed)
}

/// Resolve the capture target, build the classifier and run the loop.
///
/// Blocks for the lifetime of the capture, so call it from a dedicated thread.
pub fn start_sniffing(opts: CaptureOptions, names: NameTables, registry: &Registry) -> Result<u64> {
    match opts.target {
        CaptureTarget::Interface(requested) => {
            let iface = resolve_interface(requested.as_deref())?;
            info!(interface = %iface, "capturing packets");

            let devices = Device::list().map_err(Error::DeviceList)?;
            let mut local = device_addresses(&devices, &iface)?;
            local.extend(opts.extra_local_addresses);
            let classifier = Classifier::new(LocalAddressSet::new(local), names);
            debug!(
                local_addresses = classifier.local_addresses().len(),
                "local address set built"
            );

            let mut source = open_live(&iface, &opts.filter)?;
            run_capture_loop(&mut source, &classifier, registry)
        }
        CaptureTarget::File(path) => {
            info!(file = %path.display(), "reading packets from savefile");
            let classifier =
                Classifier::new(LocalAddressSet::new(opts.extra_local_addresses), names);
            let mut source = open_file(&path, &opts.filter)?;
            run_capture_loop(&mut source, &classifier, registry)
        }
    }
}

/// `start_sniffing`, with the outcome logged instead of returned.
pub fn capture_and_log(opts: CaptureOptions, names: NameTables, registry: &Registry) {
    match start_sniffing(opts, names, registry) {
        Ok(frames) => info!(frames, "capture source closed"),
        Err(Error::NoSuitableInterface) => {
            warn!("couldn't find a network interface to listen on")
        }
        Err(e) => error!(error = %e, "packet capture stopped"),
    }
}
