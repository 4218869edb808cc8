//! Packet and byte counters keyed by classification
//!
//! The capture thread is the only writer; the HTTP handler reads snapshots
//! concurrently. Series are created on first use and never removed.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::ClassificationKey;

pub const NAMESPACE: &str = "pcap";
pub const SUBSYSTEM: &str = "packets";

pub const PACKETS_NAME: &str = "total";
pub const PACKETS_HELP: &str = "Total number of packets";
pub const BYTES_NAME: &str = "size";
pub const BYTES_HELP: &str = "Total size in bytes for all packets";

/// Label names, in the order the key fields map onto them
pub const LABELS: [&str; 4] = ["direction", "remote", "appid", "layers"];

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub packets: u64,
    pub bytes: u64,
}

#[derive(Debug, Default)]
pub struct Registry {
    series: Mutex<HashMap<ClassificationKey, Counters>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // counters are plain integers; a poisoned map is still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<ClassificationKey, Counters>> {
        self.series.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count one frame of `bytes` length against `key`.
    pub fn observe(&self, key: ClassificationKey, bytes: u64) {
        let mut guard = self.lock();
        let entry = guard.entry(key).or_default();
        entry.packets = entry.packets.wrapping_add(1);
        entry.bytes = entry.bytes.wrapping_add(bytes);
    }

    pub fn get(&self, key: &ClassificationKey) -> Option<Counters> {
        self.lock().get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of every series, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<ClassificationKey, Counters> {
        let guard = self.lock();
        guard.iter().map(|(key, counters)| (key.clone(), *counters)).collect()
    }

    /// Prometheus text exposition of both counter families.
    pub fn render(&self) -> String {
        let snapshot = self.snapshot();
        let mut out = String::new();
        render_family(&mut out, PACKETS_NAME, PACKETS_HELP, &snapshot, |c| c.packets);
        render_family(&mut out, BYTES_NAME, BYTES_HELP, &snapshot, |c| c.bytes);
        out
    }
}

fn metric_name(name: &str) -> String {
    format!("{}_{}_{}", NAMESPACE, SUBSYSTEM, name)
}

fn render_family(
    out: &mut String,
    name: &str,
    help: &str,
    snapshot: &BTreeMap<ClassificationKey, Counters>,
    value: impl Fn(&Counters) -> u64,
) {
    let name = metric_name(name);
    // writing into a String cannot fail
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} counter", name);
    for (key, counters) in snapshot {
        let values = [
            key.direction.as_str(),
            key.remote.as_str(),
            key.app.as_str(),
            key.layers.as_str(),
        ];
        let labels = LABELS
            .iter()
            .zip(values)
            .map(|(label, v)| format!("{}=\"{}\"", label, escape_label_value(v)))
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{}{{{}}} {}", name, labels, value(counters));
    }
}

fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}
