// Raw frame bytes -> ordered layer list.
//
// The walk stops at the first header that fails to parse; whatever was decoded
// up to that point is kept. Bytes we have no decoder for become a single
// trailing Payload layer.

use etherparse::{
    Ethernet2HeaderSlice, Ipv4HeaderSlice, Ipv6HeaderSlice, SingleVlanHeaderSlice,
    TcpHeaderSlice, UdpHeaderSlice,
};

use crate::models::{CapturedFrame, Layer};

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_ARP: u16 = 0x0806;
const ETHERTYPE_VLAN: u16 = 0x8100;
const ETHERTYPE_QINQ: u16 = 0x88a8;
const ETHERTYPE_IPV6: u16 = 0x86dd;

const IPPROTO_HOPOPTS: u8 = 0;
const IPPROTO_ICMP: u8 = 1;
const IPPROTO_IPIP: u8 = 4;
const IPPROTO_TCP: u8 = 6;
const IPPROTO_UDP: u8 = 17;
const IPPROTO_IPV6: u8 = 41;
const IPPROTO_ROUTING: u8 = 43;
const IPPROTO_FRAGMENT: u8 = 44;
const IPPROTO_ICMPV6: u8 = 58;
const IPPROTO_DSTOPTS: u8 = 60;

const IPV4_MORE_FRAGMENTS: u16 = 0x2000;
const IPV4_FRAGMENT_OFFSET: u16 = 0x1fff;

const ARP_MIN_LEN: usize = 28;
const ICMPV4_HEADER_LEN: usize = 8;
const ICMPV6_HEADER_LEN: usize = 4;
const LINUX_SLL_HEADER_LEN: usize = 16;
const LOOPBACK_HEADER_LEN: usize = 4;
const VXLAN_HEADER_LEN: usize = 8;
// Fixed size for the fragment header, unit of hdr-ext-len for the others
const IPV6_EXTENSION_UNIT: usize = 8;
const MAX_IPV6_EXTENSIONS: usize = 8;
pub const VXLAN_PORT: u16 = 4789;

// Nested tunnels each consume a header, but a crafted frame could still nest
// deep enough to matter for recursion.
const MAX_ENCAPSULATION: usize = 8;

/// Link-layer framing reported by the capture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Ethernet,
    LinuxSll,
    /// BSD null / OpenBSD loop: 4-byte address family then IP
    Loopback,
    /// Bare IP, version taken from the first nibble
    Raw,
    Unsupported(i32),
}

impl From<pcap::Linktype> for LinkType {
    fn from(linktype: pcap::Linktype) -> Self {
        match linktype.0 {
            1 => LinkType::Ethernet,
            113 => LinkType::LinuxSll,
            0 | 108 => LinkType::Loopback,
            12 | 14 | 101 | 228 | 229 => LinkType::Raw,
            other => LinkType::Unsupported(other),
        }
    }
}

/// Decode one captured frame. Never fails: an unknown link type or a
/// truncated first header yields a frame with no layers.
pub fn decode_frame(link: LinkType, data: &[u8]) -> CapturedFrame {
    let mut walk = LayerWalk::default();
    match link {
        LinkType::Ethernet => walk.ethernet(data, 0),
        LinkType::LinuxSll => walk.linux_sll(data),
        LinkType::Loopback => walk.loopback(data),
        LinkType::Raw => walk.ip(data, 0),
        LinkType::Unsupported(_) => {}
    }
    CapturedFrame::new(walk.layers, data.len())
}

#[derive(Default)]
struct LayerWalk {
    layers: Vec<Layer>,
}

impl LayerWalk {
    fn ethernet(&mut self, data: &[u8], depth: usize) {
        let Ok(eth) = Ethernet2HeaderSlice::from_slice(data) else {
            return;
        };
        self.layers.push(Layer::Ethernet);
        let rest = &data[eth.slice().len()..];
        self.ether_payload(eth.ether_type().0, rest, depth);
    }

    fn linux_sll(&mut self, data: &[u8]) {
        if data.len() < LINUX_SLL_HEADER_LEN {
            return;
        }
        self.layers.push(Layer::LinuxSll);
        let protocol = u16::from_be_bytes([data[14], data[15]]);
        self.ether_payload(protocol, &data[LINUX_SLL_HEADER_LEN..], 0);
    }

    fn loopback(&mut self, data: &[u8]) {
        if data.len() < LOOPBACK_HEADER_LEN {
            return;
        }
        self.layers.push(Layer::Loopback);
        self.ip(&data[LOOPBACK_HEADER_LEN..], 0);
    }

    fn ether_payload(&mut self, ether_type: u16, data: &[u8], depth: usize) {
        match ether_type {
            ETHERTYPE_IPV4 => self.ipv4(data, depth),
            ETHERTYPE_IPV6 => self.ipv6(data, depth),
            ETHERTYPE_ARP => {
                if data.len() >= ARP_MIN_LEN {
                    self.layers.push(Layer::Arp);
                }
            }
            ETHERTYPE_VLAN | ETHERTYPE_QINQ => self.vlan(data, depth),
            _ => self.payload(data),
        }
    }

    fn vlan(&mut self, data: &[u8], depth: usize) {
        let Ok(tag) = SingleVlanHeaderSlice::from_slice(data) else {
            return;
        };
        self.layers.push(Layer::Dot1Q);
        let rest = &data[tag.slice().len()..];
        self.ether_payload(tag.ether_type().0, rest, depth);
    }

    fn ip(&mut self, data: &[u8], depth: usize) {
        match data.first().map(|b| b >> 4) {
            Some(4) => self.ipv4(data, depth),
            Some(6) => self.ipv6(data, depth),
            _ => {}
        }
    }

    fn ipv4(&mut self, data: &[u8], depth: usize) {
        let Ok(ip) = Ipv4HeaderSlice::from_slice(data) else {
            return;
        };
        self.layers.push(Layer::Ipv4 {
            source: ip.source_addr(),
            destination: ip.destination_addr(),
        });

        let header = ip.slice();
        let header_len = header.len();
        // total_len 0 shows up with segmentation offload; trust the capture then
        let end = match usize::from(ip.total_len()) {
            0 => data.len(),
            n => n.clamp(header_len, data.len()),
        };
        let rest = &data[header_len..end];

        // the first fragment is no more decodable than the rest without reassembly
        let flags_offset = u16::from_be_bytes([header[6], header[7]]);
        if flags_offset & (IPV4_MORE_FRAGMENTS | IPV4_FRAGMENT_OFFSET) != 0 {
            self.fragment(rest);
            return;
        }
        self.ip_payload(ip.protocol().0, rest, depth);
    }

    fn ipv6(&mut self, data: &[u8], depth: usize) {
        let Ok(ip) = Ipv6HeaderSlice::from_slice(data) else {
            return;
        };
        self.layers.push(Layer::Ipv6 {
            source: ip.source_addr(),
            destination: ip.destination_addr(),
        });

        let header_len = ip.slice().len();
        let end = match usize::from(ip.payload_length()) {
            // jumbogram or offload
            0 => data.len(),
            n => (header_len + n).min(data.len()),
        };
        self.ipv6_extensions(ip.next_header().0, &data[header_len..end], depth);
    }

    /// Walk hop-by-hop, routing, fragment and destination options headers,
    /// then dispatch on the last next-header value.
    fn ipv6_extensions(&mut self, mut next_header: u8, mut data: &[u8], depth: usize) {
        for _ in 0..MAX_IPV6_EXTENSIONS {
            let layer = match next_header {
                IPPROTO_HOPOPTS => Layer::Ipv6HopByHop,
                IPPROTO_ROUTING => Layer::Ipv6Routing,
                IPPROTO_FRAGMENT => Layer::Ipv6Fragment,
                IPPROTO_DSTOPTS => Layer::Ipv6Destination,
                _ => break,
            };
            if data.len() < IPV6_EXTENSION_UNIT {
                return;
            }
            let len = match layer {
                Layer::Ipv6Fragment => IPV6_EXTENSION_UNIT,
                _ => (usize::from(data[1]) + 1) * IPV6_EXTENSION_UNIT,
            };
            if data.len() < len {
                return;
            }
            self.layers.push(layer);
            if layer == Layer::Ipv6Fragment {
                self.fragment(&data[len..]);
                return;
            }
            next_header = data[0];
            data = &data[len..];
        }
        self.ip_payload(next_header, data, depth);
    }

    fn ip_payload(&mut self, protocol: u8, data: &[u8], depth: usize) {
        match protocol {
            IPPROTO_TCP => self.tcp(data),
            IPPROTO_UDP => self.udp(data, depth),
            IPPROTO_ICMP => self.icmp(Layer::Icmpv4, ICMPV4_HEADER_LEN, data),
            IPPROTO_ICMPV6 => self.icmp(Layer::Icmpv6, ICMPV6_HEADER_LEN, data),
            IPPROTO_IPIP if depth < MAX_ENCAPSULATION => self.ipv4(data, depth + 1),
            IPPROTO_IPV6 if depth < MAX_ENCAPSULATION => self.ipv6(data, depth + 1),
            _ => self.payload(data),
        }
    }

    fn tcp(&mut self, data: &[u8]) {
        let Ok(tcp) = TcpHeaderSlice::from_slice(data) else {
            return;
        };
        self.layers.push(Layer::Tcp {
            source_port: tcp.source_port(),
            destination_port: tcp.destination_port(),
        });
        self.payload(&data[tcp.slice().len()..]);
    }

    fn udp(&mut self, data: &[u8], depth: usize) {
        let Ok(udp) = UdpHeaderSlice::from_slice(data) else {
            return;
        };
        let destination_port = udp.destination_port();
        self.layers.push(Layer::Udp {
            source_port: udp.source_port(),
            destination_port,
        });

        let rest = &data[udp.slice().len()..];
        if destination_port == VXLAN_PORT
            && depth < MAX_ENCAPSULATION
            && rest.len() >= VXLAN_HEADER_LEN
        {
            self.layers.push(Layer::Vxlan);
            self.ethernet(&rest[VXLAN_HEADER_LEN..], depth + 1);
            return;
        }
        self.payload(rest);
    }

    fn icmp(&mut self, layer: Layer, header_len: usize, data: &[u8]) {
        if data.len() < header_len {
            return;
        }
        self.layers.push(layer);
        self.payload(&data[header_len..]);
    }

    fn fragment(&mut self, data: &[u8]) {
        if !data.is_empty() {
            self.layers.push(Layer::Fragment);
        }
    }

    fn payload(&mut self, data: &[u8]) {
        if !data.is_empty() {
            self.layers.push(Layer::Payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etherparse::PacketBuilder;
    use std::net::Ipv4Addr;

    const MAC_A: [u8; 6] = [0x02, 0, 0, 0, 0, 0x01];
    const MAC_B: [u8; 6] = [0x02, 0, 0, 0, 0, 0x02];

    fn names(frame: &CapturedFrame) -> Vec<&'static str> {
        frame.layers.iter().map(Layer::name).collect()
    }

    fn tcp_frame(payload: &[u8]) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2(MAC_A, MAC_B)
            .ipv4([10, 0, 0, 5], [93, 184, 216, 34], 64)
            .tcp(54321, 80, 1, 65535);
        let mut out = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut out, payload).unwrap();
        out
    }

    fn ipv4_header(protocol: u8, payload_len: usize, src: [u8; 4], dst: [u8; 4]) -> Vec<u8> {
        let total = (20 + payload_len) as u16;
        let mut header = vec![0x45, 0, 0, 0, 0, 0, 0, 0, 64, protocol, 0, 0];
        header[2..4].copy_from_slice(&total.to_be_bytes());
        header.extend_from_slice(&src);
        header.extend_from_slice(&dst);
        header
    }

    #[test]
    fn test_bare_tcp_segment() {
        let data = tcp_frame(&[]);
        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "TCP"]);
        assert_eq!(frame.length, data.len());
        assert_eq!(
            frame.layers[1],
            Layer::Ipv4 {
                source: Ipv4Addr::new(10, 0, 0, 5),
                destination: Ipv4Addr::new(93, 184, 216, 34),
            }
        );
        assert_eq!(
            frame.layers[2],
            Layer::Tcp {
                source_port: 54321,
                destination_port: 80,
            }
        );
    }

    #[test]
    fn test_ethernet_padding_is_not_payload() {
        let mut data = tcp_frame(&[]);
        data.resize(60, 0);
        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "TCP"]);
        assert_eq!(frame.length, 60);
    }

    #[test]
    fn test_tcp_with_data() {
        let data = tcp_frame(b"GET / HTTP/1.1\r\n\r\n");
        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "TCP", "Payload"]);
    }

    #[test]
    fn test_ipv6_udp() {
        let mut src = [0u8; 16];
        src[0] = 0x20;
        src[1] = 0x01;
        src[15] = 1;
        let mut dst = src;
        dst[15] = 2;
        let builder = PacketBuilder::ethernet2(MAC_A, MAC_B)
            .ipv6(src, dst, 64)
            .udp(5353, 53);
        let payload = [0u8; 12];
        let mut data = Vec::new();
        builder.write(&mut data, &payload).unwrap();

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv6", "UDP", "Payload"]);
        assert_eq!(
            frame.layers[2],
            Layer::Udp {
                source_port: 5353,
                destination_port: 53,
            }
        );
    }

    fn ipv6_frame(next_header: u8, extensions: &[u8], transport: &[u8]) -> Vec<u8> {
        let src: std::net::Ipv6Addr = "2001:db8::99".parse().unwrap();
        let dst: std::net::Ipv6Addr = "2001:db8::5".parse().unwrap();
        let payload_len = (extensions.len() + transport.len()) as u16;

        let mut data = Vec::new();
        data.extend_from_slice(&MAC_B);
        data.extend_from_slice(&MAC_A);
        data.extend_from_slice(&[0x86, 0xdd]);
        data.extend_from_slice(&[0x60, 0, 0, 0]);
        data.extend_from_slice(&payload_len.to_be_bytes());
        data.extend_from_slice(&[next_header, 64]);
        data.extend_from_slice(&src.octets());
        data.extend_from_slice(&dst.octets());
        data.extend_from_slice(extensions);
        data.extend_from_slice(transport);
        data
    }

    fn bare_tcp_header(source_port: u16, destination_port: u16) -> Vec<u8> {
        let mut tcp = vec![0u8; 20];
        tcp[0..2].copy_from_slice(&source_port.to_be_bytes());
        tcp[2..4].copy_from_slice(&destination_port.to_be_bytes());
        // data offset 5 words, ACK
        tcp[12] = 0x50;
        tcp[13] = 0x10;
        tcp[14..16].copy_from_slice(&1024u16.to_be_bytes());
        tcp
    }

    #[test]
    fn test_ipv6_hop_by_hop_then_tcp() {
        // next header TCP, hdr-ext-len 0, PadN filling the 8 bytes
        let hop_by_hop = [IPPROTO_TCP, 0, 1, 4, 0, 0, 0, 0];
        let data = ipv6_frame(IPPROTO_HOPOPTS, &hop_by_hop, &bare_tcp_header(51000, 443));

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv6", "IPv6HopByHop", "TCP"]);
        assert_eq!(
            frame.layers[3],
            Layer::Tcp {
                source_port: 51000,
                destination_port: 443,
            }
        );
    }

    #[test]
    fn test_ipv6_extension_chain() {
        // destination options (16 bytes) -> routing (8 bytes) -> UDP
        let mut extensions = vec![IPPROTO_ROUTING, 1];
        extensions.extend_from_slice(&[1, 12]);
        extensions.extend_from_slice(&[0u8; 12]);
        extensions.extend_from_slice(&[IPPROTO_UDP, 0, 0, 0, 0, 0, 0, 0]);
        let udp = [0x13, 0x88, 0x00, 0x35, 0x00, 0x0c, 0, 0, 1, 2, 3, 4];
        let data = ipv6_frame(IPPROTO_DSTOPTS, &extensions, &udp);

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(
            names(&frame),
            vec!["Ethernet", "IPv6", "IPv6Destination", "IPv6Routing", "UDP", "Payload"]
        );
    }

    #[test]
    fn test_ipv6_fragment_header_stops_decoding() {
        // more-fragments set, offset 0
        let fragment = [IPPROTO_TCP, 0, 0, 1, 0, 0, 0, 42];
        let data = ipv6_frame(IPPROTO_FRAGMENT, &fragment, &bare_tcp_header(51000, 443));

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv6", "IPv6Fragment", "Fragment"]);
    }

    #[test]
    fn test_truncated_ipv6_extension() {
        // claims 16 bytes, only 8 present
        let hop_by_hop = [IPPROTO_TCP, 1, 1, 4, 0, 0, 0, 0];
        let data = ipv6_frame(IPPROTO_HOPOPTS, &hop_by_hop, &[]);

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv6"]);
    }

    #[test]
    fn test_ipv4_fragments_are_not_decoded() {
        let udp = [0x13, 0x88, 0x00, 0x35, 0x00, 0x0c, 0, 0, 1, 2, 3, 4];
        let with_flags = |flags_offset: u16| {
            let mut header = ipv4_header(IPPROTO_UDP, udp.len(), [10, 0, 0, 5], [1, 1, 1, 1]);
            header[6..8].copy_from_slice(&flags_offset.to_be_bytes());
            let mut data = Vec::new();
            data.extend_from_slice(&MAC_B);
            data.extend_from_slice(&MAC_A);
            data.extend_from_slice(&[0x08, 0x00]);
            data.extend_from_slice(&header);
            data.extend_from_slice(&udp);
            data
        };

        // first fragment: more-fragments, offset 0
        let frame = decode_frame(LinkType::Ethernet, &with_flags(0x2000));
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "Fragment"]);

        // last fragment: offset only
        let frame = decode_frame(LinkType::Ethernet, &with_flags(0x00b9));
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "Fragment"]);

        // don't-fragment alone is a whole datagram
        let frame = decode_frame(LinkType::Ethernet, &with_flags(0x4000));
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "UDP", "Payload"]);
    }

    #[test]
    fn test_vlan_tagged() {
        let plain = tcp_frame(&[]);
        let mut data = plain[..12].to_vec();
        data.extend_from_slice(&[0x81, 0x00, 0x00, 0x64]);
        data.extend_from_slice(&plain[12..]);

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "Dot1Q", "IPv4", "TCP"]);
    }

    #[test]
    fn test_raw_and_loopback_link_types() {
        let builder = PacketBuilder::ipv4([127, 0, 0, 1], [127, 0, 0, 1], 64).udp(40000, 9250);
        let mut raw = Vec::new();
        builder.write(&mut raw, b"x").unwrap();

        let frame = decode_frame(LinkType::Raw, &raw);
        assert_eq!(names(&frame), vec!["IPv4", "UDP", "Payload"]);

        let mut looped = vec![2, 0, 0, 0];
        looped.extend_from_slice(&raw);
        let frame = decode_frame(LinkType::Loopback, &looped);
        assert_eq!(names(&frame), vec!["Loopback", "IPv4", "UDP", "Payload"]);
    }

    #[test]
    fn test_linux_cooked_capture() {
        let plain = tcp_frame(&[]);
        let mut data = vec![0u8; 14];
        data.extend_from_slice(&[0x08, 0x00]);
        data.extend_from_slice(&plain[14..]);

        let frame = decode_frame(LinkType::LinuxSll, &data);
        assert_eq!(names(&frame), vec!["Linux SLL", "IPv4", "TCP"]);
    }

    #[test]
    fn test_ip_in_ip_keeps_both_headers() {
        let builder = PacketBuilder::ipv4([192, 168, 7, 1], [192, 168, 7, 2], 64).tcp(443, 50000, 7, 1024);
        let mut inner = Vec::new();
        builder.write(&mut inner, &[]).unwrap();

        let mut data = Vec::new();
        data.extend_from_slice(&MAC_B);
        data.extend_from_slice(&MAC_A);
        data.extend_from_slice(&[0x08, 0x00]);
        data.extend_from_slice(&ipv4_header(IPPROTO_IPIP, inner.len(), [10, 1, 0, 1], [10, 2, 0, 1]));
        data.extend_from_slice(&inner);

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "IPv4", "TCP"]);
        assert_eq!(
            frame.layers[2],
            Layer::Ipv4 {
                source: Ipv4Addr::new(192, 168, 7, 1),
                destination: Ipv4Addr::new(192, 168, 7, 2),
            }
        );
    }

    #[test]
    fn test_vxlan_inner_frame() {
        let inner = tcp_frame(&[]);
        let mut payload = vec![0x08, 0, 0, 0, 0, 0, 0x01, 0];
        payload.extend_from_slice(&inner);

        let builder = PacketBuilder::ethernet2(MAC_A, MAC_B)
            .ipv4([172, 16, 0, 1], [172, 16, 0, 2], 64)
            .udp(33000, VXLAN_PORT);
        let mut data = Vec::new();
        builder.write(&mut data, &payload).unwrap();

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(
            names(&frame),
            vec!["Ethernet", "IPv4", "UDP", "VXLAN", "Ethernet", "IPv4", "TCP"]
        );
    }

    #[test]
    fn test_icmp_echo() {
        let mut data = Vec::new();
        data.extend_from_slice(&MAC_B);
        data.extend_from_slice(&MAC_A);
        data.extend_from_slice(&[0x08, 0x00]);
        let icmp = [8u8, 0, 0, 0, 0, 1, 0, 1, 0xde, 0xad];
        data.extend_from_slice(&ipv4_header(IPPROTO_ICMP, icmp.len(), [10, 0, 0, 5], [1, 1, 1, 1]));
        data.extend_from_slice(&icmp);

        let frame = decode_frame(LinkType::Ethernet, &data);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4", "ICMPv4", "Payload"]);
    }

    #[test]
    fn test_arp_and_unknown_ethertype() {
        let mut arp = Vec::new();
        arp.extend_from_slice(&[0xff; 6]);
        arp.extend_from_slice(&MAC_A);
        arp.extend_from_slice(&[0x08, 0x06]);
        arp.extend_from_slice(&[0u8; 28]);
        assert_eq!(names(&decode_frame(LinkType::Ethernet, &arp)), vec!["Ethernet", "ARP"]);

        let mut lldp = arp.clone();
        lldp[12] = 0x88;
        lldp[13] = 0xcc;
        assert_eq!(
            names(&decode_frame(LinkType::Ethernet, &lldp)),
            vec!["Ethernet", "Payload"]
        );
    }

    #[test]
    fn test_truncated_and_unsupported_frames() {
        let data = tcp_frame(&[]);

        let frame = decode_frame(LinkType::Ethernet, &data[..6]);
        assert!(frame.layers.is_empty());
        assert_eq!(frame.length, 6);

        // cut inside the TCP header: IP survives, TCP is dropped
        let frame = decode_frame(LinkType::Ethernet, &data[..40]);
        assert_eq!(names(&frame), vec!["Ethernet", "IPv4"]);

        let frame = decode_frame(LinkType::Unsupported(147), &data);
        assert!(frame.layers.is_empty());
        assert_eq!(frame.length, data.len());
    }

    #[test]
    fn test_linktype_mapping() {
        assert_eq!(LinkType::from(pcap::Linktype(1)), LinkType::Ethernet);
        assert_eq!(LinkType::from(pcap::Linktype(113)), LinkType::LinuxSll);
        assert_eq!(LinkType::from(pcap::Linktype(0)), LinkType::Loopback);
        assert_eq!(LinkType::from(pcap::Linktype(101)), LinkType::Raw);
        assert_eq!(LinkType::from(pcap::Linktype(147)), LinkType::Unsupported(147));
    }
}
