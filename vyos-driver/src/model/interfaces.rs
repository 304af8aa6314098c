use indexmap::IndexMap;
use serde::Serialize;

use super::AddressFamily;

/// `last_flapped` value reported when the device does not expose it.
pub const LAST_FLAPPED_UNKNOWN: i64 = -1;

/// Administrative and operational state of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub is_up: bool,
    pub is_enabled: bool,
    pub description: Option<String>,
    pub last_flapped: i64,
    pub speed: Option<String>,
    pub mac_address: Option<String>,
}

/// Traffic counters of one interface.
///
/// Unicast and broadcast packet counts are not reported by
/// `show interfaces detail` and are always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceCounters {
    pub tx_errors: u64,
    pub rx_errors: u64,
    pub tx_discards: u64,
    pub rx_discards: u64,
    pub tx_octets: u64,
    pub rx_octets: u64,
    pub tx_unicast_packets: Option<u64>,
    pub rx_unicast_packets: Option<u64>,
    pub tx_multicast_packets: Option<u64>,
    pub rx_multicast_packets: u64,
    pub tx_broadcast_packets: Option<u64>,
    pub rx_broadcast_packets: Option<u64>,
}

/// One row of the ARP table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArpEntry {
    pub interface: String,
    pub mac: String,
    pub ip: String,
    pub age: Option<f64>,
}

/// Prefix length of a configured address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrefixLength {
    pub prefix_length: u8,
}

/// Addresses of one interface, grouped by family then keyed by address.
pub type InterfaceAddresses = IndexMap<AddressFamily, IndexMap<String, PrefixLength>>;
