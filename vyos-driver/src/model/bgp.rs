use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// BGP address family of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "ipv4"),
            AddressFamily::Ipv6 => write!(f, "ipv6"),
        }
    }
}

/// Prefix counters of one address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrefixCounts {
    pub sent_prefixes: Option<u64>,
    pub accepted_prefixes: u64,
    pub received_prefixes: Option<u64>,
}

/// One BGP neighbor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpPeer {
    pub description: String,
    pub is_enabled: bool,
    pub is_up: bool,
    pub local_as: u32,
    pub remote_as: u32,
    pub remote_id: String,
    /// Session uptime in seconds, `-1` when the session never came up.
    pub uptime: i64,
    pub address_family: IndexMap<AddressFamily, PrefixCounts>,
}

/// Router-wide BGP state of the default VRF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpGlobal {
    pub router_id: String,
    pub local_as: u32,
    pub peers: IndexMap<String, BgpPeer>,
}

/// BGP neighbors grouped by VRF; VyOS only reports the global table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNeighbors {
    pub global: BgpGlobal,
}
