//! Normalized network-state records.
//!
//! Field names follow the schema of the host automation framework so the
//! records serialize directly into the shape it expects. Values the device
//! output does not expose are `None` and serialize as `null`; they are never
//! omitted.

mod bgp;
mod interfaces;
mod ntp;
mod ping;
mod system;

pub use bgp::{AddressFamily, BgpGlobal, BgpNeighbors, BgpPeer, PrefixCounts};
pub use interfaces::{
    ArpEntry, Interface, InterfaceAddresses, InterfaceCounters, PrefixLength,
    LAST_FLAPPED_UNKNOWN,
};
pub use ntp::{NtpPeer, NtpStats};
pub use ping::{PingOptions, PingProbe, PingResult, PingSuccess};
pub use system::{
    CpuUsage, Environment, Facts, FanStatus, MemoryUsage, PowerStatus, SnmpCommunity,
    SnmpInformation, TemperatureStatus, User, VENDOR,
};

use indexmap::IndexMap;

/// Interfaces keyed by name, in configuration order.
pub type Interfaces = IndexMap<String, Interface>;

/// Counters keyed by interface name, in output order.
pub type InterfacesCounters = IndexMap<String, InterfaceCounters>;

/// Addresses keyed by interface name.
pub type InterfacesIp = IndexMap<String, InterfaceAddresses>;

/// NTP peers keyed by address.
pub type NtpPeers = IndexMap<std::net::IpAddr, NtpPeer>;

/// Login users keyed by username.
pub type Users = IndexMap<String, User>;
