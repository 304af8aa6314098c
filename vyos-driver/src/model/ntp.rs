use std::net::IpAddr;

use serde::Serialize;

/// Association statistics of one NTP peer, as listed by `ntpq -np`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NtpStats {
    pub remote: IpAddr,
    pub referenceid: String,
    /// Set when the row carries the `*` system-peer tally code.
    pub synchronized: bool,
    pub stratum: u8,
    #[serde(rename = "type")]
    pub kind: char,
    pub when: u32,
    pub hostpoll: u32,
    pub reachability: u32,
    pub delay: f64,
    pub offset: f64,
    pub jitter: f64,
}

/// A configured NTP peer. VyOS exposes no per-peer attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NtpPeer {}
