//! `show arp` parsing.
//!
//! ```text
//! Address                  HWtype  HWaddress           Flags Mask            Iface
//! 10.129.2.254             ether   00:50:56:97:af:b1   C                     eth0
//! 192.168.1.1              ether   00:50:56:ba:26:7f   C                     eth1
//! ```

use super::{fields, table_body};
use crate::error::Result;
use crate::model::ArpEntry;

const IP: usize = 0;
const MAC: usize = 2;
const IFACE: usize = 4;

/// Parse the ARP table.
///
/// The header line and the final line are dropped. Every remaining line
/// must have at least five columns; `(incomplete)` entries, which lack the
/// hardware type and address, are therefore rejected like any other
/// malformed row.
pub fn parse_arp_table(text: &str) -> Result<Vec<ArpEntry>> {
    table_body(text, 1, 1)
        .into_iter()
        .map(|line| {
            let cols = fields("arp table", line, IFACE + 1)?;
            Ok(ArpEntry {
                interface: cols[IFACE].to_string(),
                mac: cols[MAC].to_string(),
                ip: cols[IP].to_string(),
                age: None,
            })
        })
        .collect()
}
