//! `show interfaces detail` counter parsing.
//!
//! ```text
//! eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc pfifo_fast state UP group default qlen 1000
//!     link/ether 00:50:56:86:8c:26 brd ff:ff:ff:ff:ff:ff
//!
//!     RX:  bytes    packets     errors    dropped    overrun      mcast
//!       35960043     464584          0        221          0        407
//!     TX:  bytes    packets     errors    dropped    carrier collisions
//!       32776498     279273          0          0          0          0
//! ```
//!
//! Each interface block runs from its header line to the next header. The
//! RX and TX figures are read from the row right below the matching label
//! inside that block, so a block never borrows numbers from a neighbor.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use super::{fields, number};
use crate::error::{ParseError, Result};
use crate::model::{InterfaceCounters, InterfacesCounters};

const CONTEXT: &str = "interface counters";

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+): <").expect("static regex"));

/// The six figures of an `RX:` or `TX:` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StatRow([u64; 6]);

impl StatRow {
    const BYTES: usize = 0;
    const ERRORS: usize = 2;
    const DROPPED: usize = 3;
    /// `mcast` on RX rows, `collisions` on TX rows.
    const LAST: usize = 5;

    fn parse(line: &str) -> Result<Self> {
        let cols = fields(CONTEXT, line, 6)?;
        let mut values = [0u64; 6];
        for (value, col) in values.iter_mut().zip(&cols) {
            *value = number(CONTEXT, col)?;
        }
        Ok(StatRow(values))
    }
}

/// Find the statistics row following the `label` line within a block.
fn stat_row(name: &str, block: &[&str], label: &'static str) -> Result<StatRow> {
    let missing = || ParseError::MissingPattern {
        context: CONTEXT,
        pattern: label,
    };

    let at = block
        .iter()
        .position(|line| line.trim_start().starts_with(label))
        .ok_or_else(missing)?;
    let row = block[at + 1..]
        .iter()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(missing)?;

    trace!("{} {} row: {:?}", name, label, row);
    StatRow::parse(row)
}

/// Parse per-interface counters.
pub fn parse_interface_counters(text: &str) -> Result<InterfacesCounters> {
    let lines: Vec<&str> = text.lines().collect();

    let headers: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            HEADER
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|name| (i, name.as_str()))
        })
        .collect();

    let mut counters = InterfacesCounters::new();

    for (n, &(start, name)) in headers.iter().enumerate() {
        let end = headers.get(n + 1).map_or(lines.len(), |&(next, _)| next);
        let block = &lines[start + 1..end];

        let rx = stat_row(name, block, "RX:")?;
        let tx = stat_row(name, block, "TX:")?;

        counters.insert(
            name.to_string(),
            InterfaceCounters {
                tx_errors: tx.0[StatRow::ERRORS],
                rx_errors: rx.0[StatRow::ERRORS],
                tx_discards: tx.0[StatRow::DROPPED],
                rx_discards: rx.0[StatRow::DROPPED],
                tx_octets: tx.0[StatRow::BYTES],
                rx_octets: rx.0[StatRow::BYTES],
                tx_unicast_packets: None,
                rx_unicast_packets: None,
                tx_multicast_packets: None,
                rx_multicast_packets: rx.0[StatRow::LAST],
                tx_broadcast_packets: None,
                rx_broadcast_packets: None,
            },
        );
    }

    Ok(counters)
}
