//! `show ip bgp summary` and `show ip bgp neighbors <peer>` parsing.
//!
//! ```text
//! BGP router identifier 192.168.1.2, local AS number 64520
//! IPv4 Unicast - max multipaths: ebgp 1 ibgp 1
//! RIB entries 3, using 288 bytes of memory
//! Peers 3, using 13 KiB of memory
//!
//! Neighbor        V    AS MsgRcvd MsgSent   TblVer  InQ OutQ Up/Down  State/PfxRcd
//! 192.168.1.1     4 64519    7226    7189        0    0    0 4d23h40m        1
//! 192.168.1.4     4 64522       0       0        0    0    0 never    Active
//!
//! Total number of neighbors 3
//! ```
//!
//! The summary carries the per-session counters; the remote router id and
//! accepted prefix count only appear in the per-neighbor detail output.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::duration::parse_bgp_uptime;
use super::{number, table_body};
use crate::error::{ParseError, Result};
use crate::model::{AddressFamily, BgpPeer, PrefixCounts};

const CONTEXT: &str = "bgp summary";

/// Lines above the neighbor table.
const HEADER_LINES: usize = 6;

/// Lines below the neighbor table (blank, total, trailing newline).
const TRAILER_LINES: usize = 3;

/// Fixed columns before `State/PfxRcd`.
const FIXED_COLUMNS: usize = 9;

static ROUTER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"router identifier (\d+\.\d+\.\d+\.\d+), local AS number (\d+)")
        .expect("static regex")
});

static REMOTE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"remote router ID (\d+\.\d+\.\d+\.\d+)").expect("static regex")
});

static ACCEPTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) accepted prefixes").expect("static regex"));

/// Session state reported in the `State/PfxRcd` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Session established; the column holds the received prefix count.
    Established { prefixes: u64 },

    /// Session not established; the column holds the FSM state name.
    Down {
        state: String,
        /// `(Admin)` marker present: the neighbor is shut down.
        admin_shutdown: bool,
    },
}

impl SessionState {
    fn from_column(column: &str) -> Self {
        match column.parse() {
            Ok(prefixes) => SessionState::Established { prefixes },
            Err(_) => SessionState::Down {
                state: column.to_string(),
                admin_shutdown: column.contains("(Admin)"),
            },
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, SessionState::Established { .. })
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(
            self,
            SessionState::Down {
                admin_shutdown: true,
                ..
            }
        )
    }
}

/// One row of the neighbor table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub peer: String,
    pub address_family: AddressFamily,
    pub remote_as: u32,
    pub messages_received: u64,
    pub messages_sent: u64,
    /// Seconds, `-1` for `never`.
    pub uptime: i64,
    pub state: SessionState,
}

/// Parsed `show ip bgp summary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgpSummary {
    pub router_id: String,
    pub local_as: u32,
    pub rows: Vec<SummaryRow>,
}

/// Values recovered from `show ip bgp neighbors <peer>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborDetail {
    pub remote_id: String,
    pub accepted_prefixes: u64,
}

fn address_family(version: &str) -> Result<AddressFamily> {
    match version {
        "4" => Ok(AddressFamily::Ipv4),
        "6" => Ok(AddressFamily::Ipv6),
        other => Err(ParseError::UnknownBgpVersion(other.to_string()).into()),
    }
}

fn parse_row(line: &str) -> Result<SummaryRow> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() <= FIXED_COLUMNS {
        return Err(ParseError::FieldCount {
            context: CONTEXT,
            expected: FIXED_COLUMNS + 1,
            found: cols.len(),
            line: line.to_string(),
        }
        .into());
    }

    // "Idle (Admin)" spans two tokens
    let state = cols[FIXED_COLUMNS..].join(" ");

    Ok(SummaryRow {
        peer: cols[0].to_string(),
        address_family: address_family(cols[1])?,
        remote_as: number(CONTEXT, cols[2])?,
        messages_received: number(CONTEXT, cols[3])?,
        messages_sent: number(CONTEXT, cols[4])?,
        uptime: parse_bgp_uptime(cols[8])?,
        state: SessionState::from_column(&state),
    })
}

/// Parse `show ip bgp summary`.
pub fn parse_bgp_summary(text: &str) -> Result<BgpSummary> {
    let first = text.lines().next().unwrap_or_default();
    let caps = ROUTER_ID
        .captures(first)
        .ok_or(ParseError::MissingPattern {
            context: CONTEXT,
            pattern: "router identifier <id>, local AS number <asn>",
        })?;

    let rows = table_body(text, HEADER_LINES, TRAILER_LINES)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_row)
        .collect::<Result<Vec<_>>>()?;

    Ok(BgpSummary {
        router_id: caps[1].to_string(),
        local_as: number(CONTEXT, &caps[2])?,
        rows,
    })
}

/// Parse `show ip bgp neighbors <peer>`.
pub fn parse_neighbor_detail(text: &str) -> Result<NeighborDetail> {
    const DETAIL: &str = "bgp neighbor detail";

    let remote_id = REMOTE_ID.captures(text).ok_or(ParseError::MissingPattern {
        context: DETAIL,
        pattern: "remote router ID <id>",
    })?;
    let accepted = ACCEPTED.captures(text).ok_or(ParseError::MissingPattern {
        context: DETAIL,
        pattern: "<n> accepted prefixes",
    })?;

    Ok(NeighborDetail {
        remote_id: remote_id[1].to_string(),
        accepted_prefixes: number(DETAIL, &accepted[1])?,
    })
}

/// Combine a summary row with its detail into the normalized peer record.
pub fn build_peer(row: &SummaryRow, local_as: u32, detail: &NeighborDetail) -> BgpPeer {
    let mut address_family = IndexMap::new();
    address_family.insert(
        row.address_family,
        PrefixCounts {
            sent_prefixes: None,
            accepted_prefixes: detail.accepted_prefixes,
            received_prefixes: None,
        },
    );

    BgpPeer {
        description: String::new(),
        is_enabled: row.state.is_enabled(),
        is_up: row.state.is_up(),
        local_as,
        remote_as: row.remote_as,
        remote_id: detail.remote_id.clone(),
        uptime: row.uptime,
        address_family,
    }
}
