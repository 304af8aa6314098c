//! `show interfaces` parsing.
//!
//! ```text
//! Codes: S - State, L - Link, u - Up, D - Down, A - Admin Down
//! Interface        IP Address                        S/L  Description
//! ---------        ----------                        ---  -----------
//! br0              -                                 u/D
//! eth0             192.168.1.1/24                    u/u  Management
//! eth2             192.168.3.1/24                    u/u  foobar
//!                  192.168.2.2/24
//! lo               127.0.0.1/8                       u/u
//!                  ::1/128
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use log::trace;
use regex::Regex;

use super::number;
use crate::error::{ParseError, Result};
use crate::model::{AddressFamily, InterfaceAddresses, InterfacesIp, PrefixLength};

/// One side of the `S/L` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFlag {
    /// `u`
    Up,
    /// `D`
    Down,
    /// `A`
    AdminDown,
}

impl StateFlag {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "u" => Some(StateFlag::Up),
            "D" => Some(StateFlag::Down),
            "A" => Some(StateFlag::AdminDown),
            _ => None,
        }
    }
}

/// Administrative and link state of one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkState {
    pub admin: StateFlag,
    pub link: StateFlag,
}

impl LinkState {
    /// Link is physically up.
    pub fn is_up(&self) -> bool {
        self.link == StateFlag::Up
    }

    /// Interface is administratively enabled.
    pub fn is_enabled(&self) -> bool {
        self.admin == StateFlag::Up
    }
}

static LINK_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+(?:-|[0-9A-Fa-f:./]+)\s+([uAD])/([uAD])(?:\s|$)").expect("static regex")
});

/// Extract the `S/L` state of every interface row.
///
/// Rows that do not carry a state column (headers, continuation addresses)
/// are skipped.
pub fn parse_link_states(text: &str) -> IndexMap<String, LinkState> {
    let mut states = IndexMap::new();

    for line in text.lines() {
        let Some(caps) = LINK_ROW.captures(line) else {
            trace!("no link state in {:?}", line);
            continue;
        };
        if let (Some(admin), Some(link)) =
            (StateFlag::from_code(&caps[2]), StateFlag::from_code(&caps[3]))
        {
            states.insert(caps[1].to_string(), LinkState { admin, link });
        }
    }

    states
}

/// Address family of a textual address.
fn family(address: &str) -> Option<AddressFamily> {
    if address.contains(':') {
        Some(AddressFamily::Ipv6)
    } else if address.contains('.') {
        Some(AddressFamily::Ipv4)
    } else {
        None
    }
}

/// Extract the configured addresses of every interface.
///
/// Everything up to the `---` separator is header. A row starting in the
/// first column names a new interface; an indented row adds another address
/// to the previous one. Interfaces without addresses (`-`) are left out.
pub fn parse_interface_addresses(text: &str) -> Result<InterfacesIp> {
    const CONTEXT: &str = "interface addresses";

    let mut lines = text.lines();
    if text.lines().any(|l| l.trim_start().starts_with("---")) {
        for line in lines.by_ref() {
            if line.trim_start().starts_with("---") {
                break;
            }
        }
    }

    let mut result = InterfacesIp::new();
    let mut current: Option<String> = None;

    for line in lines {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        let address = if line.starts_with(char::is_whitespace) {
            first
        } else {
            current = Some(first.to_string());
            match tokens.next() {
                Some(address) => address,
                None => continue,
            }
        };

        if address == "-" {
            continue;
        }

        let name = current.as_ref().ok_or_else(|| ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: line.to_string(),
        })?;

        let (ip, prefix) = address.split_once('/').ok_or_else(|| ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: line.to_string(),
        })?;
        let family = family(ip).ok_or_else(|| ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: line.to_string(),
        })?;
        let prefix_length = number(CONTEXT, prefix)?;

        result
            .entry(name.clone())
            .or_insert_with(InterfaceAddresses::new)
            .entry(family)
            .or_default()
            .insert(ip.to_string(), PrefixLength { prefix_length });
    }

    Ok(result)
}
