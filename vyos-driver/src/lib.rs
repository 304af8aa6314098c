//! # vyos-driver
//!
//! Async driver that reads and configures VyOS routers over SSH.
//!
//! The driver issues VyOS operational commands, scrapes their text output
//! and returns normalized records (interfaces, counters, ARP, NTP, BGP,
//! SNMP, users, facts, ping results) shaped after the NAPALM getter schema.
//!
//! ## Features
//!
//! - Async SSH sessions via russh, one exec channel per command
//! - Pure, synchronous parsers for every supported command
//! - Pluggable configuration-tree parser and commit mechanism
//! - Offline replay of recorded output through [`channel::ReplayChannel`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vyos_driver::{DriverBuilder, NetworkDriver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vyos_driver::Error> {
//!     let mut driver = DriverBuilder::new("192.168.1.1")
//!         .username("vyos")
//!         .password("vyos")
//!         .build()?;
//!
//!     driver.open().await?;
//!
//!     for (name, iface) in driver.get_interfaces().await? {
//!         println!("{name}: up={} enabled={}", iface.is_up, iface.is_enabled);
//!     }
//!
//!     driver.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod parse;
pub mod transport;

// Re-export main types for convenience
pub use channel::{CommandChannel, ReplayChannel};
pub use config::{ConfigNode, ConfigTreeParser, VyattaConfigParser};
pub use driver::{
    CandidateSource, ConfigCommitter, DriverBuilder, NetworkDriver, VyosDriver, WrapperCommitter,
};
pub use error::{Error, Result};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
