//! High-level driver for VyOS devices.
//!
//! [`NetworkDriver`] is the fixed contract expected by the host automation
//! framework: session lifecycle, candidate configuration handling and a set
//! of getters returning normalized records. [`VyosDriver`] implements it on
//! top of any [`CommandChannel`](crate::channel::CommandChannel).

mod builder;
mod commit;
mod vyos;

pub use builder::DriverBuilder;
pub use commit::{CFG_CMD_WRAPPER, CandidateConfig, CandidateSource, ConfigCommitter, WrapperCommitter};
pub use vyos::VyosDriver;

use std::future::Future;

use crate::error::Result;
use crate::model::{
    ArpEntry, BgpNeighbors, Environment, Facts, Interfaces, InterfacesCounters, InterfacesIp,
    NtpPeers, NtpStats, PingOptions, PingResult, SnmpInformation, Users,
};

/// Trait for network device drivers.
pub trait NetworkDriver: Send {
    /// Open the session to the device.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the session.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Check if the session is open.
    fn is_open(&self) -> bool;

    /// Stage configuration lines to be merged on the next commit.
    ///
    /// Replaces any previously staged candidate.
    fn load_merge_candidate(
        &mut self,
        source: CandidateSource,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Drop the staged candidate.
    fn discard_config(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Apply the staged candidate as one transaction.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use vyos_driver::driver::{CandidateSource, NetworkDriver};
    ///
    /// # async fn example(driver: &mut impl NetworkDriver) -> Result<(), vyos_driver::Error> {
    /// driver
    ///     .load_merge_candidate(CandidateSource::Text(
    ///         "set interfaces ethernet eth0 description Management".into(),
    ///     ))
    ///     .await?;
    /// driver.commit_config().await?;
    /// # Ok(())
    /// # }
    /// ```
    fn commit_config(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// CPU and memory usage.
    fn get_environment(&mut self) -> impl Future<Output = Result<Environment>> + Send;

    /// Configured interfaces with their link state.
    fn get_interfaces(&mut self) -> impl Future<Output = Result<Interfaces>> + Send;

    /// Per-interface traffic counters.
    fn get_interfaces_counters(
        &mut self,
    ) -> impl Future<Output = Result<InterfacesCounters>> + Send;

    /// Addresses configured on each interface.
    fn get_interfaces_ip(&mut self) -> impl Future<Output = Result<InterfacesIp>> + Send;

    /// The ARP table.
    fn get_arp_table(&mut self) -> impl Future<Output = Result<Vec<ArpEntry>>> + Send;

    /// NTP association statistics.
    fn get_ntp_stats(&mut self) -> impl Future<Output = Result<Vec<NtpStats>>> + Send;

    /// NTP peer addresses.
    fn get_ntp_peers(&mut self) -> impl Future<Output = Result<NtpPeers>> + Send;

    /// BGP neighbors of the default routing instance.
    fn get_bgp_neighbors(&mut self) -> impl Future<Output = Result<BgpNeighbors>> + Send;

    /// SNMP service configuration.
    fn get_snmp_information(&mut self) -> impl Future<Output = Result<SnmpInformation>> + Send;

    /// General device facts.
    fn get_facts(&mut self) -> impl Future<Output = Result<Facts>> + Send;

    /// Local login users.
    fn get_users(&mut self) -> impl Future<Output = Result<Users>> + Send;

    /// Ping a destination from the device.
    ///
    /// A ping the device itself rejects (unknown host, bad interface) is
    /// reported as [`PingResult::Error`], not as an `Err`.
    fn ping(&mut self, options: &PingOptions) -> impl Future<Output = Result<PingResult>> + Send;
}
