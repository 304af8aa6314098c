//! VyOS implementation of [`NetworkDriver`].

use std::sync::Arc;

use log::{debug, trace, warn};

use super::NetworkDriver;
use super::commit::{CandidateConfig, CandidateSource, ConfigCommitter, WrapperCommitter};
use crate::channel::{Command, CommandChannel, ExecOutput};
use crate::config::{ConfigNode, ConfigTreeParser, VyattaConfigParser, project};
use crate::error::{DriverError, Result};
use crate::model::{
    ArpEntry, BgpGlobal, BgpNeighbors, Environment, Facts, Interfaces, InterfacesCounters,
    InterfacesIp, NtpPeers, NtpStats, PingOptions, PingResult, SnmpInformation, Users, VENDOR,
};
use crate::parse;
use crate::transport::{SshConfig, SshTransport};

/// Driver for a single VyOS device.
///
/// Every getter issues its commands over the wrapped [`CommandChannel`] and
/// parses the output from scratch; nothing is cached between calls.
///
/// # Example
///
/// ```rust,no_run
/// use vyos_driver::driver::{DriverBuilder, NetworkDriver};
///
/// # async fn example() -> Result<(), vyos_driver::Error> {
/// let mut driver = DriverBuilder::new("192.168.1.1")
///     .username("vyos")
///     .password("vyos")
///     .build()?;
/// driver.open().await?;
///
/// let facts = driver.get_facts().await?;
/// println!("{} runs VyOS {}", facts.hostname, facts.os_version);
///
/// driver.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct VyosDriver<C: CommandChannel> {
    channel: C,
    config_parser: Arc<dyn ConfigTreeParser>,
    committer: Arc<dyn ConfigCommitter>,
    candidate: Option<CandidateConfig>,
}

impl VyosDriver<SshTransport> {
    /// Create an unconnected driver talking SSH.
    pub fn new(config: SshConfig) -> Self {
        Self::with_channel(SshTransport::new(config))
    }
}

impl<C: CommandChannel> VyosDriver<C> {
    /// Create a driver over an existing channel.
    pub fn with_channel(channel: C) -> Self {
        Self {
            channel,
            config_parser: Arc::new(VyattaConfigParser),
            committer: Arc::new(WrapperCommitter),
            candidate: None,
        }
    }

    /// Replace the `show configuration` parser.
    pub fn with_config_parser(mut self, parser: Arc<dyn ConfigTreeParser>) -> Self {
        self.config_parser = parser;
        self
    }

    /// Replace the configuration committer.
    pub fn with_committer(mut self, committer: Arc<dyn ConfigCommitter>) -> Self {
        self.committer = committer;
        self
    }

    /// Get the underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// The staged candidate, if any.
    pub fn candidate(&self) -> Option<&CandidateConfig> {
        self.candidate.as_ref()
    }

    /// Run a raw command line.
    async fn execute(&mut self, line: &str) -> Result<ExecOutput> {
        if !self.channel.is_open() {
            return Err(DriverError::NotConnected.into());
        }

        let output = self.channel.execute(line).await?;
        trace!(
            "{} bytes stdout, {} bytes stderr, exit {:?}",
            output.stdout.len(),
            output.stderr.len(),
            output.exit_status
        );
        Ok(output)
    }

    /// Run a command and capture its full output.
    async fn run(&mut self, command: Command<'_>) -> Result<ExecOutput> {
        debug!("running {:?}", command.as_str());
        self.execute(&command.render()).await
    }

    /// Run a command and keep only its stdout.
    async fn stdout(&mut self, command: Command<'_>) -> Result<String> {
        let output = self.run(command).await?;
        if output.has_stderr() {
            warn!(
                "{:?} wrote to stderr: {}",
                command.as_str(),
                output.stderr.trim()
            );
        }
        Ok(output.stdout)
    }

    /// Fetch and parse `show configuration`.
    async fn configuration(&mut self) -> Result<ConfigNode> {
        let text = self.stdout(Command::Operational("show configuration")).await?;
        self.config_parser.parse(&text)
    }
}

impl<C: CommandChannel> NetworkDriver for VyosDriver<C> {
    async fn open(&mut self) -> Result<()> {
        self.channel.open().await
    }

    async fn close(&mut self) -> Result<()> {
        self.channel.close().await
    }

    fn is_open(&self) -> bool {
        self.channel.is_open()
    }

    async fn load_merge_candidate(&mut self, source: CandidateSource) -> Result<()> {
        let candidate = CandidateConfig::load(source).await?;
        debug!("staged {} candidate lines", candidate.lines().len());
        self.candidate = Some(candidate);
        Ok(())
    }

    async fn discard_config(&mut self) -> Result<()> {
        if self.candidate.take().is_some() {
            debug!("discarded candidate");
        }
        Ok(())
    }

    async fn commit_config(&mut self) -> Result<()> {
        let candidate = self.candidate.as_ref().ok_or(DriverError::NoCandidate)?;
        let transaction = self.committer.transaction(candidate.lines())?;

        debug!("committing {} candidate lines", candidate.lines().len());
        let output = self.execute(&transaction).await?;
        self.committer.verify(&output)?;

        self.candidate = None;
        Ok(())
    }

    async fn get_environment(&mut self) -> Result<Environment> {
        let vmstat = self.stdout(Command::Shell("vmstat")).await?;
        let free = self.stdout(Command::Shell("free")).await?;
        parse::environment::parse_environment(&vmstat, &free)
    }

    async fn get_interfaces(&mut self) -> Result<Interfaces> {
        let text = self.stdout(Command::Operational("show interfaces")).await?;
        let link_states = parse::interfaces::parse_link_states(&text);
        let tree = self.configuration().await?;
        project::project_interfaces(&tree, &link_states)
    }

    async fn get_interfaces_counters(&mut self) -> Result<InterfacesCounters> {
        let text = self
            .stdout(Command::Operational("show interfaces detail"))
            .await?;
        parse::counters::parse_interface_counters(&text)
    }

    async fn get_interfaces_ip(&mut self) -> Result<InterfacesIp> {
        let text = self.stdout(Command::Operational("show interfaces")).await?;
        parse::interfaces::parse_interface_addresses(&text)
    }

    async fn get_arp_table(&mut self) -> Result<Vec<ArpEntry>> {
        let text = self.stdout(Command::Operational("show arp")).await?;
        parse::arp::parse_arp_table(&text)
    }

    async fn get_ntp_stats(&mut self) -> Result<Vec<NtpStats>> {
        let text = self.stdout(Command::Shell("ntpq -np")).await?;
        parse::ntp::parse_ntp_stats(&text)
    }

    async fn get_ntp_peers(&mut self) -> Result<NtpPeers> {
        let text = self.stdout(Command::Shell("ntpq -np")).await?;
        parse::ntp::parse_ntp_peers(&text)
    }

    async fn get_bgp_neighbors(&mut self) -> Result<BgpNeighbors> {
        let text = self
            .stdout(Command::Operational("show ip bgp summary"))
            .await?;
        let summary = parse::bgp::parse_bgp_summary(&text)?;

        let mut global = BgpGlobal {
            router_id: summary.router_id,
            local_as: summary.local_as,
            peers: Default::default(),
        };

        for row in &summary.rows {
            let command = format!("show ip bgp neighbors {}", row.peer);
            let detail = self.stdout(Command::Operational(&command)).await?;
            let detail = parse::bgp::parse_neighbor_detail(&detail)?;
            global.peers.insert(
                row.peer.clone(),
                parse::bgp::build_peer(row, global.local_as, &detail),
            );
        }

        Ok(BgpNeighbors { global })
    }

    async fn get_snmp_information(&mut self) -> Result<SnmpInformation> {
        let tree = self.configuration().await?;
        project::project_snmp(&tree)
    }

    async fn get_facts(&mut self) -> Result<Facts> {
        let text = self.stdout(Command::Operational("show version")).await?;
        let version = parse::version::parse_version(&text)?;

        let tree = self.configuration().await?;
        let identity = project::project_system_identity(&tree)?;

        Ok(Facts {
            uptime: version.uptime,
            vendor: VENDOR.to_string(),
            os_version: version.os_version,
            serial_number: version.serial_number,
            model: VENDOR.to_string(),
            hostname: identity.hostname,
            fqdn: identity.fqdn,
            interface_list: project::interface_names(&tree)?,
        })
    }

    async fn get_users(&mut self) -> Result<Users> {
        let text = self
            .stdout(Command::Operational("show configuration commands"))
            .await?;
        parse::users::parse_users(&text)
    }

    async fn ping(&mut self, options: &PingOptions) -> Result<PingResult> {
        let command = options.command();
        let output = self.run(Command::Operational(&command)).await?;
        parse::ping::parse_ping(&output.stdout, &output.stderr, &options.destination)
    }
}
