//! Builder for creating VyOS drivers.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::vyos::VyosDriver;
use crate::error::{DriverError, Result};
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig, SshTransport};

/// Builder for constructing VyOS drivers.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use vyos_driver::driver::DriverBuilder;
///
/// # fn example() -> Result<(), vyos_driver::Error> {
/// let driver = DriverBuilder::new("192.168.1.1")
///     .username("vyos")
///     .private_key("/home/netops/.ssh/id_ed25519")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DriverBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    auth: AuthMethod,
    timeout: Duration,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl DriverBuilder {
    /// Create a new driver builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            auth: AuthMethod::None,
            timeout: Duration::from_secs(60),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Password(SecretString::from(password.into()));
        self
    }

    /// Set private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        };
        self
    }

    /// Set private key authentication with passphrase.
    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        };
        self
    }

    /// Set the timeout for connecting and for each command (default: 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the host key verification mode (default: accept new keys).
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a specific known_hosts file instead of `~/.ssh/known_hosts`.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Build the SSH configuration without creating a driver.
    pub fn ssh_config(self) -> Result<SshConfig> {
        let username = self.username.ok_or_else(|| DriverError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;

        if self.host.trim().is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "Host is required".to_string(),
            }
            .into());
        }

        Ok(SshConfig {
            host: self.host,
            port: self.port,
            username,
            auth: self.auth,
            timeout: self.timeout,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        })
    }

    /// Build the driver.
    ///
    /// This creates the driver but does not connect. Call `open()` on the
    /// returned driver to establish the connection.
    pub fn build(self) -> Result<VyosDriver<SshTransport>> {
        Ok(VyosDriver::new(self.ssh_config()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::CommandChannel;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = DriverBuilder::new("192.0.2.1")
            .username("vyos")
            .ssh_config()
            .unwrap();
        assert_eq!(config.port, 22);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(matches!(config.auth, AuthMethod::None));
        assert!(matches!(
            config.host_key_verification,
            HostKeyVerification::AcceptNew
        ));
        assert!(config.known_hosts_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = DriverBuilder::new("192.0.2.1")
            .port(2222)
            .username("vyos")
            .private_key_with_passphrase("/tmp/id_ed25519", "secret")
            .timeout(Duration::from_secs(5))
            .host_key_verification(HostKeyVerification::Strict)
            .known_hosts_path("/tmp/known_hosts")
            .ssh_config()
            .unwrap();

        assert_eq!(config.socket_addr(), "192.0.2.1:2222");
        assert!(matches!(
            config.auth,
            AuthMethod::PrivateKey {
                passphrase: Some(_),
                ..
            }
        ));
        assert_eq!(config.known_hosts_path, Some(PathBuf::from("/tmp/known_hosts")));
    }

    #[test]
    fn test_username_required() {
        let result = DriverBuilder::new("192.0.2.1").password("vyos").build();
        assert!(matches!(
            result,
            Err(Error::Driver(DriverError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_host_required() {
        assert!(DriverBuilder::new(" ").username("vyos").build().is_err());
    }

    #[test]
    fn test_build_is_unconnected() {
        let driver = DriverBuilder::new("192.0.2.1")
            .username("vyos")
            .password("vyos")
            .build()
            .unwrap();
        assert!(!driver.channel().is_open());
        assert_eq!(driver.channel().config().username, "vyos");
    }
}
