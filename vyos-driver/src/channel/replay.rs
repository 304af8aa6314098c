//! Replay channel serving recorded command output.

use std::collections::HashMap;
use std::io;

use log::debug;

use super::{Command, CommandChannel, ExecOutput};
use crate::error::{Result, TransportError};

/// A [`CommandChannel`] that answers from recorded output instead of a device.
///
/// Useful for exercising parsers end to end against captured CLI output.
/// Every executed command line is kept in [`history`](Self::history).
///
/// # Example
///
/// ```rust
/// use vyos_driver::channel::{Command, ReplayChannel};
///
/// let channel = ReplayChannel::new()
///     .with_output(Command::Shell("free"), "              total       used\n");
/// ```
#[derive(Debug, Default)]
pub struct ReplayChannel {
    outputs: HashMap<String, ExecOutput>,
    history: Vec<String>,
    open: bool,
}

impl ReplayChannel {
    /// Create an empty replay channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the stdout returned for a command.
    pub fn with_output(self, command: Command<'_>, stdout: impl Into<String>) -> Self {
        self.with_exec(command, ExecOutput::stdout(stdout))
    }

    /// Record the full output (stdout, stderr, exit status) for a command.
    pub fn with_exec(mut self, command: Command<'_>, output: ExecOutput) -> Self {
        self.outputs.insert(command.render(), output);
        self
    }

    /// Record output for a raw command line, matched verbatim.
    pub fn with_raw(mut self, line: impl Into<String>, output: ExecOutput) -> Self {
        self.outputs.insert(line.into(), output);
        self
    }

    /// Command lines executed so far, in order.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl CommandChannel for ReplayChannel {
    async fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    async fn execute(&mut self, command: &str) -> Result<ExecOutput> {
        debug!("replaying {:?}", command);
        self.history.push(command.to_string());
        self.outputs.get(command).cloned().ok_or_else(|| {
            TransportError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no recorded output for '{}'", command),
            ))
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_recorded_output() {
        let mut channel = ReplayChannel::new().with_output(Command::Shell("free"), "Mem: 1 2");
        channel.open().await.unwrap();

        let out = channel.execute("free").await.unwrap();
        assert_eq!(out.stdout, "Mem: 1 2");
        assert_eq!(channel.history(), &["free".to_string()]);
    }

    #[test]
    fn test_unknown_command_fails() {
        let mut channel = ReplayChannel::new();
        let result = tokio_test::block_on(channel.execute("show arp"));
        assert!(matches!(
            result,
            Err(crate::Error::Transport(TransportError::Io(_)))
        ));
    }
}
