//! Command channel abstraction.
//!
//! A [`CommandChannel`] runs one command at a time on the device and hands
//! back its captured stdout and stderr. The SSH transport is the production
//! implementation; [`ReplayChannel`] serves canned output for offline use.

mod ansi;
mod replay;

pub use ansi::strip_ansi;
pub use replay::ReplayChannel;

use std::future::Future;

use crate::error::Result;

/// Prefix that runs a command through the VyOS operational-mode wrapper.
pub const OP_MODE_PREFIX: &str = ". /etc/bash_completion; eval _vyatta_op_run ";

/// A command to run on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// A VyOS operational-mode command (`show ...`, `ping ...`).
    Operational(&'a str),

    /// A plain shell command (`vmstat`, `ntpq -np`).
    Shell(&'a str),
}

impl Command<'_> {
    /// Render the command line sent to the remote shell.
    pub fn render(&self) -> String {
        match self {
            Command::Operational(cmd) => format!("{}{}", OP_MODE_PREFIX, cmd),
            Command::Shell(cmd) => (*cmd).to_string(),
        }
    }

    /// The command as the caller wrote it, without the wrapper prefix.
    pub fn as_str(&self) -> &str {
        match self {
            Command::Operational(cmd) | Command::Shell(cmd) => cmd,
        }
    }
}

/// Captured output of a single command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output, ANSI escapes removed.
    pub stdout: String,

    /// Standard error, ANSI escapes removed.
    pub stderr: String,

    /// Remote exit status, when the server reported one.
    pub exit_status: Option<u32>,
}

impl ExecOutput {
    /// Output with only stdout populated.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_status: Some(0),
        }
    }

    /// Check if the command wrote anything to stderr.
    pub fn has_stderr(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Trait for anything that can run commands against a VyOS device.
///
/// Implementations must serialize commands: at most one is in flight at a
/// time, and the full output is returned without truncation.
pub trait CommandChannel: Send {
    /// Open the underlying session.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the underlying session.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Check if the session is open.
    fn is_open(&self) -> bool;

    /// Run a command line and capture its output.
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<ExecOutput>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operational_command_is_wrapped() {
        let cmd = Command::Operational("show interfaces");
        assert_eq!(
            cmd.render(),
            ". /etc/bash_completion; eval _vyatta_op_run show interfaces"
        );
        assert_eq!(cmd.as_str(), "show interfaces");
    }

    #[test]
    fn test_shell_command_is_verbatim() {
        let cmd = Command::Shell("ntpq -np");
        assert_eq!(cmd.render(), "ntpq -np");
    }

    #[test]
    fn test_has_stderr_ignores_whitespace() {
        let mut out = ExecOutput::stdout("ok");
        assert!(!out.has_stderr());
        out.stderr = "\n".to_string();
        assert!(!out.has_stderr());
        out.stderr = "ping: unknown host\n".to_string();
        assert!(out.has_stderr());
    }
}
