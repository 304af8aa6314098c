//! Candidate configuration staging and commit.
//!
//! A candidate is a list of `set ...`/`delete ...` lines held by the driver
//! until it is committed or discarded. Committing hands the lines to a
//! [`ConfigCommitter`], which renders them into a single remote command
//! applying them as one transaction.
//!
//! # Example
//!
//! ```rust
//! use vyos_driver::driver::{ConfigCommitter, WrapperCommitter};
//!
//! let lines = vec!["set system host-name edge1".to_string()];
//! let command = WrapperCommitter.transaction(&lines).unwrap();
//! assert!(command.starts_with("/opt/vyatta/sbin/vyatta-cfg-cmd-wrapper begin"));
//! ```

use std::io;
use std::path::PathBuf;

use log::debug;

use crate::channel::ExecOutput;
use crate::error::{DriverError, Result};

/// Script that drives a configuration session from a plain shell.
pub const CFG_CMD_WRAPPER: &str = "/opt/vyatta/sbin/vyatta-cfg-cmd-wrapper";

/// Where a candidate configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// A local file holding one configuration command per line.
    File(PathBuf),

    /// Configuration commands given inline.
    Text(String),
}

/// Staged configuration lines, blank lines removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateConfig {
    lines: Vec<String>,
}

impl CandidateConfig {
    /// Build a candidate from configuration text.
    ///
    /// Text without a single non-blank line is rejected.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines: Vec<String> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        if lines.is_empty() {
            return Err(DriverError::CandidateSource {
                message: "no configuration found".to_string(),
            }
            .into());
        }
        Ok(Self { lines })
    }

    /// Load a candidate from its source.
    pub async fn load(source: CandidateSource) -> Result<Self> {
        match source {
            CandidateSource::Text(text) => Self::from_text(&text),
            CandidateSource::File(path) => {
                debug!("reading candidate from {}", path.display());
                let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
                    let message = if e.kind() == io::ErrorKind::NotFound {
                        format!("config file {} is not found", path.display())
                    } else {
                        format!("cannot read {}: {}", path.display(), e)
                    };
                    DriverError::CandidateSource { message }
                })?;
                Self::from_text(&text)
            }
        }
    }

    /// The staged lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Applies configuration lines on the device as one transaction.
pub trait ConfigCommitter: Send + Sync {
    /// Render the shell command that applies `lines` and commits them.
    fn transaction(&self, lines: &[String]) -> Result<String>;

    /// Decide whether the transaction succeeded from its captured output.
    fn verify(&self, output: &ExecOutput) -> Result<()> {
        if output.has_stderr() {
            return Err(DriverError::CommitFailed {
                message: output.stderr.trim().to_string(),
            }
            .into());
        }
        match output.exit_status {
            Some(0) | None => Ok(()),
            Some(status) => Err(DriverError::CommitFailed {
                message: format!("exit status {}: {}", status, output.stdout.trim()),
            }
            .into()),
        }
    }
}

/// Commits through `vyatta-cfg-cmd-wrapper`.
///
/// The session is always ended; a failing `set` stops the chain before
/// `commit`, and the status of the chain is the status of the command.
///
/// ```text
/// W begin && W set ... && W commit; rc=$?; W end; exit $rc
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapperCommitter;

impl ConfigCommitter for WrapperCommitter {
    fn transaction(&self, lines: &[String]) -> Result<String> {
        if lines.is_empty() {
            return Err(DriverError::NoCandidate.into());
        }

        let mut steps = Vec::with_capacity(lines.len() + 2);
        steps.push(format!("{} begin", CFG_CMD_WRAPPER));
        steps.extend(lines.iter().map(|line| format!("{} {}", CFG_CMD_WRAPPER, line)));
        steps.push(format!("{} commit", CFG_CMD_WRAPPER));

        Ok(format!(
            "{}; rc=$?; {} end; exit $rc",
            steps.join(" && "),
            CFG_CMD_WRAPPER
        ))
    }
}
