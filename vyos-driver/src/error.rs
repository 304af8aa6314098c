//! Error types for vyos-driver.

use std::io;
use thiserror::Error;

/// Main error type for vyos-driver operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Command output did not have the expected structure
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A required configuration key or interface was not found
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

/// Transport layer errors (SSH connection, authentication, command execution).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host key is not present in known_hosts (strict verification)
    #[error("Host key for {host}:{port} is not in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Reading or writing known_hosts failed
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised when CLI output does not match the structure a parser expects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A line has a shape the parser does not recognize
    #[error("{context}: unexpected line '{line}'")]
    UnexpectedFormat { context: &'static str, line: String },

    /// A required pattern never matched the output
    #[error("{context}: no match for {pattern}")]
    MissingPattern {
        context: &'static str,
        pattern: &'static str,
    },

    /// A row has the wrong number of whitespace-separated fields
    #[error("{context}: expected {expected} fields, found {found} in '{line}'")]
    FieldCount {
        context: &'static str,
        expected: usize,
        found: usize,
        line: String,
    },

    /// A field that must be numeric is not
    #[error("{context}: invalid number '{value}'")]
    InvalidNumber { context: &'static str, value: String },

    /// A duration token in none of the recognized formats
    #[error("Unrecognized duration '{0}'")]
    UnknownDuration(String),

    /// A BGP neighbor row with a protocol version other than 4 or 6
    #[error("Unrecognized BGP version '{0}'")]
    UnknownBgpVersion(String),

    /// A login user whose configuration never sets a mandatory field
    #[error("User '{username}' has no {missing} configured")]
    IncompleteUser {
        username: String,
        missing: &'static str,
    },
}

/// Errors raised when a required configuration element is absent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// A configuration path is missing from the parsed tree
    #[error("Configuration key '{path}' not found")]
    MissingKey { path: String },

    /// An interface is configured but absent from the observed link state
    #[error("Interface '{name}' has no link state")]
    UnknownInterface { name: String },
}

/// Driver layer errors (connection state, candidate configuration).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Commit requested without a loaded candidate
    #[error("No candidate configuration loaded")]
    NoCandidate,

    /// The candidate configuration could not be loaded
    #[error("Candidate configuration unavailable: {message}")]
    CandidateSource { message: String },

    /// The device rejected the configuration transaction
    #[error("Commit failed: {message}")]
    CommitFailed { message: String },
}

/// Result type alias using vyos-driver's Error.
pub type Result<T> = std::result::Result<T, Error>;
