//! VyOS configuration trees and their projections.
//!
//! `show configuration` output is first parsed into a generic
//! [`ConfigNode`] tree by a [`ConfigTreeParser`], then the projectors in
//! [`project`] pick the parts the driver reports on.

pub mod project;
mod tree;

pub use project::SystemIdentity;
pub use tree::{ConfigNode, ConfigTreeParser, VyattaConfigParser};
