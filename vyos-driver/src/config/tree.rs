//! Hierarchical `show configuration` trees.
//!
//! VyOS prints its configuration as nested brace blocks:
//!
//! ```text
//! interfaces {
//!     ethernet eth0 {
//!         address 192.168.1.1/24
//!         description "Link to core"
//!         hw-id 00:50:56:86:8c:26
//!     }
//! }
//! system {
//!     host-name vyos
//! }
//! /* Warning: Do not remove the following line. */
//! ```
//!
//! A block opened by several words (`ethernet eth0 {`) nests one level per
//! word, so the address above lives at `interfaces.ethernet.eth0.address`.

use indexmap::IndexMap;
use log::trace;
use serde::Serialize;

use crate::error::{LookupError, ParseError, Result};

const CONTEXT: &str = "configuration tree";

/// One node of a parsed configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// A single value. Valueless statements hold an empty string.
    Leaf(String),
    /// A statement repeated with several values (`address` on a
    /// multi-homed interface).
    List(Vec<String>),
    /// A block of named children, in configuration order.
    Section(IndexMap<String, ConfigNode>),
}

impl Default for ConfigNode {
    fn default() -> Self {
        ConfigNode::Section(IndexMap::new())
    }
}

impl ConfigNode {
    /// Child `key` of a section. Leaves have no children.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            ConfigNode::Section(children) => children.get(key),
            _ => None,
        }
    }

    /// Walk `path` from this node.
    pub fn path(&self, path: &[&str]) -> Result<&ConfigNode> {
        path.iter()
            .try_fold(self, |node, key| node.get(key))
            .ok_or_else(|| {
                LookupError::MissingKey {
                    path: path.join("."),
                }
                .into()
            })
    }

    /// The value of this node if it is a leaf. For a list, the first value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::Leaf(value) => Some(value),
            ConfigNode::List(values) => values.first().map(String::as_str),
            ConfigNode::Section(_) => None,
        }
    }

    /// Optional leaf child: `None` when the key is absent.
    pub fn leaf(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigNode::as_str)
    }

    /// Mandatory leaf at `path`.
    pub fn require(&self, path: &[&str]) -> Result<&str> {
        self.path(path)?.as_str().ok_or_else(|| {
            LookupError::MissingKey {
                path: path.join("."),
            }
            .into()
        })
    }

    /// Every value of a leaf or list node.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ConfigNode::Leaf(value) => vec![value.as_str()],
            ConfigNode::List(values) => values.iter().map(String::as_str).collect(),
            ConfigNode::Section(_) => Vec::new(),
        }
    }

    /// Named children of a section, empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        let children = match self {
            ConfigNode::Section(children) => Some(children),
            _ => None,
        };
        children
            .into_iter()
            .flat_map(|c| c.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// This node as a section, replacing a leaf value if needed.
    fn make_section(&mut self) -> &mut IndexMap<String, ConfigNode> {
        match self {
            ConfigNode::Section(children) => children,
            other => {
                *other = ConfigNode::default();
                other.make_section()
            }
        }
    }

    /// Append a leaf value, turning a repeated key into a list.
    fn push_value(children: &mut IndexMap<String, ConfigNode>, key: &str, value: String) {
        let Some(node) = children.get_mut(key) else {
            children.insert(key.to_string(), ConfigNode::Leaf(value));
            return;
        };

        *node = match std::mem::take(node) {
            ConfigNode::Leaf(first) => ConfigNode::List(vec![first, value]),
            ConfigNode::List(mut values) => {
                values.push(value);
                ConfigNode::List(values)
            }
            ConfigNode::Section(_) => ConfigNode::Leaf(value),
        };
    }
}

/// Turns `show configuration` output into a [`ConfigNode`] tree.
///
/// Implementations must be usable from any task holding the driver.
pub trait ConfigTreeParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<ConfigNode>;
}

/// Parser for the curly-brace format printed by Vyatta-derived systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct VyattaConfigParser;

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Split a block header such as `ethernet eth0` into its path words.
///
/// A double-quoted name (`community "my community"`) is a single word.
fn header_words(header: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut rest = header.trim_start();
    while !rest.is_empty() {
        let end = match rest.strip_prefix('"') {
            Some(quoted) => quoted.find('"').map_or(rest.len(), |i| i + 2),
            None => rest.find(char::is_whitespace).unwrap_or(rest.len()),
        };
        words.push(unquote(&rest[..end]));
        rest = rest[end..].trim_start();
    }
    words
}

impl VyattaConfigParser {
    fn parse_block<'a, I>(lines: &mut I, nested: bool) -> Result<IndexMap<String, ConfigNode>>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut children = IndexMap::new();

        while let Some(raw) = lines.next() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("/*") {
                continue;
            }

            if line == "}" {
                if nested {
                    return Ok(children);
                }
                return Err(ParseError::UnexpectedFormat {
                    context: CONTEXT,
                    line: raw.to_string(),
                }
                .into());
            }

            if let Some(header) = line.strip_suffix('{') {
                let words = header_words(header);
                let Some((first, rest)) = words.split_first() else {
                    return Err(ParseError::UnexpectedFormat {
                        context: CONTEXT,
                        line: raw.to_string(),
                    }
                    .into());
                };

                let block = Self::parse_block(lines, true)?;

                // One nested section per header word
                let mut node = children.entry(first.to_string()).or_default();
                for word in rest {
                    node = node.make_section().entry(word.to_string()).or_default();
                }
                node.make_section().extend(block);
                continue;
            }

            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key, unquote(value.trim()).to_string()),
                None => (line, String::new()),
            };
            trace!("config leaf {} = {:?}", key, value);
            ConfigNode::push_value(&mut children, key, value);
        }

        if nested {
            return Err(ParseError::MissingPattern {
                context: CONTEXT,
                pattern: "}",
            }
            .into());
        }
        Ok(children)
    }
}

impl ConfigTreeParser for VyattaConfigParser {
    fn parse(&self, text: &str) -> Result<ConfigNode> {
        let mut lines = text.lines();
        Ok(ConfigNode::Section(Self::parse_block(&mut lines, false)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_CONFIGURATION: &str = r#"interfaces {
    ethernet eth0 {
        address 192.168.1.1/24
        description "Link to core"
        hw-id 00:50:56:86:8c:26
    }
    ethernet eth1 {
        address 10.0.0.1/24
        address 2001:db8::1/64
        hw-id 00:50:56:86:8c:27
    }
    loopback lo {
    }
}
service {
    snmp {
        community public {
            authorization ro
        }
        contact "noc@example.com"
        location "rack 4"
    }
    ssh {
        disable-host-validation
    }
}
system {
    domain-name example.com
    host-name vyos
}
/* Warning: Do not remove the following line. */
/* === vyatta-config-version: "system@6:quagga@2" === */
"#;

    #[test]
    fn test_header_words() {
        assert_eq!(header_words("ethernet eth0 "), vec!["ethernet", "eth0"]);
        assert_eq!(
            header_words(r#"community "my community" "#),
            vec!["community", "my community"]
        );
        assert_eq!(header_words(r#"rule "open"#), vec!["rule", "\"open"]);
    }

    #[test]
    fn test_quoted_multi_word_header() {
        let tree = VyattaConfigParser
            .parse(
                "service {\n    snmp {\n        community \"my community\" {\n            authorization ro\n        }\n    }\n}\n",
            )
            .unwrap();
        let communities = tree.path(&["service", "snmp", "community"]).unwrap();
        let names: Vec<&str> = communities.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["my community"]);
        assert_eq!(
            tree.require(&["service", "snmp", "community", "my community", "authorization"])
                .unwrap(),
            "ro"
        );
    }

    fn parse() -> ConfigNode {
        VyattaConfigParser.parse(SHOW_CONFIGURATION).unwrap()
    }

    #[test]
    fn test_nested_headers() {
        let tree = parse();
        let eth0 = tree.path(&["interfaces", "ethernet", "eth0"]).unwrap();
        assert_eq!(eth0.leaf("hw-id"), Some("00:50:56:86:8c:26"));
        assert_eq!(eth0.leaf("description"), Some("Link to core"));
        assert_eq!(eth0.leaf("speed"), None);
    }

    #[test]
    fn test_sibling_blocks_share_parent() {
        let tree = parse();
        let ethernet = tree.path(&["interfaces", "ethernet"]).unwrap();
        let names: Vec<&str> = ethernet.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["eth0", "eth1"]);
    }

    #[test]
    fn test_repeated_leaf_becomes_list() {
        let tree = parse();
        let address = tree
            .path(&["interfaces", "ethernet", "eth1", "address"])
            .unwrap();
        assert_eq!(address.values(), vec!["10.0.0.1/24", "2001:db8::1/64"]);
        assert_eq!(address.as_str(), Some("10.0.0.1/24"));
    }

    #[test]
    fn test_empty_block_and_bare_statement() {
        let tree = parse();
        let lo = tree.path(&["interfaces", "loopback", "lo"]).unwrap();
        assert_eq!(lo.children().count(), 0);
        assert_eq!(
            tree.require(&["service", "ssh", "disable-host-validation"])
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_require() {
        let tree = parse();
        assert_eq!(tree.require(&["system", "host-name"]).unwrap(), "vyos");
        assert_eq!(
            tree.require(&["service", "snmp", "location"]).unwrap(),
            "rack 4"
        );

        match tree.require(&["system", "time-zone"]) {
            Err(crate::Error::Lookup(LookupError::MissingKey { path })) => {
                assert_eq!(path, "system.time-zone");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        // A section is not a value
        assert!(tree.require(&["system"]).is_err());
    }

    #[test]
    fn test_comments_skipped() {
        let tree = parse();
        let top: Vec<&str> = tree.children().map(|(name, _)| name).collect();
        assert_eq!(top, vec!["interfaces", "service", "system"]);
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(VyattaConfigParser.parse("system {\n host-name vyos\n").is_err());
        assert!(VyattaConfigParser.parse("host-name vyos\n}\n").is_err());
    }

    #[test]
    fn test_serializes_as_nested_mapping() {
        let tree = VyattaConfigParser
            .parse("system {\n    host-name vyos\n    name-server 1.1.1.1\n    name-server 9.9.9.9\n}\n")
            .unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "system": {
                    "host-name": "vyos",
                    "name-server": ["1.1.1.1", "9.9.9.9"]
                }
            })
        );
    }
}
