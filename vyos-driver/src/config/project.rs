//! Projections of a configuration tree onto the normalized records.

use indexmap::IndexMap;
use log::debug;

use super::tree::ConfigNode;
use crate::error::{LookupError, Result};
use crate::model::{Interface, Interfaces, SnmpCommunity, SnmpInformation, LAST_FLAPPED_UNKNOWN};
use crate::parse::interfaces::LinkState;

/// Hostname and domain configured under `system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemIdentity {
    pub hostname: String,
    pub fqdn: String,
}

/// Every `(type, name, node)` under `interfaces`, in configuration order.
fn configured_interfaces(tree: &ConfigNode) -> Result<Vec<(&str, &str, &ConfigNode)>> {
    let interfaces = tree.path(&["interfaces"])?;
    Ok(interfaces
        .children()
        .flat_map(|(kind, section)| {
            section
                .children()
                .map(move |(name, node)| (kind, name, node))
        })
        .collect())
}

/// Names of all configured interfaces, across interface types.
pub fn interface_names(tree: &ConfigNode) -> Result<Vec<String>> {
    Ok(configured_interfaces(tree)?
        .into_iter()
        .map(|(_, name, _)| name.to_string())
        .collect())
}

/// Merge configured interfaces with their observed link state.
///
/// Description, speed and `hw-id` are optional in the configuration and
/// left unknown when absent. A configured interface missing from
/// `link_states` is a lookup error.
pub fn project_interfaces(
    tree: &ConfigNode,
    link_states: &IndexMap<String, LinkState>,
) -> Result<Interfaces> {
    let mut interfaces = Interfaces::new();

    for (kind, name, node) in configured_interfaces(tree)? {
        let state = link_states
            .get(name)
            .ok_or_else(|| LookupError::UnknownInterface {
                name: name.to_string(),
            })?;
        debug!("projecting {} interface {}", kind, name);

        interfaces.insert(
            name.to_string(),
            Interface {
                is_up: state.is_up(),
                is_enabled: state.is_enabled(),
                description: node.leaf("description").map(str::to_string),
                last_flapped: LAST_FLAPPED_UNKNOWN,
                speed: node.leaf("speed").map(str::to_string),
                mac_address: node.leaf("hw-id").map(str::to_string),
            },
        );
    }

    Ok(interfaces)
}

/// SNMP communities, contact and location from `service snmp`.
///
/// At least the `community` subtree must be present and every community
/// must carry an `authorization` mode. ACLs are not
/// represented in the configuration and stay unknown.
pub fn project_snmp(tree: &ConfigNode) -> Result<SnmpInformation> {
    const SNMP: [&str; 2] = ["service", "snmp"];

    tree.path(&SNMP)?;
    let communities = tree.path(&["service", "snmp", "community"])?;

    let mut community = IndexMap::new();
    for (name, _) in communities.children() {
        let mode = tree.require(&["service", "snmp", "community", name, "authorization"])?;
        community.insert(
            name.to_string(),
            SnmpCommunity {
                acl: None,
                mode: mode.to_string(),
            },
        );
    }

    Ok(SnmpInformation {
        community,
        contact: tree.require(&["service", "snmp", "contact"])?.to_string(),
        location: tree.require(&["service", "snmp", "location"])?.to_string(),
    })
}

/// `system host-name` and `system domain-name`, both mandatory.
pub fn project_system_identity(tree: &ConfigNode) -> Result<SystemIdentity> {
    Ok(SystemIdentity {
        hostname: tree.require(&["system", "host-name"])?.to_string(),
        fqdn: tree.require(&["system", "domain-name"])?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigTreeParser, VyattaConfigParser};
    use crate::parse::interfaces::parse_link_states;

    const CONFIG: &str = r#"interfaces {
    ethernet eth0 {
        address 192.168.1.1/24
        description Management
        hw-id 00:50:56:86:8c:26
        speed auto
    }
    ethernet eth1 {
        address 192.168.1.2/24
        disable
    }
    loopback lo {
    }
}
service {
    snmp {
        community private {
            authorization rw
        }
        community public {
            authorization ro
        }
        contact "noc@example.com"
        location "rack 4"
    }
}
system {
    domain-name example.com
    host-name vyos
}
"#;

    const SHOW_INTERFACES: &str = "\
Codes: S - State, L - Link, u - Up, D - Down, A - Admin Down
Interface        IP Address                        S/L  Description
---------        ----------                        ---  -----------
eth0             192.168.1.1/24                    u/u  Management
eth1             192.168.1.2/24                    A/D
lo               127.0.0.1/8                       u/u
                 ::1/128
";

    fn tree() -> ConfigNode {
        VyattaConfigParser.parse(CONFIG).unwrap()
    }

    #[test]
    fn test_interfaces() {
        let states = parse_link_states(SHOW_INTERFACES);
        let interfaces = project_interfaces(&tree(), &states).unwrap();

        let eth0 = &interfaces["eth0"];
        assert!(eth0.is_up);
        assert!(eth0.is_enabled);
        assert_eq!(eth0.description.as_deref(), Some("Management"));
        assert_eq!(eth0.speed.as_deref(), Some("auto"));
        assert_eq!(eth0.mac_address.as_deref(), Some("00:50:56:86:8c:26"));
        assert_eq!(eth0.last_flapped, -1);

        let eth1 = &interfaces["eth1"];
        assert!(!eth1.is_up);
        assert!(!eth1.is_enabled);
        assert_eq!(eth1.description, None);
        assert_eq!(eth1.mac_address, None);

        assert!(interfaces.contains_key("lo"));
    }

    #[test]
    fn test_interface_missing_from_link_state() {
        let mut states = parse_link_states(SHOW_INTERFACES);
        states.shift_remove("eth1");

        match project_interfaces(&tree(), &states) {
            Err(crate::Error::Lookup(LookupError::UnknownInterface { name })) => {
                assert_eq!(name, "eth1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_observed_only_interface_is_ignored() {
        let mut states = parse_link_states(SHOW_INTERFACES);
        let eth0 = states["eth0"];
        states.insert("br0".to_string(), eth0);

        let interfaces = project_interfaces(&tree(), &states).unwrap();
        assert!(!interfaces.contains_key("br0"));
    }

    #[test]
    fn test_interface_names() {
        assert_eq!(interface_names(&tree()).unwrap(), vec!["eth0", "eth1", "lo"]);
    }

    #[test]
    fn test_snmp() {
        let snmp = project_snmp(&tree()).unwrap();
        assert_eq!(snmp.contact, "noc@example.com");
        assert_eq!(snmp.location, "rack 4");
        assert_eq!(snmp.community["public"].mode, "ro");
        assert_eq!(snmp.community["private"].mode, "rw");
        assert_eq!(snmp.community["public"].acl, None);
    }

    #[test]
    fn test_snmp_not_configured() {
        let tree = VyattaConfigParser
            .parse("system {\n    host-name vyos\n}\n")
            .unwrap();
        match project_snmp(&tree) {
            Err(crate::Error::Lookup(LookupError::MissingKey { path })) => {
                assert_eq!(path, "service.snmp");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_snmp_without_communities() {
        let tree = VyattaConfigParser
            .parse("service {\n    snmp {\n        contact noc\n        location lab\n    }\n}\n")
            .unwrap();
        match project_snmp(&tree) {
            Err(crate::Error::Lookup(LookupError::MissingKey { path })) => {
                assert_eq!(path, "service.snmp.community");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_system_identity() {
        let identity = project_system_identity(&tree()).unwrap();
        assert_eq!(identity.hostname, "vyos");
        assert_eq!(identity.fqdn, "example.com");
    }

    #[test]
    fn test_missing_domain_name() {
        let tree = VyattaConfigParser
            .parse("system {\n    host-name vyos\n}\n")
            .unwrap();
        assert!(project_system_identity(&tree).is_err());
    }
}
