use indexmap::IndexMap;
use serde::Serialize;

/// Vendor and model string reported for every VyOS device.
pub const VENDOR: &str = "VyOS";

/// General device facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facts {
    /// Seconds since boot.
    pub uptime: i64,
    pub vendor: String,
    pub os_version: String,
    pub serial_number: String,
    pub model: String,
    pub hostname: String,
    pub fqdn: String,
    pub interface_list: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FanStatus {
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TemperatureStatus {
    pub temperature: Option<f64>,
    pub is_alert: Option<bool>,
    pub is_critical: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PowerStatus {
    pub status: Option<bool>,
    pub capacity: Option<f64>,
    pub output: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuUsage {
    #[serde(rename = "%usage")]
    pub usage: u32,
}

/// Memory figures in kilobytes, as reported by `free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub available_ram: u64,
    pub used_ram: u64,
}

/// Environment snapshot. Fans, temperature and power are not observable
/// on VyOS and are always unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    pub fans: FanStatus,
    pub temperature: TemperatureStatus,
    pub power: PowerStatus,
    /// CPU usage keyed by core id; only the aggregate `"0"` is reported.
    pub cpu: IndexMap<String, CpuUsage>,
    pub memory: MemoryUsage,
}

/// SNMP community settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnmpCommunity {
    pub acl: Option<String>,
    /// Authorization mode, `ro` or `rw`.
    pub mode: String,
}

/// SNMP service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnmpInformation {
    pub community: IndexMap<String, SnmpCommunity>,
    pub contact: String,
    pub location: String,
}

/// A local login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// 15 for `admin` users, 0 otherwise.
    pub level: u8,
    pub password: String,
    pub sshkeys: Vec<String>,
}
