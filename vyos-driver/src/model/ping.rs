use serde::Serialize;

/// Parameters of a ping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingOptions {
    pub destination: String,
    /// Source interface, if the probes should leave through a specific one.
    pub source: Option<String>,
    pub ttl: u8,
    /// Overall deadline in seconds.
    pub timeout: u32,
    /// Payload size in bytes.
    pub size: u32,
    pub count: u32,
}

impl PingOptions {
    /// Ping `destination` with the default parameters.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            source: None,
            ttl: 255,
            timeout: 2,
            size: 100,
            count: 5,
        }
    }

    /// Set the source interface.
    pub fn source(mut self, interface: impl Into<String>) -> Self {
        self.source = Some(interface.into());
        self
    }

    /// Set the TTL of the probes.
    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the deadline in seconds.
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the payload size.
    pub fn size(mut self, bytes: u32) -> Self {
        self.size = bytes;
        self
    }

    /// Set the number of probes.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Render the operational-mode ping command.
    pub fn command(&self) -> String {
        let mut cmd = format!(
            "ping {} ttl {} deadline {} size {} count {}",
            self.destination, self.ttl, self.timeout, self.size, self.count
        );
        if let Some(ref source) = self.source {
            cmd.push_str(" interface ");
            cmd.push_str(source);
        }
        cmd
    }
}

/// Round-trip time observed towards one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingProbe {
    pub ip_address: String,
    pub rtt: Option<f64>,
}

/// Summary of a completed ping run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingSuccess {
    pub probes_sent: u32,
    pub packet_loss: u32,
    pub rtt_min: Option<f64>,
    pub rtt_avg: Option<f64>,
    pub rtt_stdev: Option<f64>,
    pub results: Vec<PingProbe>,
}

/// Outcome of a ping: exactly one of `error` or `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PingResult {
    Error(String),
    Success(PingSuccess),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let opts = PingOptions::new("192.0.2.1");
        assert_eq!(
            opts.command(),
            "ping 192.0.2.1 ttl 255 deadline 2 size 100 count 5"
        );
    }

    #[test]
    fn test_command_with_source() {
        let opts = PingOptions::new("192.0.2.1").source("eth1").count(3).ttl(64);
        assert_eq!(
            opts.command(),
            "ping 192.0.2.1 ttl 64 deadline 2 size 100 count 3 interface eth1"
        );
    }

    #[test]
    fn test_result_serializes_as_single_key() {
        let err = serde_json::to_value(PingResult::Error("unknown host".into())).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "unknown host" }));

        let ok = serde_json::to_value(PingResult::Success(PingSuccess {
            probes_sent: 5,
            packet_loss: 0,
            rtt_min: Some(0.3),
            rtt_avg: Some(0.4),
            rtt_stdev: None,
            results: vec![],
        }))
        .unwrap();
        assert_eq!(ok["success"]["probes_sent"], 5);
        assert!(ok["success"]["rtt_stdev"].is_null());
        assert!(ok.get("error").is_none());
    }
}
