//! Ping result assembly.
//!
//! ```text
//! PING 192.168.1.1 (192.168.1.1) 100(128) bytes of data.
//! 108 bytes from 192.168.1.1: icmp_req=1 ttl=255 time=0.480 ms
//! ...
//!
//! --- 192.168.1.1 ping statistics ---
//! 5 packets transmitted, 5 received, 0% packet loss, time 3997ms
//! rtt min/avg/max/mdev = 0.307/0.396/0.480/0.061 ms
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::{fields, number};
use crate::error::{ParseError, Result};
use crate::model::{PingProbe, PingResult, PingSuccess};

const CONTEXT: &str = "ping";

static RTT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\d.]+)/([\d.]+)/([\d.]+)/[\d.]+").expect("static regex")
});

/// Turn the output of one ping run into a result.
///
/// Any stderr output makes the run an error carrying that text. Otherwise
/// the output is split on newlines, keeping the empty piece after the
/// final one: the packet summary is the third piece from the end and the
/// round-trip figures the second. When every probe is lost ping prints a
/// bare newline in place of the `rtt` line and the figures are unknown.
pub fn parse_ping(stdout: &str, stderr: &str, destination: &str) -> Result<PingResult> {
    if !stderr.trim().is_empty() {
        return Ok(PingResult::Error(stderr.to_string()));
    }

    let lines: Vec<&str> = stdout.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let [.., summary, rtt_line, _] = lines[..] else {
        return Err(ParseError::MissingPattern {
            context: CONTEXT,
            pattern: "packets transmitted",
        }
        .into());
    };

    let cols = fields(CONTEXT, summary, 4)?;
    let probes_sent: u32 = number(CONTEXT, cols[0])?;
    let received: u32 = number(CONTEXT, cols[3])?;
    let packet_loss = probes_sent.checked_sub(received).ok_or_else(|| {
        ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: summary.to_string(),
        }
    })?;

    let (rtt_min, rtt_avg) = match RTT.captures(rtt_line) {
        Some(caps) => (
            Some(number::<f64>(CONTEXT, &caps[1])?),
            Some(number::<f64>(CONTEXT, &caps[2])?),
        ),
        None => (None, None),
    };

    Ok(PingResult::Success(PingSuccess {
        probes_sent,
        packet_loss,
        rtt_min,
        rtt_avg,
        rtt_stdev: None,
        results: vec![PingProbe {
            ip_address: destination.to_string(),
            rtt: rtt_avg,
        }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "\
PING 192.168.1.1 (192.168.1.1) 100(128) bytes of data.
108 bytes from 192.168.1.1: icmp_req=1 ttl=255 time=0.480 ms
108 bytes from 192.168.1.1: icmp_req=2 ttl=255 time=0.307 ms

--- 192.168.1.1 ping statistics ---
5 packets transmitted, 5 received, 0% packet loss, time 3997ms
rtt min/avg/max/mdev = 0.307/0.396/0.480/0.061 ms
";

    fn success(result: PingResult) -> PingSuccess {
        match result {
            PingResult::Success(success) => success,
            PingResult::Error(err) => panic!("unexpected error result: {err}"),
        }
    }

    #[test]
    fn test_trailer_lines() {
        let result = parse_ping(
            "5 packets transmitted, 5 received, 0% packet loss, time 3997ms\n\
             rtt min/avg/max/mdev = 0.307/0.396/0.480/0.061 ms\n",
            "",
            "192.168.1.1",
        )
        .unwrap();

        let ok = success(result);
        assert_eq!(ok.probes_sent, 5);
        assert_eq!(ok.packet_loss, 0);
        assert_eq!(ok.rtt_min, Some(0.307));
        assert_eq!(ok.rtt_avg, Some(0.396));
        assert_eq!(ok.rtt_stdev, None);
    }

    #[test]
    fn test_full_output() {
        let ok = success(parse_ping(OUTPUT, "", "192.168.1.1").unwrap());
        assert_eq!(ok.results.len(), 1);
        assert_eq!(ok.results[0].ip_address, "192.168.1.1");
        assert_eq!(ok.results[0].rtt, Some(0.396));
    }

    #[test]
    fn test_loss_without_rtt() {
        let stdout = "\
PING 192.0.2.1 (192.0.2.1) 100(128) bytes of data.

--- 192.0.2.1 ping statistics ---
5 packets transmitted, 0 received, 100% packet loss, time 4032ms

";
        let ok = success(parse_ping(stdout, "", "192.0.2.1").unwrap());
        assert_eq!(ok.packet_loss, 5);
        assert_eq!(ok.rtt_min, None);
        assert_eq!(ok.rtt_avg, None);
    }

    #[test]
    fn test_stderr_is_error() {
        let result = parse_ping("", "ping: unknown host foo\n", "foo").unwrap();
        assert_eq!(result, PingResult::Error("ping: unknown host foo\n".into()));
    }

    #[test]
    fn test_truncated_output() {
        assert!(parse_ping("PING 192.0.2.1\n", "", "192.0.2.1").is_err());
    }

    #[test]
    fn test_statistics_header_is_not_a_summary() {
        // Trailer cut after the summary, without the final newline
        let stdout = "--- 192.0.2.1 ping statistics ---\n\
                      5 packets transmitted, 0 received, 100% packet loss, time 4032ms";
        assert!(parse_ping(stdout, "", "192.0.2.1").is_err());
    }
}
