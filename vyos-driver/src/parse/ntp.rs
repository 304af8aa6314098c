//! `ntpq -np` parsing.
//!
//! ```text
//!      remote           refid      st t when poll reach   delay   offset  jitter
//! ==============================================================================
//! *116.91.118.97   133.243.238.244  2 u   51   64  377    5.436  987971. 1694.82
//!  219.117.210.137 .GPS.            1 u   17   64  377   17.586  988068. 1652.00
//! ```
//!
//! The first character of `remote` is the tally code; `*` marks the peer
//! the clock is synchronized to. Both IPv4 and IPv6 remotes are accepted.

use std::net::IpAddr;

use super::{number, table_body};
use crate::error::{ParseError, Result};
use crate::model::{NtpPeer, NtpPeers, NtpStats};

const CONTEXT: &str = "ntp peers";
const COLUMNS: usize = 10;

/// Tally codes ntpq may prefix to the remote address.
const TALLY_CODES: &[char] = &['*', '+', '-', '#', 'o', 'x', '.', ' '];

fn remote_address(field: &str, line: &str) -> Result<IpAddr> {
    field
        .trim_start_matches(TALLY_CODES)
        .parse()
        .map_err(|_| {
            ParseError::UnexpectedFormat {
                context: CONTEXT,
                line: line.to_string(),
            }
            .into()
        })
}

fn parse_row(line: &str) -> Result<NtpStats> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    let [remote, refid, st, t, when, poll, reach, delay, offset, jitter] = cols[..] else {
        return Err(ParseError::FieldCount {
            context: CONTEXT,
            expected: COLUMNS,
            found: cols.len(),
            line: line.to_string(),
        }
        .into());
    };

    let mut kind = t.chars();
    let (Some(kind), None) = (kind.next(), kind.next()) else {
        return Err(ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: line.to_string(),
        }
        .into());
    };

    Ok(NtpStats {
        remote: remote_address(remote, line)?,
        referenceid: refid.to_string(),
        synchronized: remote.contains('*'),
        stratum: number(CONTEXT, st)?,
        kind,
        when: number(CONTEXT, when)?,
        hostpoll: number(CONTEXT, poll)?,
        reachability: number(CONTEXT, reach)?,
        delay: number(CONTEXT, delay)?,
        offset: number(CONTEXT, offset)?,
        jitter: number(CONTEXT, jitter)?,
    })
}

/// Parse the association table. The two header lines and the final line
/// are dropped; every other line must have exactly ten columns.
pub fn parse_ntp_stats(text: &str) -> Result<Vec<NtpStats>> {
    table_body(text, 2, 1).into_iter().map(parse_row).collect()
}

/// The set of peers listed in the association table.
pub fn parse_ntp_peers(text: &str) -> Result<NtpPeers> {
    Ok(parse_ntp_stats(text)?
        .into_iter()
        .map(|stats| (stats.remote, NtpPeer::default()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NTPQ: &str = "     remote           refid      st t when poll reach   delay   offset  jitter
==============================================================================
*116.91.118.97   133.243.238.244  2 u   51   64  377    5.436  987971. 1694.82
 219.117.210.137 .GPS.            1 u   17   64  377   17.586  988068. 1652.00
+2001:db8::123   .PPS.            1 u    3   64  377    0.412   -0.021   0.004
";

    #[test]
    fn test_stats() {
        let stats = parse_ntp_stats(NTPQ).unwrap();
        assert_eq!(stats.len(), 3);

        let first = &stats[0];
        assert_eq!(first.remote, "116.91.118.97".parse::<IpAddr>().unwrap());
        assert!(first.synchronized);
        assert_eq!(first.referenceid, "133.243.238.244");
        assert_eq!(first.stratum, 2);
        assert_eq!(first.kind, 'u');
        assert_eq!(first.when, 51);
        assert_eq!(first.hostpoll, 64);
        assert_eq!(first.reachability, 377);
        assert_eq!(first.delay, 5.436);
        assert_eq!(first.offset, 987971.0);

        assert!(!stats[1].synchronized);
        assert_eq!(stats[1].referenceid, ".GPS.");
    }

    #[test]
    fn test_ipv6_remote() {
        let stats = parse_ntp_stats(NTPQ).unwrap();
        assert_eq!(stats[2].remote, "2001:db8::123".parse::<IpAddr>().unwrap());
        assert!(!stats[2].synchronized);
        assert_eq!(stats[2].offset, -0.021);
    }

    #[test]
    fn test_peers() {
        let peers = parse_ntp_peers(NTPQ).unwrap();
        assert_eq!(peers.len(), 3);
        assert!(peers.contains_key(&"219.117.210.137".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_wrong_column_count() {
        let text = "h\n=\n*116.91.118.97 133.243.238.244 2 u 51 64 377 5.436\n";
        assert!(matches!(
            parse_ntp_stats(text),
            Err(crate::Error::Parse(ParseError::FieldCount { found: 8, .. }))
        ));
    }

    #[test]
    fn test_hostname_remote_rejected() {
        let text = "h\n=\n*ntp.example.org .GPS. 1 u 17 64 377 17.586 988068. 1652.00\n";
        assert!(parse_ntp_stats(text).is_err());
    }

    #[test]
    fn test_serialized_type_key() {
        let stats = parse_ntp_stats(NTPQ).unwrap();
        let value = serde_json::to_value(&stats[0]).unwrap();
        assert_eq!(value["type"], "u");
        assert_eq!(value["remote"], "116.91.118.97");
    }
}
