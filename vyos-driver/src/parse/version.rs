//! `show version` parsing.
//!
//! ```text
//! Version:      VyOS 1.1.7
//! Description:  VyOS 1.1.7 (helium)
//! Copyright:    2016 VyOS maintainers and contributors
//! Built by:     maintainers@vyos.net
//! Built on:     Wed Feb 17 09:57:31 UTC 2016
//! Build ID:     1602170957-4459750
//! System type:  x86 64-bit
//! Boot via:     image
//! Hypervisor:   VMware
//! HW model:     VMware Virtual Platform
//! HW S/N:       VMware-42 1d 83 b9 fe c1 bd b2-7d 3d 49 db 94 18 f5 c1
//! HW UUID:      421D83B9-FEC1-BDB2-7D3D-49DB9418F5C1
//! Uptime:       01:08:20 up 53 days,  2:24,  1 user,  load average: 0.00, 0.01, 0.05
//! ```

use super::duration::parse_system_uptime;
use crate::error::{ParseError, Result};

const CONTEXT: &str = "show version";

/// Values recovered from `show version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub os_version: String,
    pub serial_number: String,
    /// Seconds since boot.
    pub uptime: i64,
}

fn line_containing<'a>(text: &'a str, marker: &'static str) -> Result<&'a str> {
    text.lines()
        .find(|line| line.contains(marker))
        .ok_or_else(|| {
            ParseError::MissingPattern {
                context: CONTEXT,
                pattern: marker,
            }
            .into()
        })
}

/// Parse `show version`.
///
/// The OS version is the last token of the `Version` line, the serial number
/// is whatever follows the first colon of the `S/N` line.
pub fn parse_version(text: &str) -> Result<VersionInfo> {
    let version = line_containing(text, "Version")?;
    let os_version = version
        .split_whitespace()
        .last()
        .ok_or_else(|| ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: version.to_string(),
        })?;

    let serial = line_containing(text, "S/N")?;
    let (_, serial_number) = serial
        .split_once(':')
        .ok_or_else(|| ParseError::UnexpectedFormat {
            context: CONTEXT,
            line: serial.to_string(),
        })?;

    Ok(VersionInfo {
        os_version: os_version.to_string(),
        serial_number: serial_number.trim().to_string(),
        uptime: parse_system_uptime(line_containing(text, "Uptime")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_VERSION: &str = "\
Version:      VyOS 1.1.7
Description:  VyOS 1.1.7 (helium)
Copyright:    2016 VyOS maintainers and contributors
Built by:     maintainers@vyos.net
Built on:     Wed Feb 17 09:57:31 UTC 2016
Build ID:     1602170957-4459750
System type:  x86 64-bit
Boot via:     image
Hypervisor:   VMware
HW model:     VMware Virtual Platform
HW S/N:       VMware-42 1d 83 b9 fe c1 bd b2-7d 3d 49 db 94 18 f5 c1
HW UUID:      421D83B9-FEC1-BDB2-7D3D-49DB9418F5C1
Uptime:       01:08:20 up 53 days,  2:24,  1 user,  load average: 0.00, 0.01, 0.05
";

    #[test]
    fn test_version() {
        let info = parse_version(SHOW_VERSION).unwrap();
        assert_eq!(info.os_version, "1.1.7");
        assert_eq!(
            info.serial_number,
            "VMware-42 1d 83 b9 fe c1 bd b2-7d 3d 49 db 94 18 f5 c1"
        );
        assert_eq!(info.uptime, 53 * 86400 + 3600 + 8 * 60 + 20);
    }

    #[test]
    fn test_missing_serial() {
        let text = "Version: VyOS 1.2.0\nUptime: 01:00:00 up 1 day, 1:00\n";
        assert!(matches!(
            parse_version(text),
            Err(crate::Error::Parse(ParseError::MissingPattern { pattern: "S/N", .. }))
        ));
    }

    #[test]
    fn test_missing_uptime() {
        let text = "Version: VyOS 1.2.0\nHW S/N: 1234\n";
        assert!(parse_version(text).is_err());
    }
}
