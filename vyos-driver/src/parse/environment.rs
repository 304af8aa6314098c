//! `vmstat` and `free` parsing.
//!
//! ```text
//! procs -----------memory---------- ---swap-- -----io---- -system-- ----cpu----
//!  r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa
//!  0  0      0  61404 139624 139360    0    0     0     0    9   14  0  0 100  0
//! ```
//!
//! ```text
//!              total       used       free     shared    buffers     cached
//! Mem:        508156     446784      61372          0     139624     139360
//! -/+ buffers/cache:     167800     340356
//! Swap:            0          0          0
//! ```

use indexmap::IndexMap;

use super::{fields, number};
use crate::error::{ParseError, Result};
use crate::model::{
    CpuUsage, Environment, FanStatus, MemoryUsage, PowerStatus, TemperatureStatus,
};

/// Aggregate CPU usage in percent, computed as `100 - id`.
///
/// The `id` column is located from the column header line, and read from
/// the last sample row.
pub fn parse_cpu_usage(vmstat: &str) -> Result<u32> {
    const CONTEXT: &str = "vmstat";

    let lines: Vec<&str> = vmstat.lines().filter(|l| !l.trim().is_empty()).collect();

    let (header_at, idle_col) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| {
            line.split_whitespace()
                .position(|col| col == "id")
                .map(|col| (i, col))
        })
        .ok_or(ParseError::MissingPattern {
            context: CONTEXT,
            pattern: "id",
        })?;

    let sample = lines[header_at + 1..]
        .last()
        .ok_or(ParseError::MissingPattern {
            context: CONTEXT,
            pattern: "sample row",
        })?;
    let cols = fields(CONTEXT, sample, idle_col + 1)?;
    let idle: u32 = number(CONTEXT, cols[idle_col])?;

    100u32.checked_sub(idle).ok_or_else(|| {
        ParseError::InvalidNumber {
            context: CONTEXT,
            value: cols[idle_col].to_string(),
        }
        .into()
    })
}

/// Total and used memory from the `Mem:` row.
pub fn parse_memory(free: &str) -> Result<MemoryUsage> {
    const CONTEXT: &str = "free";

    let row = free
        .lines()
        .find(|line| line.trim_start().starts_with("Mem:"))
        .ok_or(ParseError::MissingPattern {
            context: CONTEXT,
            pattern: "Mem:",
        })?;
    let cols = fields(CONTEXT, row, 3)?;

    Ok(MemoryUsage {
        available_ram: number(CONTEXT, cols[1])?,
        used_ram: number(CONTEXT, cols[2])?,
    })
}

/// Assemble the environment record. Fans, temperature and power are not
/// exposed by VyOS and stay unknown.
pub fn parse_environment(vmstat: &str, free: &str) -> Result<Environment> {
    let mut cpu = IndexMap::new();
    cpu.insert(
        "0".to_string(),
        CpuUsage {
            usage: parse_cpu_usage(vmstat)?,
        },
    );

    Ok(Environment {
        fans: FanStatus::default(),
        temperature: TemperatureStatus::default(),
        power: PowerStatus::default(),
        cpu,
        memory: parse_memory(free)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VMSTAT: &str = "\
procs -----------memory---------- ---swap-- -----io---- -system-- ----cpu----
 r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa
 0  0      0  61404 139624 139360    0    0     0     0    9   14  3  4 93  0
";

    const FREE: &str = "\
             total       used       free     shared    buffers     cached
Mem:        508156     446784      61372          0     139624     139360
-/+ buffers/cache:     167800     340356
Swap:            0          0          0
";

    #[test]
    fn test_cpu_usage() {
        assert_eq!(parse_cpu_usage(VMSTAT).unwrap(), 7);
    }

    #[test]
    fn test_cpu_usage_newer_vmstat_columns() {
        // procps 3.3 adds the `st` column after `wa`
        let vmstat = "\
procs -----------memory---------- ---swap-- -----io---- -system-- ------cpu-----
 r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa st
 1  0      0 102400  20480 307200    0    0     1     2   30   40  1  1 98  0  0
";
        assert_eq!(parse_cpu_usage(vmstat).unwrap(), 2);
    }

    #[test]
    fn test_cpu_without_sample_fails() {
        let vmstat = " r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa\n";
        assert!(parse_cpu_usage(vmstat).is_err());
    }

    #[test]
    fn test_memory() {
        let memory = parse_memory(FREE).unwrap();
        assert_eq!(memory.available_ram, 508156);
        assert_eq!(memory.used_ram, 446784);
    }

    #[test]
    fn test_memory_missing_row() {
        assert!(matches!(
            parse_memory("Swap: 0 0 0\n"),
            Err(crate::Error::Parse(ParseError::MissingPattern { pattern: "Mem:", .. }))
        ));
    }

    #[test]
    fn test_environment() {
        let env = parse_environment(VMSTAT, FREE).unwrap();
        assert_eq!(env.cpu["0"].usage, 7);
        assert_eq!(env.memory.used_ram, 446784);
        assert_eq!(env.fans.status, None);
        assert_eq!(env.power, PowerStatus::default());
    }
}
