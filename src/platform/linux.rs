use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::interface::CounterSource;
use crate::accumulator::CounterReading;
use crate::error::{DashError, Result};

pub const PROC_NET_DEV_PATH: &str = "/proc/net/dev";

/// 从 /proc/net/dev 读取网卡计数
pub struct ProcNetDevSource {
    path: PathBuf,
}

impl ProcNetDevSource {
    pub fn new() -> Self {
        Self::with_path(PROC_NET_DEV_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CounterSource for ProcNetDevSource {
    fn interface_counters(&self) -> Result<HashMap<String, CounterReading>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            DashError::Counters(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(parse_proc_net_dev(&content))
    }
}

/// 解析 /proc/net/dev
///
/// 格式: `iface: rx_bytes rx_packets ... tx_bytes tx_packets ...`，
/// 接收字节在第 0 列，发送字节在第 8 列。
pub fn parse_proc_net_dev(content: &str) -> HashMap<String, CounterReading> {
    let mut counters = HashMap::new();

    // 前两行是表头
    for line in content.lines().skip(2) {
        let Some((iface, stats)) = line.split_once(':') else {
            continue;
        };
        let iface = iface.trim();
        if iface.is_empty() {
            continue;
        }

        let fields: Vec<&str> = stats.split_whitespace().collect();
        if fields.len() < 9 {
            continue;
        }
        let (Ok(rx), Ok(tx)) = (fields[0].parse::<u64>(), fields[8].parse::<u64>()) else {
            continue;
        };

        counters.insert(iface.to_string(), CounterReading::new(rx, tx));
    }

    counters
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1000       10    0    0    0     0          0         0     1000       10    0    0    0     0       0          0
  eth0: 5000       50    0    0    0     0          0         0     3000       30    0    0    0     0       0          0
wlan0:2000       20    0    0    0     0          0         0     1500       15    0    0    0     0       0          0";

    #[test]
    fn test_parse_proc_net_dev() {
        let counters = parse_proc_net_dev(SAMPLE);
        assert_eq!(counters.len(), 3);
        assert_eq!(counters["lo"], CounterReading::new(1000, 1000));
        assert_eq!(counters["eth0"], CounterReading::new(5000, 3000));
        assert_eq!(counters["wlan0"], CounterReading::new(2000, 1500));
    }

    #[test]
    fn test_parse_skips_garbage() {
        let content = "\
header
header
  eth0: 5000 50
  eth1: abc 0 0 0 0 0 0 0 10 0 0 0 0 0 0 0
no colon here";
        assert!(parse_proc_net_dev(content).is_empty());
        assert!(parse_proc_net_dev("").is_empty());
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dev");
        fs::write(&path, SAMPLE).unwrap();

        let source = ProcNetDevSource::with_path(path.clone());
        let counters = source.interface_counters().unwrap();
        assert_eq!(counters["eth0"].received, 5000);
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = ProcNetDevSource::with_path("/nonexistent/proc/net/dev");
        assert!(matches!(
            source.interface_counters(),
            Err(DashError::Counters(_))
        ));
    }
}
