use serde::{Deserialize, Serialize};

/// 持久化的流量累计状态
///
/// 字段名与存储文件中的键一一对应：`received`、`transmitted`、
/// `prev_received`、`prev_transmitted`。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorState {
    /// 累计接收字节数
    #[serde(rename = "received")]
    pub total_received_bytes: u64,
    /// 累计发送字节数
    #[serde(rename = "transmitted")]
    pub total_transmitted_bytes: u64,
    /// 上一次读取到的系统接收计数
    #[serde(rename = "prev_received", default)]
    pub last_seen_received_bytes: u64,
    /// 上一次读取到的系统发送计数
    #[serde(rename = "prev_transmitted", default)]
    pub last_seen_transmitted_bytes: u64,
}

/// 某个网卡在某一时刻的系统累计计数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterReading {
    pub received: u64,
    pub transmitted: u64,
}

impl CounterReading {
    pub fn new(received: u64, transmitted: u64) -> Self {
        Self { received, transmitted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_storage_keys() {
        let state = AccumulatorState {
            total_received_bytes: 1,
            total_transmitted_bytes: 2,
            last_seen_received_bytes: 3,
            last_seen_transmitted_bytes: 4,
        };
        let value = serde_json::to_value(state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "received": 1,
                "transmitted": 2,
                "prev_received": 3,
                "prev_transmitted": 4,
            })
        );
    }

    #[test]
    fn test_state_without_prev_keys() {
        // 旧版本只记录累计值
        let state: AccumulatorState =
            serde_json::from_str(r#"{"received": 10, "transmitted": 20}"#).unwrap();
        assert_eq!(state.total_received_bytes, 10);
        assert_eq!(state.total_transmitted_bytes, 20);
        assert_eq!(state.last_seen_received_bytes, 0);
        assert_eq!(state.last_seen_transmitted_bytes, 0);
    }
}
