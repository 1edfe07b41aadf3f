use std::collections::HashMap;

use sysinfo::Networks;

use super::interface::CounterSource;
use crate::accumulator::CounterReading;
use crate::error::Result;

/// 基于 sysinfo 的跨平台计数来源
pub struct SysinfoSource;

impl SysinfoSource {
    pub fn new() -> Self {
        Self
    }
}

impl CounterSource for SysinfoSource {
    fn interface_counters(&self) -> Result<HashMap<String, CounterReading>> {
        // 每次重新枚举，网卡可能在两次请求之间出现或消失
        let networks = Networks::new_with_refreshed_list();
        Ok(networks
            .iter()
            .map(|(name, data)| {
                (
                    name.to_string(),
                    CounterReading::new(data.total_received(), data.total_transmitted()),
                )
            })
            .collect())
    }
}
