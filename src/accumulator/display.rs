use super::state::AccumulatorState;

/// 1 GB = 2^30 字节
pub const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// 页面展示用的流量汇总(单位 GB)
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DisplayTotals {
    pub received_gb: f64,
    pub transmitted_gb: f64,
    pub total_gb: f64,
    pub cap_gb: f64,
    /// 剩余额度，超额时为负数
    pub remaining_gb: f64,
}

impl DisplayTotals {
    pub fn from_state(state: &AccumulatorState, cap_gb: f64) -> Self {
        let received_gb = bytes_to_gb(state.total_received_bytes);
        let transmitted_gb = bytes_to_gb(state.total_transmitted_bytes);
        let total_gb = received_gb + transmitted_gb;

        Self {
            received_gb,
            transmitted_gb,
            total_gb,
            cap_gb,
            remaining_gb: cap_gb - total_gb,
        }
    }

    /// 已用额度百分比，限制在 0..=100，仅用于进度条
    pub fn usage_percent(&self) -> f64 {
        if self.cap_gb <= 0.0 {
            return 100.0;
        }
        (self.total_gb / self.cap_gb * 100.0).clamp(0.0, 100.0)
    }

    pub fn over_cap(&self) -> bool {
        self.remaining_gb < 0.0
    }
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}
