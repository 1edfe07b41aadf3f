//! 流量累计模块
//!
//! 根据系统网卡计数与上次记录的差值累加总流量。计数器变小时
//! (重启、网卡重置)视为计数被清零，把当前读数整体计入。

pub mod display;
pub mod state;

pub use display::DisplayTotals;
pub use state::{AccumulatorState, CounterReading};

/// 一次累加的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub state: AccumulatorState,
    pub received_reset: bool,
    pub transmitted_reset: bool,
}

impl UpdateOutcome {
    pub fn any_reset(&self) -> bool {
        self.received_reset || self.transmitted_reset
    }
}

/// 用新的读数更新累计状态
pub fn update(prior: &AccumulatorState, reading: CounterReading) -> UpdateOutcome {
    let (total_received_bytes, received_reset) = accumulate(
        prior.total_received_bytes,
        prior.last_seen_received_bytes,
        reading.received,
    );
    let (total_transmitted_bytes, transmitted_reset) = accumulate(
        prior.total_transmitted_bytes,
        prior.last_seen_transmitted_bytes,
        reading.transmitted,
    );

    UpdateOutcome {
        state: AccumulatorState {
            total_received_bytes,
            total_transmitted_bytes,
            last_seen_received_bytes: reading.received,
            last_seen_transmitted_bytes: reading.transmitted,
        },
        received_reset,
        transmitted_reset,
    }
}

/// 返回 (新的累计值, 是否检测到计数清零)
fn accumulate(total: u64, last_seen: u64, raw: u64) -> (u64, bool) {
    match raw.checked_sub(last_seen) {
        Some(delta) => (total.saturating_add(delta), false),
        // 清零后的读数近似等于清零以来的流量
        None => (total.saturating_add(raw), true),
    }
}
