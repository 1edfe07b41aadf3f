use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;

use crate::accumulator::{self, CounterReading, DisplayTotals};
use crate::error::Result;
use crate::monitor::ServerMetrics;
use crate::platform::CounterSource;
use crate::store::StateStore;

/// 读取计数、累加、持久化的一次完整流程
///
/// 同一进程内的请求通过互斥锁串行执行，避免并发读改写丢失更新。
/// 多个进程共用同一个状态文件时仍然没有保护。
pub struct TrafficTracker {
    source: Box<dyn CounterSource>,
    store: Mutex<StateStore>,
    interface: String,
    cap_gb: f64,
    metrics: Arc<ServerMetrics>,
}

impl TrafficTracker {
    pub fn new(
        source: Box<dyn CounterSource>,
        store: StateStore,
        interface: impl Into<String>,
        cap_gb: f64,
        metrics: Arc<ServerMetrics>,
    ) -> Self {
        Self {
            source,
            store: Mutex::new(store),
            interface: interface.into(),
            cap_gb,
            metrics,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn poll(&self) -> Result<DisplayTotals> {
        let store = self.store.lock();

        let reading = self.read_interface()?;
        let prior = store.load();
        let outcome = accumulator::update(&prior, reading);

        if outcome.any_reset() {
            info!(
                "Counter reset detected on {} (rx reset: {}, tx reset: {})",
                self.interface, outcome.received_reset, outcome.transmitted_reset
            );
            self.metrics.record_reset();
        }

        store.save(&outcome.state)?;
        Ok(DisplayTotals::from_state(&outcome.state, self.cap_gb))
    }

    fn read_interface(&self) -> Result<CounterReading> {
        let mut counters = self.source.interface_counters()?;
        match counters.remove(&self.interface) {
            Some(reading) => Ok(reading),
            None => {
                let mut known: Vec<_> = counters.into_keys().collect();
                known.sort();
                warn!(
                    "Interface {} not found (available: {}), counting it as zero traffic",
                    self.interface,
                    known.join(", ")
                );
                Ok(CounterReading::default())
            }
        }
    }
}
