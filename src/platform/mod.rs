mod interface;
mod sysinfo_source;

#[cfg(target_os = "linux")]
mod linux;

pub use interface::{create_source, CounterBackend, CounterSource};

#[cfg(test)]
pub use interface::MockCounterSource;
