use std::collections::HashMap;

use serde::Deserialize;

use crate::accumulator::CounterReading;
use crate::error::Result;

/// 网卡计数来源
#[cfg_attr(test, mockall::automock)]
pub trait CounterSource: Send + Sync {
    /// 返回所有已知网卡的累计收发字节数
    fn interface_counters(&self) -> Result<HashMap<String, CounterReading>>;
}

/// 计数来源的选择
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterBackend {
    /// Linux 上读 /proc/net/dev，其他平台用 sysinfo
    #[default]
    Auto,
    Procfs,
    Sysinfo,
}

pub fn create_source(backend: CounterBackend) -> Result<Box<dyn CounterSource>> {
    match backend {
        #[cfg(target_os = "linux")]
        CounterBackend::Auto | CounterBackend::Procfs => {
            Ok(Box::new(super::linux::ProcNetDevSource::new()))
        }
        #[cfg(not(target_os = "linux"))]
        CounterBackend::Auto => Ok(Box::new(super::sysinfo_source::SysinfoSource::new())),
        #[cfg(not(target_os = "linux"))]
        CounterBackend::Procfs => Err(crate::error::DashError::Config(
            "procfs counter source is only available on Linux".to_string(),
        )),
        CounterBackend::Sysinfo => Ok(Box::new(super::sysinfo_source::SysinfoSource::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: CounterBackend,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"backend": "sysinfo"}"#).unwrap();
        assert_eq!(parsed.backend, CounterBackend::Sysinfo);
        assert!(serde_json::from_str::<Wrapper>(r#"{"backend": "pcap"}"#).is_err());
        assert_eq!(CounterBackend::default(), CounterBackend::Auto);
    }

    #[test]
    fn test_create_sysinfo_source() {
        let source = create_source(CounterBackend::Sysinfo).unwrap();
        assert!(source.interface_counters().is_ok());
    }
}
