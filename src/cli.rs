use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;
use crate::platform::CounterBackend;
use crate::server::DashboardInfo;

#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Args {
    /// 配置文件路径(YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 要统计的网络接口名称
    #[arg(short, long)]
    pub interface: Option<String>,

    /// 监听地址
    #[arg(long)]
    pub listen: Option<String>,

    /// 流量状态文件路径
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// 日志级别
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// 启动时构建一次，之后不再读取环境变量
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// 页面展示的 IP
    pub ip: String,
    pub phone: String,
    /// 流量上限(GB)
    pub traffic: f64,
    pub name: String,
    pub interface: String,
    pub listen: String,
    pub data_file: PathBuf,
    #[serde(default)]
    pub counter_source: CounterBackend,
}

impl Config {
    /// 按 默认值 -> 配置文件 -> 环境变量 -> 命令行 的顺序合并配置
    pub fn load(args: &Args) -> Result<Self> {
        Self::load_with_env(args, None)
    }

    /// `env` 为 `None` 时读取进程环境变量
    pub fn load_with_env(args: &Args, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("ip", "192.168.1.1")?
            .set_default("phone", "123-456-7890")?
            .set_default("traffic", 100.0)?
            .set_default("name", "John Doe")?
            .set_default("interface", "eth0")?
            .set_default("listen", "0.0.0.0:5000")?
            .set_default("data_file", "traffic_data.json")?
            .set_default("counter_source", "auto")?;

        if let Some(path) = &args.config {
            builder = builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }

        builder = builder.add_source(config::Environment::default().source(env));

        if let Some(interface) = &args.interface {
            builder = builder.set_override("interface", interface.as_str())?;
        }
        if let Some(listen) = &args.listen {
            builder = builder.set_override("listen", listen.as_str())?;
        }
        if let Some(data_file) = &args.data_file {
            builder = builder.set_override("data_file", data_file.to_string_lossy().as_ref())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.traffic.is_finite() {
            return Err(crate::error::DashError::Config(format!(
                "traffic cap must be a finite number, got {}",
                self.traffic
            )));
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = self
            .listen
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid listen address {:?}", self.listen))?;
        Ok(addr)
    }

    pub fn dashboard_info(&self) -> DashboardInfo {
        DashboardInfo {
            name: self.name.clone(),
            ip: self.ip.clone(),
            phone: self.phone.clone(),
            interface: self.interface.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_with_env(&Args::default(), env(&[])).unwrap();
        assert_eq!(config.ip, "192.168.1.1");
        assert_eq!(config.phone, "123-456-7890");
        assert_eq!(config.traffic, 100.0);
        assert_eq!(config.name, "John Doe");
        assert_eq!(config.interface, "eth0");
        assert_eq!(config.data_file, PathBuf::from("traffic_data.json"));
        assert_eq!(config.counter_source, CounterBackend::Auto);
        assert_eq!(config.listen_addr().unwrap().port(), 5000);
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::load_with_env(
            &Args::default(),
            env(&[
                ("IP", "10.1.2.3"),
                ("PHONE", "555-0199"),
                ("TRAFFIC", "12.5"),
                ("NAME", "Jane Roe"),
                ("INTERFACE", "wlan0"),
                ("PATH", "/usr/bin"),
            ]),
        )
        .unwrap();
        assert_eq!(config.ip, "10.1.2.3");
        assert_eq!(config.phone, "555-0199");
        assert_eq!(config.traffic, 12.5);
        assert_eq!(config.name, "Jane Roe");
        assert_eq!(config.interface, "wlan0");
    }

    #[test]
    fn test_non_numeric_cap_is_error() {
        let result = Config::load_with_env(&Args::default(), env(&[("TRAFFIC", "lots")]));
        assert!(matches!(result, Err(DashError::Config(_))));
    }

    #[test]
    fn test_invalid_listen_is_error() {
        let args = Args {
            listen: Some("not-an-address".to_string()),
            ..Default::default()
        };
        let result = Config::load_with_env(&args, env(&[]));
        assert!(matches!(result, Err(DashError::Other(_))));
    }

    #[test]
    fn test_file_then_env_then_args() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dash.yaml");
        fs::write(
            &path,
            "name: From File\ninterface: ens3\ntraffic: 250\ncounter_source: sysinfo\n",
        )
        .unwrap();

        let args = Args {
            config: Some(path),
            interface: Some("enp0s1".to_string()),
            ..Default::default()
        };
        let config = Config::load_with_env(&args, env(&[("TRAFFIC", "300")])).unwrap();

        assert_eq!(config.name, "From File");
        assert_eq!(config.traffic, 300.0);
        assert_eq!(config.interface, "enp0s1");
        assert_eq!(config.counter_source, CounterBackend::Sysinfo);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/dash.yaml")),
            ..Default::default()
        };
        assert!(Config::load_with_env(&args, env(&[])).is_err());
    }
}
