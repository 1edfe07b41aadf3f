use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::accumulator::AccumulatorState;
use crate::error::Result;

/// 流量状态的 JSON 文件存储
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取上次保存的状态
    ///
    /// 文件不存在或内容损坏时返回全零状态，不视为错误。
    pub fn load(&self) -> AccumulatorState {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting from zero", self.path.display());
                return AccumulatorState::default();
            }
            Err(e) => {
                warn!("Failed to read state file {}: {}", self.path.display(), e);
                return AccumulatorState::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Malformed state file {}: {}, starting from zero", self.path.display(), e);
            AccumulatorState::default()
        })
    }

    /// 覆盖写入状态
    ///
    /// 先写同目录下的临时文件再重命名，避免留下写了一半的文件。
    pub fn save(&self, state: &AccumulatorState) -> Result<()> {
        let data = serde_json::to_vec(state)?;

        let tmp_path = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!("Saved traffic state to {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
