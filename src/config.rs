use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// FAST 策略段的调优参数。默认值即引擎批处理时使用的固定常量。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FastConfig {
    #[serde(default = "default_strategy_name")]
    pub strategy_name: String,
    #[serde(default = "default_max_state")]
    pub max_state: u64,
    #[serde(default = "default_max_acc")]
    pub max_acc: u64,
    #[serde(default = "default_post_depth")]
    pub post_depth: u64,
    /// 以 FAST 语法书写的 Presburger 区域，替代初始标识。
    #[serde(default)]
    pub init_region: Option<String>,
}

impl Default for FastConfig {
    fn default() -> Self {
        Self {
            strategy_name: default_strategy_name(),
            max_state: default_max_state(),
            max_acc: default_max_acc(),
            post_depth: default_post_depth(),
            init_region: None,
        }
    }
}

impl FastConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

fn default_strategy_name() -> String {
    "strat".to_string()
}

fn default_max_state() -> u64 {
    2000
}

fn default_max_acc() -> u64 {
    100
}

fn default_post_depth() -> u64 {
    1
}
