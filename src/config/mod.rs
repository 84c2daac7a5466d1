use flexi_logger::LogSpecification;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::error::{ConfigError, ConfigResult};

#[cfg(test)]
pub mod test_config;

/// 应用配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub auth: AuthConfig,
}

/// 日志配置
///
/// `level` 是 flexi_logger 日志规格（如 `info` 或 `warn,hrgate=debug`），
/// CLI 默认输出到标准错误，`--log-file` 时按其余字段写入文件
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "hrgate".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_files: 5,
        }
    }
}

/// 授权配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// 角色查询超时（毫秒），超时后权限存储以空集合就绪
    pub lookup_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 10_000,
        }
    }
}

impl AuthConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 配置文件存在时加载，否则使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.auth.lookup_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "auth.lookup_timeout_ms 必须大于 0".to_string(),
            ));
        }
        if let Err(e) = LogSpecification::parse(&self.log.level) {
            return Err(ConfigError::Invalid(format!("log.level 无效: {}", e)));
        }
        if self.log.file.is_empty() {
            return Err(ConfigError::Invalid("log.file 不能为空".to_string()));
        }
        Ok(())
    }
}
