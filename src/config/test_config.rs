//! 测试配置模块
//!
//! 为单元测试构造配置，日志目录指向临时目录
//! 此模块仅在测试时编译

use std::path::Path;

use super::{AuthConfig, Config, LogConfig};

/// 构造测试用配置
pub fn test_config(log_dir: &Path) -> Config {
    Config {
        log: LogConfig {
            level: "debug".to_string(),
            dir: log_dir.to_string_lossy().into_owned(),
            file: "hrgate_test".to_string(),
            max_file_size: 1024 * 1024,
            max_files: 2,
        },
        auth: AuthConfig {
            lookup_timeout_ms: 200,
        },
    }
}
