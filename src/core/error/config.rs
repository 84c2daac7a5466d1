//! 配置错误类型

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};

/// 配置操作结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置与夹具文件相关错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML解析错误: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML序列化错误: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("无效配置: {0}")]
    Invalid(String),
}

impl ToPublicError for ConfigError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            ConfigError::Io(_) => ErrorCode::InternalError,
            ConfigError::Parse(_) | ConfigError::Invalid(_) => ErrorCode::InvalidInput,
            ConfigError::Serialize(_) => ErrorCode::InternalError,
        }
    }

    fn to_public_message(&self) -> String {
        self.to_string()
    }
}
