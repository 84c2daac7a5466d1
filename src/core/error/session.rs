//! 会话错误类型
//!
//! 没有会话不是错误（`Ok(None)`），这里只覆盖会话提供方本身失败的情况

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};

/// 会话操作结果类型别名
pub type SessionResult<T> = Result<T, SessionError>;

/// 会话相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("会话已过期")]
    SessionExpired,

    #[error("会话提供方错误: {0}")]
    ProviderError(String),
}

impl ToPublicError for SessionError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            SessionError::SessionExpired => ErrorCode::Unauthorized,
            SessionError::ProviderError(_) => ErrorCode::ServiceUnavailable,
        }
    }

    fn to_public_message(&self) -> String {
        match self {
            // 不暴露提供方内部细节
            SessionError::ProviderError(_) => "会话服务不可用".to_string(),
            _ => self.to_string(),
        }
    }
}
