//! 角色查询错误类型
//!
//! 角色查询服务失败时返回；权限存储会将其降级为空权限集合

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};

/// 角色查询结果类型别名
pub type LookupResult<T> = Result<T, LookupError>;

/// 角色查询相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("网络错误: {0}")]
    Network(String),

    #[error("无权查询角色: {0}")]
    Unauthorized(String),

    #[error("后端错误: {0}")]
    Backend(String),
}

impl ToPublicError for LookupError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            LookupError::Network(_) => ErrorCode::ServiceUnavailable,
            LookupError::Unauthorized(_) => ErrorCode::Unauthorized,
            LookupError::Backend(_) => ErrorCode::InternalError,
        }
    }

    fn to_public_message(&self) -> String {
        match self {
            LookupError::Backend(_) => "角色服务内部错误".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_codes() {
        assert_eq!(
            LookupError::Unauthorized("row level security".into()).to_error_code(),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            LookupError::Network("reset".into()).to_error_code(),
            ErrorCode::ServiceUnavailable
        );
    }

    #[test]
    fn test_backend_message_is_filtered() {
        let err = LookupError::Backend("relation \"employee_roles\" does not exist".into());
        let public = err.to_public_error();
        assert_eq!(public.code, ErrorCode::InternalError);
        assert!(!public.message.contains("employee_roles"));
    }
}
