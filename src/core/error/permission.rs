//! 权限错误类型
//!
//! 涵盖权限词表解析和角色目录维护相关的错误

use thiserror::Error;

use crate::core::error::codes::{ErrorCode, ToPublicError};

/// 权限操作结果类型别名
pub type PermissionResult<T> = Result<T, PermissionError>;

/// 权限相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("未知的权限令牌: {0}")]
    UnknownPermission(String),

    #[error("角色不存在: {0}")]
    RoleNotFound(String),

    #[error("角色已存在: {0}")]
    DuplicateRole(String),
}

impl ToPublicError for PermissionError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            PermissionError::UnknownPermission(_) => ErrorCode::InvalidInput,
            PermissionError::RoleNotFound(_) => ErrorCode::ResourceNotFound,
            PermissionError::DuplicateRole(_) => ErrorCode::ResourceAlreadyExists,
        }
    }

    fn to_public_message(&self) -> String {
        self.to_string()
    }
}
