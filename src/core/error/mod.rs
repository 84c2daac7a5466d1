//! 统一错误处理
//!
//! 每个领域一个 `thiserror` 枚举及其 `XxxResult<T>` 别名，
//! 通过 `ToPublicError` 映射到稳定的对外错误码；`HrGateError` 汇总各领域错误

use thiserror::Error;

pub mod codes;
pub mod config;
pub mod lookup;
pub mod permission;
pub mod session;

pub use codes::{ErrorCode, PublicError, ToPublicError};
pub use config::{ConfigError, ConfigResult};
pub use lookup::{LookupError, LookupResult};
pub use permission::{PermissionError, PermissionResult};
pub use session::{SessionError, SessionResult};

/// 统一错误类型
#[derive(Error, Debug)]
pub enum HrGateError {
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),

    #[error("角色查询错误: {0}")]
    Lookup(#[from] LookupError),

    #[error("权限错误: {0}")]
    Permission(#[from] PermissionError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 统一的结果类型
pub type HrGateResult<T> = Result<T, HrGateError>;

impl ToPublicError for HrGateError {
    fn to_error_code(&self) -> ErrorCode {
        match self {
            HrGateError::Session(e) => e.to_error_code(),
            HrGateError::Lookup(e) => e.to_error_code(),
            HrGateError::Permission(e) => e.to_error_code(),
            HrGateError::Config(e) => e.to_error_code(),
        }
    }

    fn to_public_message(&self) -> String {
        match self {
            HrGateError::Session(e) => e.to_public_message(),
            HrGateError::Lookup(e) => e.to_public_message(),
            HrGateError::Permission(e) => e.to_public_message(),
            HrGateError::Config(e) => e.to_public_message(),
        }
    }
}
