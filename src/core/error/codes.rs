//! 对外错误码
//!
//! 错误码格式: XXYY，XX 为类别（03=输入, 04=认证, 05=资源, 09=系统）。
//! CLI 按类别决定进程退出码，错误详情只输出经过过滤的对外消息

use serde::{Deserialize, Serialize};

/// 对外错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// 无效输入（未知权限令牌、无法解析的配置或夹具）
    InvalidInput = 302,
    /// 会话失效或查询被拒绝
    Unauthorized = 401,
    /// 角色不存在
    ResourceNotFound = 500,
    /// 角色已存在
    ResourceAlreadyExists = 501,
    InternalError = 900,
    /// 会话或角色服务不可用
    ServiceUnavailable = 901,
}

impl ErrorCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// 错误类别（错误码的高两位）
    pub fn category(&self) -> i32 {
        self.as_i32() / 100
    }

    /// CLI 进程退出码
    ///
    /// 2=输入错误, 3=认证错误, 4=资源错误, 1=其他
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            3 => 2,
            4 => 3,
            5 => 4,
            _ => 1,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "无效输入",
            ErrorCode::Unauthorized => "未认证",
            ErrorCode::ResourceNotFound => "资源未找到",
            ErrorCode::ResourceAlreadyExists => "资源已存在",
            ErrorCode::InternalError => "内部错误",
            ErrorCode::ServiceUnavailable => "服务不可用",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.as_i32())
    }
}

/// 对外错误信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicError {
    pub code: ErrorCode,
    pub message: String,
}

impl PublicError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn with_default_message(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }
}

impl std::fmt::Display for PublicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// 内部错误到对外错误的转换，实现方负责过滤后端细节
pub trait ToPublicError {
    fn to_public_error(&self) -> PublicError {
        PublicError::new(self.to_error_code(), self.to_public_message())
    }

    fn to_error_code(&self) -> ErrorCode;

    fn to_public_message(&self) -> String;
}
