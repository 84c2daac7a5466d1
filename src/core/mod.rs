pub mod error;
pub mod permission;
pub mod role;

// 错误和结果类型
pub use error::{
    ConfigError, ConfigResult, ErrorCode, HrGateError, HrGateResult, LookupError, LookupResult,
    PermissionError, PermissionResult, PublicError, SessionError, SessionResult, ToPublicError,
};

// 权限与角色模型
pub use permission::Permission;
pub use role::{Actor, ActorId, Role, RoleAssignment, RoleRecord, ValidatedRole};
