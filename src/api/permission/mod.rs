//! 权限模块
//!
//! - `PermissionStore`：解析并缓存操作者的有效权限集合
//! - `AccessGate`：基于该集合的声明式可见性判定

pub mod access_gate;
pub mod permission_store;

pub use access_gate::{AccessGate, GateDecision};
pub use permission_store::{
    aggregate_permissions, EffectivePermissions, InitOutcome, PermissionStore, StoreState,
};
