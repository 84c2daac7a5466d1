//! 集成测试共享工具模块
//!
//! 提供角色目录夹具和可控的角色查询实现

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use hrgate::api::permission::PermissionStore;
use hrgate::api::service::{RoleDirectory, RoleLookup};
use hrgate::api::session::StaticSessionProvider;
use hrgate::core::error::{LookupError, LookupResult};
use hrgate::core::{Actor, ActorId, RoleAssignment, RoleRecord};

pub const MANAGER_AUDITOR: &str = "emp-manager-auditor";
pub const NO_ROLES: &str = "emp-no-roles";

/// Manager: [manage_employees, view_dashboard]，Auditor: [view_payroll]
pub fn manager_auditor_directory() -> RoleDirectory {
    let directory = RoleDirectory::new();
    directory
        .create_role(
            RoleRecord::new("manager", "Manager")
                .with_description("Line managers")
                .with_permissions(["manage_employees", "view_dashboard"]),
        )
        .expect("创建Manager角色应该成功");
    directory
        .create_role(RoleRecord::new("auditor", "Auditor").with_permissions(["view_payroll"]))
        .expect("创建Auditor角色应该成功");

    let actor = ActorId::new(MANAGER_AUDITOR);
    directory.assign_role(&actor, "manager").expect("分配Manager角色应该成功");
    directory.assign_role(&actor, "auditor").expect("分配Auditor角色应该成功");
    directory
}

/// 以给定操作者构建权限存储（尚未初始化），查询超时 200ms
pub fn store_for(actor: Option<&str>, lookup: Arc<dyn RoleLookup>) -> PermissionStore {
    store_with_timeout(actor, lookup, Duration::from_millis(200))
}

pub fn store_with_timeout(
    actor: Option<&str>,
    lookup: Arc<dyn RoleLookup>,
    timeout: Duration,
) -> PermissionStore {
    let session = match actor {
        Some(id) => StaticSessionProvider::signed_in(Actor::new(id)),
        None => StaticSessionProvider::anonymous(),
    };
    PermissionStore::with_timeout(Arc::new(session), lookup, timeout)
}

/// 构建并初始化权限存储
pub async fn ready_store(actor: Option<&str>, lookup: Arc<dyn RoleLookup>) -> PermissionStore {
    let store = store_for(actor, lookup);
    store.initialize().await;
    store
}

/// 总是失败的角色查询
pub struct FailingLookup;

#[async_trait]
impl RoleLookup for FailingLookup {
    async fn role_assignments(&self, _actor: &ActorId) -> LookupResult<Vec<RoleAssignment>> {
        Err(LookupError::Unauthorized("row level security".into()))
    }
}

/// 永不返回的角色查询
pub struct HangingLookup;

#[async_trait]
impl RoleLookup for HangingLookup {
    async fn role_assignments(&self, _actor: &ActorId) -> LookupResult<Vec<RoleAssignment>> {
        std::future::pending().await
    }
}

/// 查询过程中 panic 的角色查询
pub struct PanickingLookup;

#[async_trait]
impl RoleLookup for PanickingLookup {
    async fn role_assignments(&self, actor: &ActorId) -> LookupResult<Vec<RoleAssignment>> {
        panic!("role backend crashed while resolving {}", actor);
    }
}

/// 在 `release()` 之前阻塞的角色查询，用于观察 Loading 状态
pub struct GatedLookup {
    inner: RoleDirectory,
    gate: Notify,
}

impl GatedLookup {
    pub fn new(inner: RoleDirectory) -> Self {
        Self {
            inner,
            gate: Notify::new(),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl RoleLookup for GatedLookup {
    async fn role_assignments(&self, actor: &ActorId) -> LookupResult<Vec<RoleAssignment>> {
        self.gate.notified().await;
        self.inner.role_assignments(actor).await
    }
}

/// 按给定顺序原样返回分配记录
pub struct FixedLookup(pub Vec<RoleAssignment>);

#[async_trait]
impl RoleLookup for FixedLookup {
    async fn role_assignments(&self, _actor: &ActorId) -> LookupResult<Vec<RoleAssignment>> {
        Ok(self.0.clone())
    }
}
