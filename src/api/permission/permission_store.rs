use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::api::service::RoleLookup;
use crate::api::session::SessionProvider;
use crate::config::AuthConfig;
use crate::core::{Actor, Permission, RoleAssignment};

/// 初始化结果，用于日志和指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// 没有会话，权限集合为空
    Anonymous,
    /// 成功聚合角色权限
    Resolved,
    /// 会话提供方失败
    SessionFailed,
    /// 角色查询失败
    LookupFailed,
    /// 超时
    TimedOut,
    /// 初始化在完成前被取消或中途 panic
    Aborted,
}

impl InitOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitOutcome::Anonymous => "anonymous",
            InitOutcome::Resolved => "resolved",
            InitOutcome::SessionFailed => "session_failed",
            InitOutcome::LookupFailed => "lookup_failed",
            InitOutcome::TimedOut => "timed_out",
            InitOutcome::Aborted => "aborted",
        }
    }

    /// 是否为降级结果（以空集合失败关闭）
    pub fn is_degraded(&self) -> bool {
        !matches!(self, InitOutcome::Anonymous | InitOutcome::Resolved)
    }
}

/// 操作者的有效权限集合
///
/// 初始化时计算一次，此后在整个会话内不再变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    pub actor: Option<Actor>,
    pub permissions: BTreeSet<Permission>,
    /// 角色数据中无法识别的权限令牌（去重、排序）
    pub quarantined: Vec<String>,
    pub outcome: InitOutcome,
}

impl EffectivePermissions {
    fn empty(actor: Option<Actor>, outcome: InitOutcome) -> Self {
        Self {
            actor,
            permissions: BTreeSet::new(),
            quarantined: Vec::new(),
            outcome,
        }
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// 存储状态：`Loading -> Ready`，不存在其他转换
#[derive(Debug, Clone)]
pub enum StoreState {
    Loading,
    Ready(Arc<EffectivePermissions>),
}

impl StoreState {
    pub fn is_ready(&self) -> bool {
        matches!(self, StoreState::Ready(_))
    }
}

/// 聚合多个角色分配的权限
///
/// 结果是所有角色权限的并集，与角色顺序和重复分配无关；
/// 指向已删除角色的分配不贡献权限，未知令牌进入隔离列表
pub fn aggregate_permissions(
    assignments: &[RoleAssignment],
) -> (BTreeSet<Permission>, Vec<String>) {
    let mut permissions = BTreeSet::new();
    let mut quarantined = BTreeSet::new();

    for assignment in assignments {
        let Some(record) = &assignment.role else {
            log::debug!("Role assignment {} has no role row, skipped", assignment.role_id);
            continue;
        };

        let validated = record.validate();
        for raw in &validated.quarantined {
            log::warn!("Quarantined unknown permission {:?} on role {}", raw, record.id);
        }
        permissions.extend(validated.role.permissions);
        quarantined.extend(validated.quarantined);
    }

    (permissions, quarantined.into_iter().collect())
}

/// 初始化完成前被丢弃时，保证状态落到 Ready（空集合）
struct ReadyGuard<'a> {
    state: &'a watch::Sender<StoreState>,
    armed: bool,
}

impl ReadyGuard<'_> {
    fn complete(mut self, resolved: EffectivePermissions) {
        self.armed = false;
        publish(self.state, resolved);
    }
}

impl Drop for ReadyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::warn!("Permission resolution aborted before completion, failing closed");
            publish(self.state, EffectivePermissions::empty(None, InitOutcome::Aborted));
        }
    }
}

fn publish(state: &watch::Sender<StoreState>, resolved: EffectivePermissions) {
    metrics::counter!("hrgate_store_init_total", "outcome" => resolved.outcome.as_str())
        .increment(1);
    let level = if resolved.outcome.is_degraded() {
        log::Level::Warn
    } else {
        log::Level::Info
    };
    log::log!(
        level,
        "Permission store ready: outcome={} permissions={} quarantined={}",
        resolved.outcome.as_str(),
        resolved.permissions.len(),
        resolved.quarantined.len()
    );
    state.send_replace(StoreState::Ready(Arc::new(resolved)));
}

/// 权限存储
///
/// 职责：
/// 1. 通过注入的会话提供方和角色查询服务解析当前操作者的有效权限集合
/// 2. 缓存该集合，为访问门提供同步的成员检查
///
/// 每个实例只解析一次；会话变化后需要构造新实例。
/// 任何失败都以空集合进入 Ready，不向调用方传播错误
pub struct PermissionStore {
    session: Arc<dyn SessionProvider>,
    lookup: Arc<dyn RoleLookup>,
    lookup_timeout: Duration,
    state: watch::Sender<StoreState>,
    started: AtomicBool,
}

impl PermissionStore {
    /// 创建处于 Loading 状态的权限存储
    pub fn new(
        session: Arc<dyn SessionProvider>,
        lookup: Arc<dyn RoleLookup>,
        auth_config: &AuthConfig,
    ) -> Self {
        Self::with_timeout(session, lookup, auth_config.lookup_timeout())
    }

    pub fn with_timeout(
        session: Arc<dyn SessionProvider>,
        lookup: Arc<dyn RoleLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(StoreState::Loading);
        Self {
            session,
            lookup,
            lookup_timeout,
            state,
            started: AtomicBool::new(false),
        }
    }

    /// 解析有效权限集合
    ///
    /// 只有第一次调用会执行查询，之后的调用直接返回；
    /// 需要等待结果的调用方使用 `wait_ready()`
    pub async fn initialize(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            log::debug!("Permission store already initializing, skipped");
            return;
        }

        let guard = ReadyGuard {
            state: &self.state,
            armed: true,
        };

        let resolved = match tokio::time::timeout(self.lookup_timeout, self.resolve()).await {
            Ok(resolved) => resolved,
            Err(_) => {
                log::warn!(
                    "Permission resolution timed out after {:?}, failing closed",
                    self.lookup_timeout
                );
                EffectivePermissions::empty(None, InitOutcome::TimedOut)
            }
        };

        guard.complete(resolved);
    }

    async fn resolve(&self) -> EffectivePermissions {
        let actor = match self.session.current_session().await {
            Ok(Some(actor)) => actor,
            Ok(None) => {
                log::debug!("No active session, resolving to empty permission set");
                return EffectivePermissions::empty(None, InitOutcome::Anonymous);
            }
            Err(e) => {
                log::warn!("Session lookup failed: {}", e);
                return EffectivePermissions::empty(None, InitOutcome::SessionFailed);
            }
        };

        let assignments = match self.lookup.role_assignments(&actor.id).await {
            Ok(assignments) => assignments,
            Err(e) => {
                log::warn!("Role lookup failed for actor {}: {}", actor.id, e);
                return EffectivePermissions::empty(Some(actor), InitOutcome::LookupFailed);
            }
        };

        let (permissions, quarantined) = aggregate_permissions(&assignments);
        log::debug!(
            "Resolved {} roles for actor {}: {:?}",
            assignments.len(),
            actor.id,
            permissions
        );

        EffectivePermissions {
            actor: Some(actor),
            permissions,
            quarantined,
            outcome: InitOutcome::Resolved,
        }
    }

    /// 成员检查；Loading 期间恒为 false
    pub fn has_permission(&self, permission: Permission) -> bool {
        let granted = match &*self.state.borrow() {
            StoreState::Loading => false,
            StoreState::Ready(effective) => effective.contains(permission),
        };
        log::debug!("Permission check: {} -> {}", permission, granted);
        granted
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready()
    }

    /// 等待存储进入 Ready
    pub async fn wait_ready(&self) {
        let mut rx = self.state.subscribe();
        // sender 与 self 同生命周期，这里不会收到关闭错误
        let _ = rx.wait_for(StoreState::is_ready).await;
    }

    /// 当前快照；Loading 期间为 `None`
    pub fn snapshot(&self) -> Option<Arc<EffectivePermissions>> {
        match &*self.state.borrow() {
            StoreState::Loading => None,
            StoreState::Ready(effective) => Some(Arc::clone(effective)),
        }
    }

    /// 有效权限列表（有序）；Loading 期间为空
    pub fn permissions(&self) -> Vec<Permission> {
        self.snapshot()
            .map(|effective| effective.permissions.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn quarantined(&self) -> Vec<String> {
        self.snapshot()
            .map(|effective| effective.quarantined.clone())
            .unwrap_or_default()
    }

    pub fn actor(&self) -> Option<Actor> {
        self.snapshot().and_then(|effective| effective.actor.clone())
    }

    pub fn outcome(&self) -> Option<InitOutcome> {
        self.snapshot().map(|effective| effective.outcome)
    }
}

impl std::fmt::Debug for PermissionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionStore")
            .field("lookup_timeout", &self.lookup_timeout)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
