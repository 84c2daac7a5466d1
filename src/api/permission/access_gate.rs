use std::collections::BTreeSet;

use super::permission_store::PermissionStore;
use crate::core::Permission;

/// 访问门的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// 权限存储仍在加载，不渲染任何内容
    Pending,
    Granted,
    Denied,
}

impl GateDecision {
    pub fn is_visible(&self) -> bool {
        matches!(self, GateDecision::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateDecision::Pending => "pending",
            GateDecision::Granted => "granted",
            GateDecision::Denied => "denied",
        }
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 访问门 - 按所需权限列表决定受保护内容是否可见
///
/// - 默认 any-of：持有任一所需权限即可见
/// - `require_all`：必须持有全部所需权限
/// - 所需列表为空时视为无限制，存储就绪后在两种模式下都可见
///
/// 拒绝时不渲染任何内容，也没有占位或禁用状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    permissions: Vec<Permission>,
    require_all: bool,
}

impl AccessGate {
    pub fn new(permissions: impl IntoIterator<Item = Permission>, require_all: bool) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
            require_all,
        }
    }

    pub fn any_of(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::new(permissions, false)
    }

    pub fn all_of(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::new(permissions, true)
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn requires_all(&self) -> bool {
        self.require_all
    }

    /// 对就绪后的权限集合做判定
    pub fn decide(&self, granted: &BTreeSet<Permission>) -> GateDecision {
        if self.permissions.is_empty() {
            return GateDecision::Granted;
        }

        let allowed = if self.require_all {
            self.permissions.iter().all(|p| granted.contains(p))
        } else {
            self.permissions.iter().any(|p| granted.contains(p))
        };

        if allowed {
            GateDecision::Granted
        } else {
            GateDecision::Denied
        }
    }

    /// 基于权限存储的当前快照判定
    pub fn evaluate(&self, store: &PermissionStore) -> GateDecision {
        let decision = match store.snapshot() {
            None => GateDecision::Pending,
            Some(effective) => self.decide(&effective.permissions),
        };

        log::debug!(
            "Gate check: required={:?} require_all={} decision={}",
            self.permissions,
            self.require_all,
            decision
        );
        metrics::counter!("hrgate_gate_checks_total", "decision" => decision.as_str())
            .increment(1);

        decision
    }

    /// 仅在判定为 Granted 时执行 `children` 并返回其结果
    pub fn render<T>(&self, store: &PermissionStore, children: impl FnOnce() -> T) -> Option<T> {
        if self.evaluate(store).is_visible() {
            Some(children())
        } else {
            None
        }
    }
}
