use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::error::SessionResult;
use crate::core::Actor;

/// 会话提供方
///
/// 返回 `Ok(None)` 表示当前没有登录的操作者，这不是错误
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> SessionResult<Option<Actor>>;
}

/// 进程内会话提供方
///
/// 登录时写入操作者，登出时清空；权限存储只在初始化时读取一次
#[derive(Debug, Default)]
pub struct StaticSessionProvider {
    actor: RwLock<Option<Actor>>,
}

impl StaticSessionProvider {
    /// 未登录状态
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(actor: Actor) -> Self {
        Self {
            actor: RwLock::new(Some(actor)),
        }
    }

    pub fn sign_in(&self, actor: Actor) {
        log::info!("Session established for actor {}", actor.id);
        *self.actor.write() = Some(actor);
    }

    pub fn sign_out(&self) {
        if let Some(actor) = self.actor.write().take() {
            log::info!("Session closed for actor {}", actor.id);
        }
    }

    pub fn actor(&self) -> Option<Actor> {
        self.actor.read().clone()
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> SessionResult<Option<Actor>> {
        Ok(self.actor())
    }
}
