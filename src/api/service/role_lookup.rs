use async_trait::async_trait;

use crate::core::error::LookupResult;
use crate::core::{ActorId, RoleAssignment};

/// 角色查询服务
///
/// 返回操作者的全部角色分配，每条分配附带角色行（含原始权限列表）
#[async_trait]
pub trait RoleLookup: Send + Sync {
    async fn role_assignments(&self, actor: &ActorId) -> LookupResult<Vec<RoleAssignment>>;
}
