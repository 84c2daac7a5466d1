use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::role_lookup::RoleLookup;
use crate::core::error::{ConfigResult, LookupResult, PermissionError, PermissionResult};
use crate::core::{ActorId, RoleAssignment, RoleRecord};

/// 角色目录 - 进程内的角色查询服务
///
/// 职责：
/// 1. 管理角色行（role_id -> RoleRecord）
/// 2. 管理角色分配（actor -> [role_id]，保持分配顺序）
/// 3. 以连接查询的形式实现 `RoleLookup`
///
/// 删除角色不会级联删除分配，残留的分配在查询时表现为 `role: None`
#[derive(Debug, Default, Clone)]
pub struct RoleDirectory {
    roles: Arc<RwLock<HashMap<String, RoleRecord>>>,
    assignments: Arc<RwLock<HashMap<ActorId, Vec<String>>>>,
}

impl RoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 角色管理 ====================

    /// 创建角色，ID 已存在时报错
    pub fn create_role(&self, record: RoleRecord) -> PermissionResult<()> {
        let mut roles = self.roles.write();
        if roles.contains_key(&record.id) {
            return Err(PermissionError::DuplicateRole(record.id));
        }
        roles.insert(record.id.clone(), record);
        Ok(())
    }

    /// 插入或替换角色，返回被替换的旧角色
    pub fn upsert_role(&self, record: RoleRecord) -> Option<RoleRecord> {
        self.roles.write().insert(record.id.clone(), record)
    }

    pub fn remove_role(&self, role_id: &str) -> PermissionResult<RoleRecord> {
        self.roles
            .write()
            .remove(role_id)
            .ok_or_else(|| PermissionError::RoleNotFound(role_id.to_string()))
    }

    pub fn get_role(&self, role_id: &str) -> Option<RoleRecord> {
        self.roles.read().get(role_id).cloned()
    }

    /// 列出全部角色，按 ID 排序
    pub fn list_roles(&self) -> Vec<RoleRecord> {
        let mut roles: Vec<RoleRecord> = self.roles.read().values().cloned().collect();
        roles.sort_by(|a, b| a.id.cmp(&b.id));
        roles
    }

    // ==================== 角色分配 ====================

    /// 为操作者分配角色；重复分配是幂等的
    pub fn assign_role(&self, actor: &ActorId, role_id: &str) -> PermissionResult<()> {
        if !self.roles.read().contains_key(role_id) {
            return Err(PermissionError::RoleNotFound(role_id.to_string()));
        }

        let mut assignments = self.assignments.write();
        let role_ids = assignments.entry(actor.clone()).or_default();
        if !role_ids.iter().any(|id| id == role_id) {
            role_ids.push(role_id.to_string());
        }
        Ok(())
    }

    /// 撤销分配，返回是否确实存在该分配
    pub fn revoke_role(&self, actor: &ActorId, role_id: &str) -> bool {
        let mut assignments = self.assignments.write();
        match assignments.get_mut(actor) {
            Some(role_ids) => {
                let before = role_ids.len();
                role_ids.retain(|id| id != role_id);
                before != role_ids.len()
            }
            None => false,
        }
    }

    /// 列出操作者的角色 ID，按分配顺序
    pub fn list_actor_roles(&self, actor: &ActorId) -> Vec<String> {
        self.assignments
            .read()
            .get(actor)
            .cloned()
            .unwrap_or_default()
    }

    /// 列出持有指定角色的全部操作者
    pub fn list_role_members(&self, role_id: &str) -> Vec<ActorId> {
        let mut members: Vec<ActorId> = self
            .assignments
            .read()
            .iter()
            .filter(|(_, role_ids)| role_ids.iter().any(|id| id == role_id))
            .map(|(actor, _)| actor.clone())
            .collect();
        members.sort();
        members
    }
}

#[async_trait]
impl RoleLookup for RoleDirectory {
    async fn role_assignments(&self, actor: &ActorId) -> LookupResult<Vec<RoleAssignment>> {
        let role_ids = self.list_actor_roles(actor);
        let roles = self.roles.read();
        Ok(role_ids
            .into_iter()
            .map(|role_id| RoleAssignment {
                role: roles.get(&role_id).cloned(),
                role_id,
            })
            .collect())
    }
}

// ==================== 夹具文件 ====================

/// 夹具中的一条分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub employee_id: String,
    pub role_id: String,
}

/// 角色夹具
///
/// ```toml
/// [[roles]]
/// id = "manager"
/// name = "Manager"
/// permissions = ["manage_employees", "view_dashboard"]
///
/// [[assignments]]
/// employee_id = "emp-1"
/// role_id = "manager"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleFixture {
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
}

impl RoleFixture {
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// 构建角色目录；分配引用不存在的角色时报错
    pub fn into_directory(self) -> PermissionResult<RoleDirectory> {
        let directory = RoleDirectory::new();
        for role in self.roles {
            directory.create_role(role)?;
        }
        for entry in self.assignments {
            directory.assign_role(&ActorId::new(entry.employee_id), &entry.role_id)?;
        }
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> RoleRecord {
        RoleRecord::new("manager", "Manager")
            .with_permissions(["manage_employees", "view_dashboard"])
    }

    #[test]
    fn test_create_duplicate_role() {
        let directory = RoleDirectory::new();
        directory.create_role(manager()).unwrap();

        let result = directory.create_role(manager());
        assert_eq!(result, Err(PermissionError::DuplicateRole("manager".into())));
    }

    #[test]
    fn test_assign_unknown_role() {
        let directory = RoleDirectory::new();
        let result = directory.assign_role(&ActorId::new("emp-1"), "ghost");
        assert_eq!(result, Err(PermissionError::RoleNotFound("ghost".into())));
    }

    #[test]
    fn test_assign_is_idempotent_and_ordered() {
        let directory = RoleDirectory::new();
        let actor = ActorId::new("emp-1");
        directory.create_role(manager()).unwrap();
        directory.create_role(RoleRecord::new("auditor", "Auditor")).unwrap();

        directory.assign_role(&actor, "manager").unwrap();
        directory.assign_role(&actor, "auditor").unwrap();
        directory.assign_role(&actor, "manager").unwrap();

        assert_eq!(directory.list_actor_roles(&actor), vec!["manager", "auditor"]);
        assert_eq!(directory.list_role_members("auditor"), vec![actor.clone()]);
    }

    #[test]
    fn test_revoke_role() {
        let directory = RoleDirectory::new();
        let actor = ActorId::new("emp-1");
        directory.create_role(manager()).unwrap();
        directory.assign_role(&actor, "manager").unwrap();

        assert!(directory.revoke_role(&actor, "manager"));
        assert!(!directory.revoke_role(&actor, "manager"));
        assert!(directory.list_actor_roles(&actor).is_empty());
    }

    #[tokio::test]
    async fn test_lookup_joins_role_rows() {
        let directory = RoleDirectory::new();
        let actor = ActorId::new("emp-1");
        directory.create_role(manager()).unwrap();
        directory.assign_role(&actor, "manager").unwrap();

        let assignments = directory.role_assignments(&actor).await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].role_id, "manager");
        assert_eq!(assignments[0].role.as_ref().map(|r| r.name.as_str()), Some("Manager"));
    }

    #[tokio::test]
    async fn test_removed_role_leaves_dangling_assignment() {
        let directory = RoleDirectory::new();
        let actor = ActorId::new("emp-1");
        directory.create_role(manager()).unwrap();
        directory.assign_role(&actor, "manager").unwrap();
        directory.remove_role("manager").unwrap();

        let assignments = directory.role_assignments(&actor).await.unwrap();
        assert_eq!(assignments, vec![RoleAssignment::dangling("manager")]);
    }

    #[test]
    fn test_fixture_from_toml() {
        let fixture: RoleFixture = toml::from_str(
            r#"
            [[roles]]
            id = "manager"
            name = "Manager"
            permissions = ["manage_employees", "view_dashboard"]
            created_at = "2024-01-15T09:30:00Z"

            [[assignments]]
            employee_id = "emp-1"
            role_id = "manager"
            "#,
        )
        .unwrap();

        assert!(fixture.roles[0].created_at.is_some());
        let directory = fixture.into_directory().unwrap();
        assert_eq!(directory.list_actor_roles(&ActorId::new("emp-1")), vec!["manager"]);
    }

    #[test]
    fn test_fixture_rejects_unknown_role_reference() {
        let fixture = RoleFixture {
            roles: vec![],
            assignments: vec![AssignmentEntry {
                employee_id: "emp-1".into(),
                role_id: "ghost".into(),
            }],
        };
        assert!(matches!(
            fixture.into_directory(),
            Err(PermissionError::RoleNotFound(_))
        ));
    }
}
