//! 角色与角色分配模型
//!
//! `RoleRecord` 是后端返回的原始行，权限字段为未受信任的字符串；
//! `Role` 是在边界处校验后的角色，只包含词表内的权限

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::core::Permission;

/// 操作者标识（会话范围内的不透明 ID）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 已认证的操作者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub email: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// 后端返回的角色行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RoleRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            permissions: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 在边界处校验权限字符串
    ///
    /// 词表外的令牌不会进入 `Role`，而是原样放入隔离列表
    pub fn validate(&self) -> ValidatedRole {
        let mut permissions = BTreeSet::new();
        let mut quarantined = Vec::new();

        for raw in &self.permissions {
            match Permission::from_str(raw) {
                Ok(permission) => {
                    permissions.insert(permission);
                }
                Err(_) => quarantined.push(raw.clone()),
            }
        }

        ValidatedRole {
            role: Role {
                id: self.id.clone(),
                name: self.name.clone(),
                description: self.description.clone(),
                permissions,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            quarantined,
        }
    }
}

/// 校验后的角色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: BTreeSet<Permission>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// `RoleRecord::validate` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRole {
    pub role: Role,
    /// 未能识别的原始令牌
    pub quarantined: Vec<String>,
}

/// 操作者与角色的一条分配记录
///
/// `role` 为 `None` 表示分配指向的角色行已不存在，此时不贡献任何权限
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role_id: String,
    pub role: Option<RoleRecord>,
}

impl RoleAssignment {
    pub fn new(role: RoleRecord) -> Self {
        Self {
            role_id: role.id.clone(),
            role: Some(role),
        }
    }

    pub fn dangling(role_id: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
            role: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_splits_known_and_unknown() {
        let record = RoleRecord::new("r1", "Manager").with_permissions([
            "manage_employees",
            "view_dashboard",
            "launch_rockets",
            "manage_employees",
        ]);

        let validated = record.validate();
        assert_eq!(validated.role.permissions.len(), 2);
        assert!(validated.role.has_permission(Permission::ManageEmployees));
        assert!(validated.role.has_permission(Permission::ViewDashboard));
        assert_eq!(validated.quarantined, vec!["launch_rockets".to_string()]);
    }

    #[test]
    fn test_validate_empty_role() {
        let validated = RoleRecord::new("r0", "Nobody").validate();
        assert!(validated.role.permissions.is_empty());
        assert!(validated.quarantined.is_empty());
    }

    #[test]
    fn test_validate_keeps_timestamps() {
        let record: RoleRecord = serde_json::from_str(
            r#"{
                "id": "r2",
                "name": "Payroll",
                "permissions": ["manage_payroll"],
                "created_at": "2024-01-15T09:30:00Z",
                "updated_at": "2024-03-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        let role = record.validate().role;
        assert_eq!(role.created_at, record.created_at);
        assert_eq!(role.updated_at, record.updated_at);
        assert_eq!(
            role.created_at.map(|t| t.to_rfc3339()),
            Some("2024-01-15T09:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_record_deserialize_defaults() {
        let record: RoleRecord =
            serde_json::from_str(r#"{"id": "r1", "name": "Auditor"}"#).unwrap();
        assert!(record.permissions.is_empty());
        assert!(record.description.is_empty());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_dangling_assignment() {
        let assignment = RoleAssignment::dangling("gone");
        assert_eq!(assignment.role_id, "gone");
        assert!(assignment.role.is_none());
    }
}
