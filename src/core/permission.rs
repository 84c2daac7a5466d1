//! 权限类型定义
//!
//! 提供封闭的权限词表，外部传入的权限字符串在边界处解析为 `Permission`

use serde::{Deserialize, Serialize};

use crate::core::error::PermissionError;

/// 权限令牌
///
/// 词表是封闭的：只按相等比较，不存在层级或通配符语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageEmployees,
    ViewEmployees,
    ManageAttendance,
    MarkAttendance,
    ManageDepartments,
    ViewDepartments,
    ManageExpenses,
    ManagePayroll,
    ViewPayroll,
    ManageTickets,
    CreateTickets,
    ViewOwnTickets,
    AssignRoles,
}

impl Permission {
    /// 词表中的全部权限，按声明顺序
    pub const ALL: [Permission; 14] = [
        Permission::ViewDashboard,
        Permission::ManageEmployees,
        Permission::ViewEmployees,
        Permission::ManageAttendance,
        Permission::MarkAttendance,
        Permission::ManageDepartments,
        Permission::ViewDepartments,
        Permission::ManageExpenses,
        Permission::ManagePayroll,
        Permission::ViewPayroll,
        Permission::ManageTickets,
        Permission::CreateTickets,
        Permission::ViewOwnTickets,
        Permission::AssignRoles,
    ];

    /// 线上使用的令牌名
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ManageEmployees => "manage_employees",
            Permission::ViewEmployees => "view_employees",
            Permission::ManageAttendance => "manage_attendance",
            Permission::MarkAttendance => "mark_attendance",
            Permission::ManageDepartments => "manage_departments",
            Permission::ViewDepartments => "view_departments",
            Permission::ManageExpenses => "manage_expenses",
            Permission::ManagePayroll => "manage_payroll",
            Permission::ViewPayroll => "view_payroll",
            Permission::ManageTickets => "manage_tickets",
            Permission::CreateTickets => "create_tickets",
            Permission::ViewOwnTickets => "view_own_tickets",
            Permission::AssignRoles => "assign_roles",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = PermissionError;

    /// 严格匹配：不做大小写折叠，也不去除空白
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownPermission(s.to_string()))
    }
}
