//! 仪表盘导航与页面操作的访问门定义
//!
//! 侧边栏中的每个入口都由一个 any-of 访问门保护；
//! 页面内的管理操作（上传制度、创建活动等）同样按权限隐藏

use serde::Serialize;

use crate::api::permission::{AccessGate, GateDecision, PermissionStore};
use crate::core::Permission;

/// 侧边栏导航入口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavRoute {
    pub title: &'static str,
    pub href: &'static str,
    pub permissions: &'static [Permission],
}

impl NavRoute {
    pub fn gate(&self) -> AccessGate {
        AccessGate::any_of(self.permissions.iter().copied())
    }
}

/// 侧边栏入口，按显示顺序
pub const DASHBOARD_ROUTES: &[NavRoute] = &[
    NavRoute {
        title: "Dashboard",
        href: "/dashboard",
        permissions: &[Permission::ViewDashboard],
    },
    NavRoute {
        title: "Our Team",
        href: "/dashboard/team",
        permissions: &[Permission::ViewDashboard],
    },
    NavRoute {
        title: "Employees",
        href: "/dashboard/employees",
        permissions: &[Permission::ManageEmployees, Permission::ViewEmployees],
    },
    NavRoute {
        title: "Attendance",
        href: "/dashboard/attendance",
        permissions: &[Permission::ManageAttendance, Permission::MarkAttendance],
    },
    NavRoute {
        title: "Tickets",
        href: "/dashboard/tickets",
        permissions: &[
            Permission::ManageTickets,
            Permission::CreateTickets,
            Permission::ViewOwnTickets,
        ],
    },
    NavRoute {
        title: "Departments",
        href: "/dashboard/departments",
        permissions: &[Permission::ManageDepartments, Permission::ViewDepartments],
    },
    NavRoute {
        title: "Expenses",
        href: "/dashboard/expenses",
        permissions: &[Permission::ManageExpenses],
    },
    NavRoute {
        title: "Payroll",
        href: "/dashboard/payroll",
        permissions: &[Permission::ManagePayroll, Permission::ViewPayroll],
    },
    NavRoute {
        title: "Policies",
        href: "/dashboard/policies",
        permissions: &[Permission::ViewDashboard],
    },
    NavRoute {
        title: "Gallery",
        href: "/dashboard/gallery",
        permissions: &[Permission::ViewDashboard],
    },
];

/// 当前操作者可见的导航入口；存储未就绪时为空
pub fn visible_routes(store: &PermissionStore) -> Vec<&'static NavRoute> {
    DASHBOARD_ROUTES
        .iter()
        .filter(|route| route.gate().evaluate(store).is_visible())
        .collect()
}

/// 规范化请求路径：去掉查询串和片段，去掉末尾的 `/`
///
/// 相对路径、空路径段、`.`/`..` 路径段和反斜杠视为无效，返回 `None`
fn normalize_path(path: &str) -> Option<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if !path.starts_with('/') || path.contains('\\') {
        return None;
    }

    let path = path.trim_end_matches('/');
    let malformed = path
        .split('/')
        .skip(1)
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if malformed {
        None
    } else {
        Some(path)
    }
}

fn is_dashboard_path(path: &str) -> bool {
    path.split('/')
        .nth(1)
        .is_some_and(|segment| segment.eq_ignore_ascii_case("dashboard"))
}

/// 按路径查找导航入口
///
/// `/dashboard` 只匹配自身；其他入口同时覆盖其子路径，
/// 如 `/dashboard/gallery/42` 归属 Gallery。查询串和片段不参与匹配
pub fn route_for_path(path: &str) -> Option<&'static NavRoute> {
    let path = normalize_path(path)?;
    DASHBOARD_ROUTES.iter().find(|route| {
        path == route.href
            || (route.href != "/dashboard"
                && path
                    .strip_prefix(route.href)
                    .is_some_and(|rest| rest.starts_with('/')))
    })
}

/// 判定操作者能否打开指定路径
///
/// 仪表盘下没有对应入口的路径和无效路径一律拒绝；
/// 仪表盘之外的路径不受限制。存储未就绪时均为 Pending
pub fn check_path(store: &PermissionStore, path: &str) -> GateDecision {
    if let Some(route) = route_for_path(path) {
        return route.gate().evaluate(store);
    }

    match normalize_path(path) {
        Some(normalized) if !is_dashboard_path(normalized) => {
            AccessGate::any_of(Vec::<Permission>::new()).evaluate(store)
        }
        _ if !store.is_ready() => GateDecision::Pending,
        _ => {
            log::warn!("Path {:?} matches no dashboard route, denied", path);
            GateDecision::Denied
        }
    }
}

/// 页面内受保护的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    UploadPolicy,
    CreateGalleryEvent,
    UploadGalleryPhotos,
    UpdatePayrollStatus,
    ReviewExpense,
}

impl PageAction {
    pub const ALL: [PageAction; 5] = [
        PageAction::UploadPolicy,
        PageAction::CreateGalleryEvent,
        PageAction::UploadGalleryPhotos,
        PageAction::UpdatePayrollStatus,
        PageAction::ReviewExpense,
    ];

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            PageAction::UploadPolicy
            | PageAction::CreateGalleryEvent
            | PageAction::UploadGalleryPhotos => &[Permission::ManageEmployees],
            PageAction::UpdatePayrollStatus => &[Permission::ManagePayroll],
            PageAction::ReviewExpense => &[Permission::ManageExpenses],
        }
    }

    pub fn gate(&self) -> AccessGate {
        AccessGate::any_of(self.permissions().iter().copied())
    }
}

impl std::fmt::Display for PageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PageAction::UploadPolicy => "upload_policy",
            PageAction::CreateGalleryEvent => "create_gallery_event",
            PageAction::UploadGalleryPhotos => "upload_gallery_photos",
            PageAction::UpdatePayrollStatus => "update_payroll_status",
            PageAction::ReviewExpense => "review_expense",
        };
        f.write_str(name)
    }
}

/// 当前操作者可执行的页面操作
pub fn allowed_actions(store: &PermissionStore) -> Vec<PageAction> {
    PageAction::ALL
        .into_iter()
        .filter(|action| action.gate().evaluate(store).is_visible())
        .collect()
}
