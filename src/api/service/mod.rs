pub mod navigation;
pub mod role_directory;
pub mod role_lookup;

pub use navigation::{
    allowed_actions, check_path, route_for_path, visible_routes, NavRoute, PageAction,
    DASHBOARD_ROUTES,
};
pub use role_directory::{AssignmentEntry, RoleDirectory, RoleFixture};
pub use role_lookup::RoleLookup;
