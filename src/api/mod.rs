pub mod permission;
pub mod service;
pub mod session;

pub use permission::{AccessGate, GateDecision, PermissionStore};
pub use service::{RoleDirectory, RoleLookup};
pub use session::{SessionProvider, StaticSessionProvider};
