//! 会话模块
//!
//! 定义会话提供方接口，权限存储通过它读取当前操作者

pub mod session_provider;

pub use session_provider::{SessionProvider, StaticSessionProvider};
