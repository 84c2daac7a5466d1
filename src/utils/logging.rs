// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志正确 flush

use crate::config::Config;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::sync::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 初始化文件日志
///
/// 日志级别可被 `RUST_LOG` 覆盖；权限检查的逐条记录位于 `debug` 级别
///
/// # Examples
/// ```no_run
/// use hrgate::config::Config;
/// use hrgate::utils::logging;
///
/// let config = Config::default();
/// logging::init(&config).expect("日志初始化失败");
/// ```
pub fn init(config: &Config) -> Result<(), flexi_logger::FlexiLoggerError> {
    let handle = Logger::try_with_env_or_str(&config.log.level)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.log.file)
                .directory(&config.log.dir),
        )
        .rotate(
            Criterion::Size(config.log.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.log.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;

    store_handle(handle);
    log::info!("Logging initialized: {}/{}", config.log.dir, config.log.file);
    Ok(())
}

/// 初始化标准错误输出日志，供 CLI 使用
pub fn init_stderr(level: &str) -> Result<(), flexi_logger::FlexiLoggerError> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .start()?;

    store_handle(handle);
    Ok(())
}

fn store_handle(handle: LoggerHandle) {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        *guard = Some(handle);
    }
}

/// 刷新并关闭日志系统
///
/// 在程序退出前调用，确保所有异步日志都已写入文件
pub fn shutdown() {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        if let Some(handle) = guard.take() {
            handle.flush();
            // handle 在这里被 drop，会等待异步线程完成
        }
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}
