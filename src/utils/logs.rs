use serde::{Deserialize, Serialize};

/// 初始日志级别的环境变量
pub const LOG_LEVEL_ENV: &str = "GAME_MARKET_LOG";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<log::LevelFilter> for LogLevel {
    fn from(level: log::LevelFilter) -> Self {
        match level {
            log::LevelFilter::Error => LogLevel::Error,
            log::LevelFilter::Warn => LogLevel::Warn,
            log::LevelFilter::Info => LogLevel::Info,
            log::LevelFilter::Debug => LogLevel::Debug,
            log::LevelFilter::Trace => LogLevel::Trace,
            log::LevelFilter::Off => LogLevel::Off,
        }
    }
}

/// 解析日志级别名称（不区分大小写）
pub fn parse_level(level: &str) -> Result<log::LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        "off" => Ok(log::LevelFilter::Off),
        other => Err(format!("无效的日志级别: {}", other)),
    }
}

/// 从环境变量读取初始级别，未设置或无效时为 Info
pub fn level_from_env() -> log::LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| parse_level(&v).ok())
        .unwrap_or(log::LevelFilter::Info)
}

/// 安装标准输出日志
///
/// 分发器本身放行全部级别，实际输出由 `log::max_level` 控制，
/// 因此之后可以通过 [`set_log_level`] 动态调整。
pub fn init_logging(initial: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .level_for("sqlx", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    log::set_max_level(initial);
    Ok(())
}

/// 动态设置日志输出级别（不持久化）
pub fn set_log_level(level: &str) -> Result<(), String> {
    log::set_max_level(parse_level(level)?);
    Ok(())
}

/// 获取当前日志级别
pub fn get_log_level() -> LogLevel {
    log::max_level().into()
}
