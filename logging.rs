//! 日志初始化
//!
//! 库本身只通过 `tracing` 宏产生事件，由二进制程序在启动时根据 `LoggingConfig`
//! 安装一次 `tracing-subscriber`。

use crate::config::LoggingConfig;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 把配置中的级别字符串转换为 `Level`，无法识别时使用 INFO
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// 初始化全局日志订阅者
///
/// - `output = "stdout"`：输出到标准输出
/// - `output = "file"`：追加写入 `log_file`，必要时创建父目录
///
/// 重复初始化或无法打开日志文件时返回错误。
pub fn init_logging(config: &LoggingConfig) -> crate::Result<()> {
    let filter = LevelFilter::from_level(parse_level(&config.level));

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    format!(
                        "Failed to create log directory '{}': {}",
                        parent.display(),
                        e
                    )
                })?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .map_err(|e| format!("Failed to open log file '{}': {}", log_file.display(), e))?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(filter)
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(filter)
                .try_init()?;
        }
    }

    Ok(())
}
