//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。日志写到 stderr，
//! stdout 留给程序输出和 token 列表。

use crate::error::CliError;
use clox_config::{LogFormat, LogLevel, LoggingConfig, Phase};
use std::io;
use tracing::Level;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// CLI 自身的日志 target
pub const CLI_TARGET: &str = "clox::cli";

/// 配置中的日志级别转换为 tracing 级别
pub fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// 根据日志配置构建 target 过滤器
pub fn build_targets(config: &LoggingConfig) -> Targets {
    Phase::ALL.iter().fold(
        Targets::new()
            .with_default(to_tracing_level(config.level))
            .with_target(CLI_TARGET, to_tracing_level(config.level)),
        |targets, &phase| {
            targets.with_target(phase.target(), to_tracing_level(config.level_for(phase)))
        },
    )
}

/// 使用日志配置初始化全局日志系统
pub fn init(config: &LoggingConfig) -> Result<(), CliError> {
    let layer = create_format_layer(config.format).with_filter(build_targets(config));
    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

/// Create formatter layer based on format
fn create_format_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
    }
}
