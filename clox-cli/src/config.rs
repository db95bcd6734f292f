//! CLI 配置
//!
//! 合并顺序：默认值 → `--config` 文件 → 命令行参数

use crate::error::CliError;
use clox_config::{CloxConfig, LogFormat, LogLevel};
use std::path::Path;

/// 命令行上可覆盖的配置项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub trace: bool,
}

/// 读取配置文件（如有）并应用命令行覆盖
pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<CloxConfig, CliError> {
    let mut config = match file {
        Some(path) => CloxConfig::from_json_file(path)?,
        None => CloxConfig::default(),
    };
    apply(&mut config, overrides);
    Ok(config)
}

fn apply(config: &mut CloxConfig, overrides: &Overrides) {
    if let Some(level) = overrides.log_level {
        config.logging.level = level;
    }
    if let Some(format) = overrides.log_format {
        config.logging.format = format;
    }
    if overrides.trace {
        config.vm.trace_execution = true;
        // 执行追踪以 trace 级别输出，没有单独设置时打开 vm 阶段
        config.logging.vm.get_or_insert(LogLevel::Trace);
    }
}

/// clap value parser for `--log-level`
pub fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| {
        format!("unknown log level '{s}' (expected silent, error, warn, info, debug or trace)")
    })
}

/// clap value parser for `--log-format`
pub fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    LogFormat::parse(s)
        .ok_or_else(|| format!("unknown log format '{s}' (expected pretty, compact or json)"))
}
