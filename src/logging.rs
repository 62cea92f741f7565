// ==========================================
// 伊斯兰金融合规工作流 - 日志初始化
// ==========================================
// 职责: 宿主进程启动时安装 tracing 订阅器
// 格式: text（本地排查）/ json（日志采集）,由 GRC_WORKFLOW_LOG_FORMAT 选择
// 过滤: RUST_LOG 优先; 缺省时本 crate 输出 info,依赖库只输出 warn
// 红线: 重复初始化不 panic（宿主可能已安装订阅器）
// ==========================================

use crate::config::config_keys;
use std::fmt as std_fmt;
use std::str::FromStr;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// 默认过滤器
const DEFAULT_FILTER: &str = "warn,grc_workflow=info";

/// 测试过滤器（装配/校验的 debug 明细）
const TEST_FILTER: &str = "warn,grc_workflow=debug";

// ==========================================
// LogFormat - 日志输出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 解析格式变量; 未设置或为空时使用 text
fn resolve_format(raw: Option<&str>) -> Result<LogFormat, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(LogFormat::default()),
        Some(value) => value.parse(),
    }
}

/// 初始化日志系统（格式取自环境变量）
///
/// # 环境变量
/// - GRC_WORKFLOW_LOG_FORMAT: text / json（默认 text,非法值回退 text 并告警）
/// - RUST_LOG: 日志级别过滤器,例如 RUST_LOG=grc_workflow::engine=trace
///
/// # 示例
/// ```no_run
/// use grc_workflow::logging;
/// logging::init();
/// ```
pub fn init() {
    let raw = std::env::var(config_keys::LOG_FORMAT).ok();
    match resolve_format(raw.as_deref()) {
        Ok(format) => init_with(format),
        Err(value) => {
            init_with(LogFormat::Text);
            warn!(key = config_keys::LOG_FORMAT, value = %value, "日志格式取值非法,使用 text");
        }
    }
}

/// 按指定格式初始化日志系统
pub fn init_with(format: LogFormat) {
    let result = match format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter())
            .with_current_span(true)
            .flatten_event(true)
            .try_init(),
    };

    if result.is_err() {
        warn!(format = %format, "日志订阅器已存在,跳过初始化");
    }
}

/// 初始化日志系统（JSON 格式,供宿主应用日志采集）
pub fn init_json() {
    init_with(LogFormat::Json);
}

/// 初始化测试环境的日志系统
///
/// 本 crate 输出 debug,可多次调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}
