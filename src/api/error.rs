// ==========================================
// 伊斯兰金融合规工作流 - API层错误类型
// ==========================================
// 职责: 汇总引擎/目录/配置错误,提供本地化的用户提示
// 红线: 校验违规不是错误,以 ValidationResult 数据返回
// ==========================================

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::i18n::{kind_name, t_with_args};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// 错误代码（稳定标识,供前端分支处理）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Engine(EngineError::NotFound { .. }) => "NOT_FOUND",
            ApiError::Engine(EngineError::Cycle { .. }) => "CYCLE",
            ApiError::Engine(EngineError::DurationOverflow { .. }) => "DURATION_OVERFLOW",
            ApiError::Engine(EngineError::InvalidWorkflow { .. }) => "INVALID_WORKFLOW",
            ApiError::Catalog(_) => "CATALOG_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// 按当前语言渲染的用户提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidInput(detail) => {
                t_with_args("error.invalid_input", &[("detail", detail.as_str())])
            }
            ApiError::Engine(EngineError::NotFound { kind, id }) => t_with_args(
                "error.not_found",
                &[("kind", kind_name(*kind).as_str()), ("id", id.as_str())],
            ),
            ApiError::Engine(EngineError::Cycle { step_ids }) => t_with_args(
                "error.cycle",
                &[("path", step_ids.join(" -> ").as_str())],
            ),
            ApiError::Engine(EngineError::DurationOverflow { step_id }) => t_with_args(
                "error.duration_overflow",
                &[("step", step_id.as_str())],
            ),
            ApiError::Engine(EngineError::InvalidWorkflow { error_count }) => t_with_args(
                "error.invalid_workflow",
                &[("count", error_count.to_string().as_str())],
            ),
            ApiError::Catalog(e) => {
                t_with_args("error.catalog", &[("detail", e.to_string().as_str())])
            }
            ApiError::Config(e) => {
                t_with_args("error.config", &[("detail", e.to_string().as_str())])
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
