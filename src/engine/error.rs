// ==========================================
// 伊斯兰金融合规工作流 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: NotFound / Cycle 为配置完整性错误,直接传播给调用方
// 红线: 校验违规不是错误,以 ValidationResult 数据返回
// ==========================================

use std::fmt;
use thiserror::Error;

/// 未找到的对象类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Template,
    Module,
    Step,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundKind::Template => write!(f, "模板"),
            NotFoundKind::Module => write!(f, "模块"),
            NotFoundKind::Step => write!(f, "步骤"),
        }
    }
}

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ===== 配置完整性错误 =====
    #[error("{kind}未找到: {id}")]
    NotFound { kind: NotFoundKind, id: String },

    #[error("依赖图存在环: {}", .step_ids.join(" -> "))]
    Cycle { step_ids: Vec<String> },

    #[error("累计工期溢出: {step_id}")]
    DurationOverflow { step_id: String },

    // ===== 调用顺序错误 =====
    #[error("工作流未通过校验,不能生成任务 (违规数={error_count})")]
    InvalidWorkflow { error_count: usize },
}

impl EngineError {
    pub fn not_found(kind: NotFoundKind, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
