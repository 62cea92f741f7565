// ==========================================
// 伊斯兰金融合规工作流 - 目录层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 目录文档在加载时即拒绝,不把畸形数据带入装配
// ==========================================

use thiserror::Error;

/// 目录层错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== 文档解析错误 =====
    #[error("目录文档解析失败 (origin={origin}): {message}")]
    Parse { origin: String, message: String },

    // ===== 文档校验错误 =====
    #[error("模块定义无效 (module={module_id}): {reason}")]
    InvalidModule { module_id: String, reason: String },

    #[error("模板定义无效 (template={template}): {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("模块 ID 重复: {0}")]
    DuplicateModule(String),

    #[error("模板重复: jurisdiction={jurisdiction}, product_type={product_type}")]
    DuplicateTemplate {
        jurisdiction: String,
        product_type: String,
    },

    // ===== 数据源错误 =====
    #[error(transparent)]
    Source(#[from] anyhow::Error),

    // ===== 并发错误 =====
    #[error("目录锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type CatalogResult<T> = Result<T, CatalogError>;
