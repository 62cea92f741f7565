// ==========================================
// 伊斯兰金融合规工作流 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供页面级 UI 代码调用
// ==========================================

pub mod error;
pub mod workflow_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use workflow_api::WorkflowApi;
