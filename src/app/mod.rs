// ==========================================
// 伊斯兰金融合规工作流 - 应用层
// ==========================================
// 职责: 组装配置、目录与 API,供宿主应用持有
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
