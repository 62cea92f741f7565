// ==========================================
// 伊斯兰金融合规工作流 - 领域模型层
// ==========================================
// 职责: 定义交易配置、目录定义、装配结果、校验结果、任务
// 红线: 不含目录加载逻辑,不含引擎逻辑
// ==========================================

pub mod deal;
pub mod module;
pub mod task;
pub mod types;
pub mod validation;
pub mod workflow;

// 重导出核心类型
pub use deal::DealConfiguration;
pub use module::{ModuleStep, WorkflowModule, WorkflowTemplate};
pub use task::Task;
pub use types::{AccountingFramework, DealScale, Jurisdiction, Priority, ProductType, TaskStatus};
pub use validation::{PolicyConstraint, ValidationError, ValidationResult};
pub use workflow::{Workflow, WorkflowStep, WorkflowSummary};
