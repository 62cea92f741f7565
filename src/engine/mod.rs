// ==========================================
// 伊斯兰金融合规工作流 - 引擎层
// ==========================================
// 职责: 模板解析、工作流装配、政策校验、任务生成
// 红线: 引擎不做 I/O,只读目录快照
// 红线: 校验违规以数据返回,配置完整性错误直接传播
// ==========================================

pub mod assembler;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod resolver;
pub mod task_generator;
pub mod validator;

// 重导出核心引擎
pub use assembler::{global_step_id, WorkflowAssembler};
pub use error::{EngineError, EngineResult, NotFoundKind};
pub use events::{
    NoOpEventPublisher, OptionalEventPublisher, WorkflowEvent, WorkflowEventPublisher,
    WorkflowEventType,
};
pub use orchestrator::{WorkflowOrchestrator, WorkflowPlan};
pub use resolver::{ResolvedTemplate, TemplateResolver};
pub use task_generator::{task_id, TaskGenerator, DEFAULT_ASSIGNEE_ROLE};
pub use validator::PolicyValidator;
