// ==========================================
// 伊斯兰金融合规工作流 - 核心库
// ==========================================
// 系统定位: 交易合规工作流装配引擎
// 数据流: 交易配置 -> 模板解析 -> 装配 -> 政策校验 -> 任务生成
// 红线: 核心只读目录快照,不做持久化与网络 I/O
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与类型
pub mod domain;

// 目录层 - 模块/模板目录
pub mod catalog;

// 引擎层 - 装配/校验/任务生成
pub mod engine;

// 配置层 - 装配配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 应用状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AccountingFramework, DealScale, Jurisdiction, Priority, ProductType, TaskStatus,
};

// 领域对象
pub use domain::{
    DealConfiguration, ModuleStep, PolicyConstraint, Task, ValidationError, ValidationResult,
    Workflow, WorkflowModule, WorkflowStep, WorkflowTemplate,
};

// 目录
pub use catalog::{CatalogStore, ModuleCatalog};

// 引擎
pub use engine::{
    EngineError, PolicyValidator, TaskGenerator, TemplateResolver, WorkflowAssembler,
    WorkflowOrchestrator, WorkflowPlan,
};

// API
pub use api::{ApiError, WorkflowApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "伊斯兰金融合规工作流";
