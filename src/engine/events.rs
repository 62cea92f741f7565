// ==========================================
// 伊斯兰金融合规工作流 - 引擎层事件发布
// ==========================================
// 职责: 定义工作流事件发布 trait
// 说明: Engine 层定义 trait,宿主应用（通知铃、看板、后端客户端）实现适配器
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 工作流事件类型
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowEventType {
    /// 工作流装配完成
    WorkflowAssembled,
    /// 校验发现违规
    ValidationFailed,
    /// 任务已生成
    TasksGenerated,
    /// 目录已重新加载
    CatalogReloaded,
}

impl WorkflowEventType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowEventType::WorkflowAssembled => "WorkflowAssembled",
            WorkflowEventType::ValidationFailed => "ValidationFailed",
            WorkflowEventType::TasksGenerated => "TasksGenerated",
            WorkflowEventType::CatalogReloaded => "CatalogReloaded",
        }
    }
}

/// 工作流事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEvent {
    /// 交易 ID（目录事件为 None）
    pub deal_id: Option<String>,
    pub event_type: WorkflowEventType,
    /// 事件来源描述
    pub source: Option<String>,
    /// 受影响的步骤（None 表示整个工作流）
    pub step_ids: Option<Vec<String>>,
}

impl WorkflowEvent {
    /// 交易级事件
    pub fn for_deal(
        deal_id: impl Into<String>,
        event_type: WorkflowEventType,
        source: Option<String>,
    ) -> Self {
        Self {
            deal_id: Some(deal_id.into()),
            event_type,
            source,
            step_ids: None,
        }
    }

    /// 目录级事件
    pub fn catalog(source: impl Into<String>) -> Self {
        Self {
            deal_id: None,
            event_type: WorkflowEventType::CatalogReloaded,
            source: Some(source.into()),
            step_ids: None,
        }
    }

    pub fn with_steps(mut self, step_ids: Vec<String>) -> Self {
        self.step_ids = Some(step_ids);
        self
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 工作流事件发布者
///
/// # 返回
/// - `Ok(id)`: 下游回执 ID（不支持时为空字符串）
/// - `Err`: 发布失败
pub trait WorkflowEventPublisher: Send + Sync {
    fn publish(&self, event: WorkflowEvent) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者（单元测试等场景）
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl WorkflowEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: WorkflowEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            deal_id = ?event.deal_id,
            event_type = event.event_type.as_str(),
            "NoOpEventPublisher: 跳过事件发布"
        );
        Ok(String::new())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn WorkflowEventPublisher>> 的使用
#[derive(Clone)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn WorkflowEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn WorkflowEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    pub fn publish(&self, event: WorkflowEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(publisher) => publisher.publish(event),
            None => {
                tracing::debug!(
                    deal_id = ?event.deal_id,
                    event_type = event.event_type.as_str(),
                    "OptionalEventPublisher: 未配置发布者,跳过事件"
                );
                Ok(String::new())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for OptionalEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalEventPublisher")
            .field("configured", &self.is_configured())
            .finish()
    }
}
