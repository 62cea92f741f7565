// ==========================================
// 伊斯兰金融合规工作流 - 任务
// ==========================================
// 派生对象: 工作流变化时整体重新生成,无独立生命周期
// ==========================================

use crate::domain::types::{Priority, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Task - 可分派任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub step_id: String,   // 对应工作流步骤
    pub module_id: String,
    pub name: String,
    pub assignee_role: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
}
