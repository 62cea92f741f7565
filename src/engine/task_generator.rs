// ==========================================
// 伊斯兰金融合规工作流 - 任务生成引擎
// ==========================================
// 红线: 只接受校验通过的工作流,不重复校验
// 红线: 确定性输出,不读取系统时钟
// ==========================================
// 职责: Workflow -> Task[] (截止日、优先级、初始状态)
// 输入: Workflow + ValidationResult + 装配起始日
// 输出: 每个步骤一个 Task,顺序与工作流步骤一致
// ==========================================

use crate::domain::task::Task;
use crate::domain::types::{Priority, TaskStatus};
use crate::domain::validation::ValidationResult;
use crate::domain::workflow::{Workflow, WorkflowStep};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 任务 ID 命名空间 (UUID v5)
pub const TASK_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a3e_9b4d_5e70_8a21_c3d4_e5f6_0718);

/// 未指定负责角色时的默认角色
pub const DEFAULT_ASSIGNEE_ROLE: &str = "deal_team";

/// 同一交易同一步骤的任务 ID 恒定
pub fn task_id(deal_id: &str, step_id: &str) -> Uuid {
    Uuid::new_v5(&TASK_ID_NAMESPACE, format!("{}/{}", deal_id, step_id).as_bytes())
}

// ==========================================
// TaskGenerator - 任务生成引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct TaskGenerator {
    default_assignee_role: String,
}

impl Default for TaskGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskGenerator {
    pub fn new() -> Self {
        Self {
            default_assignee_role: DEFAULT_ASSIGNEE_ROLE.to_string(),
        }
    }

    pub fn with_default_role(role: impl Into<String>) -> Self {
        Self {
            default_assignee_role: role.into(),
        }
    }

    /// 生成任务列表
    ///
    /// # 规则
    /// 1. due_date = start_date + earliest_start
    /// 2. 优先级: 关键路径或硬关卡 -> HIGH; 下游存在硬关卡 -> MEDIUM; 其余 LOW
    /// 3. 状态: 无依赖 -> READY; 否则 WAITING
    ///
    /// # 错误
    /// - `InvalidWorkflow`: validation.valid == false
    #[instrument(skip(self, workflow, validation), fields(deal_id = %workflow.deal_id))]
    pub fn generate(
        &self,
        workflow: &Workflow,
        validation: &ValidationResult,
        start_date: NaiveDate,
    ) -> EngineResult<Vec<Task>> {
        if !validation.valid {
            warn!(errors = validation.errors.len(), "工作流未通过校验,拒绝生成任务");
            return Err(EngineError::InvalidWorkflow {
                error_count: validation.errors.len(),
            });
        }

        let gated = gate_downstream(workflow);

        let tasks: Vec<Task> = workflow
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| Task {
                id: task_id(&workflow.deal_id, &step.id),
                step_id: step.id.clone(),
                module_id: step.module_id.clone(),
                name: step.name.clone(),
                assignee_role: step
                    .assignee_role
                    .clone()
                    .unwrap_or_else(|| self.default_assignee_role.clone()),
                due_date: due_date(start_date, step),
                priority: self.priority_of(workflow, step, gated[i]),
                status: if step.depends_on.is_empty() {
                    TaskStatus::Ready
                } else {
                    TaskStatus::Waiting
                },
            })
            .collect();

        info!(
            tasks = tasks.len(),
            high = tasks.iter().filter(|t| t.priority == Priority::High).count(),
            "任务生成完成"
        );
        Ok(tasks)
    }

    fn priority_of(&self, workflow: &Workflow, step: &WorkflowStep, gate_downstream: bool) -> Priority {
        if step.hard_gate || workflow.is_on_critical_path(&step.id) {
            Priority::High
        } else if gate_downstream {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

fn due_date(start_date: NaiveDate, step: &WorkflowStep) -> NaiveDate {
    start_date
        .checked_add_days(Days::new(u64::from(step.earliest_start)))
        .unwrap_or(NaiveDate::MAX)
}

/// 每个步骤的（传递）下游是否存在硬关卡
///
/// 步骤按拓扑序排列,逆序一次扫描即可
fn gate_downstream(workflow: &Workflow) -> Vec<bool> {
    let index: HashMap<&str, usize> = workflow
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();

    let mut gated = vec![false; workflow.steps.len()];
    for (i, step) in workflow.steps.iter().enumerate().rev() {
        // step 自身或其下游有硬关卡 -> 传播给它的依赖
        let propagate = step.hard_gate || gated[i];
        if !propagate {
            continue;
        }
        for dep in &step.depends_on {
            if let Some(&d) = index.get(dep.as_str()) {
                gated[d] = true;
            }
        }
    }
    gated
}
