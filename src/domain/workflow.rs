// ==========================================
// 伊斯兰金融合规工作流 - 装配结果
// ==========================================
// 红线: Workflow 为值对象,装配完成后不再修改
// 红线: 步骤依赖必须在同一工作流内可解析且无环
// ==========================================

use crate::domain::types::{Jurisdiction, ProductType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// WorkflowStep - 扁平化后的工作流步骤
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    // ===== 标识 =====
    pub id: String,        // 全局 ID: {module_id}.{local_id}
    pub module_id: String, // 所属模块（非拥有引用）
    pub name: String,

    // ===== 依赖与工期 =====
    pub depends_on: Vec<String>,
    pub duration_days: u32,

    // ===== 合规属性 =====
    pub evidence_required: Vec<String>,
    pub evidence_provided: Vec<String>,
    pub hard_gate: bool,
    pub assignee_role: Option<String>,

    // ===== 排期 (相对装配起始日,单位: 天) =====
    pub earliest_start: u32,
    pub earliest_finish: u32,
    pub latest_start: u32,
    pub latest_finish: u32,
    pub slack: u32,
}

impl WorkflowStep {
    /// 是否为某证据类型的收集步骤
    pub fn provides(&self, evidence_type: &str) -> bool {
        self.evidence_provided.iter().any(|e| e == evidence_type)
    }
}

// ==========================================
// Workflow - 装配后的工作流
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub deal_id: String,
    pub jurisdiction: Jurisdiction,
    pub product_type: ProductType,
    pub template_name: String,

    /// 拓扑一致的步骤序列
    pub steps: Vec<WorkflowStep>,

    /// 关键路径（正向顺序）
    pub critical_path: Vec<String>,

    pub total_duration_days: u32,
}

impl Workflow {
    pub fn step(&self, step_id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_on_critical_path(&self, step_id: &str) -> bool {
        self.critical_path.iter().any(|id| id == step_id)
    }

    /// 终止步骤: 没有任何步骤依赖它
    pub fn terminal_steps(&self) -> Vec<&WorkflowStep> {
        let referenced: HashSet<&str> = self
            .steps
            .iter()
            .flat_map(|s| s.depends_on.iter().map(String::as_str))
            .collect();

        self.steps
            .iter()
            .filter(|s| !referenced.contains(s.id.as_str()))
            .collect()
    }

    /// 看板摘要
    pub fn summary(&self) -> WorkflowSummary {
        let mut modules: Vec<&str> = Vec::new();
        for step in &self.steps {
            if !modules.contains(&step.module_id.as_str()) {
                modules.push(&step.module_id);
            }
        }

        WorkflowSummary {
            template_name: self.template_name.clone(),
            module_count: modules.len(),
            step_count: self.steps.len(),
            hard_gate_count: self.steps.iter().filter(|s| s.hard_gate).count(),
            evidence_step_count: self
                .steps
                .iter()
                .filter(|s| !s.evidence_provided.is_empty())
                .count(),
            critical_path_length: self.critical_path.len(),
            total_duration_days: self.total_duration_days,
        }
    }
}

// ==========================================
// WorkflowSummary - 工作流摘要（供看板展示）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub template_name: String,
    pub module_count: usize,
    pub step_count: usize,
    pub hard_gate_count: usize,
    pub evidence_step_count: usize,
    pub critical_path_length: usize,
    pub total_duration_days: u32,
}
