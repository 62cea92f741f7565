// ==========================================
// 伊斯兰金融合规工作流 - 模块与模板
// ==========================================
// 职责: 目录中的静态定义（模块 / 模块步骤 / 产品模板）
// 红线: 加载后不可变,只在目录校验通过后进入引擎
// ==========================================

use crate::domain::types::{Jurisdiction, ProductType};
use serde::{Deserialize, Serialize};

// ==========================================
// ModuleStep - 模块内步骤定义
// ==========================================
// depends_on 为模块内局部步骤 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleStep {
    pub id: String,
    pub name: String,
    pub duration_days: u32,

    #[serde(default)]
    pub depends_on: Vec<String>,

    /// 需要的证据类型
    #[serde(default)]
    pub evidence_required: Vec<String>,

    /// 本步骤收集的证据类型（非空即为证据收集步骤）
    #[serde(default)]
    pub evidence_provided: Vec<String>,

    /// 步骤级硬关卡覆写（缺省继承模块 hardGate）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_gate: Option<bool>,

    /// 负责角色（缺省继承模块 ownerRole）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_role: Option<String>,
}

impl ModuleStep {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration_days: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_days,
            depends_on: Vec::new(),
            evidence_required: Vec::new(),
            evidence_provided: Vec::new(),
            hard_gate: None,
            assignee_role: None,
        }
    }

    pub fn depends_on(mut self, ids: &[&str]) -> Self {
        self.depends_on = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn requires_evidence(mut self, types: &[&str]) -> Self {
        self.evidence_required = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn provides_evidence(mut self, types: &[&str]) -> Self {
        self.evidence_provided = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn hard_gate(mut self, hard_gate: bool) -> Self {
        self.hard_gate = Some(hard_gate);
        self
    }
}

// ==========================================
// WorkflowModule - 工作流模块
// ==========================================
// 身份标识 = id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkflowModule {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// 适用辖区（None 表示通用模块）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,

    /// 适用产品（None 表示通用模块）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,

    pub steps: Vec<ModuleStep>,

    /// 模块级依赖（模块 ID）
    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub hard_gate: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_role: Option<String>,
}

impl WorkflowModule {
    pub fn new(id: impl Into<String>, steps: Vec<ModuleStep>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            jurisdiction: None,
            product_type: None,
            steps,
            depends_on: Vec::new(),
            hard_gate: false,
            owner_role: None,
        }
    }

    pub fn depends_on(mut self, module_ids: &[&str]) -> Self {
        self.depends_on = module_ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn hard_gate(mut self, hard_gate: bool) -> Self {
        self.hard_gate = hard_gate;
        self
    }

    pub fn owner_role(mut self, role: impl Into<String>) -> Self {
        self.owner_role = Some(role.into());
        self
    }

    /// 查找模块内步骤
    pub fn step(&self, local_id: &str) -> Option<&ModuleStep> {
        self.steps.iter().find(|s| s.id == local_id)
    }

    /// 步骤是否为硬关卡（步骤覆写优先）
    pub fn is_hard_gate_step(&self, step: &ModuleStep) -> bool {
        step.hard_gate.unwrap_or(self.hard_gate)
    }
}

// ==========================================
// WorkflowTemplate - 产品模板
// ==========================================
// module_refs 顺序即扁平化顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkflowTemplate {
    pub product_type: ProductType,
    pub jurisdiction: Jurisdiction,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub module_refs: Vec<String>,
}

impl WorkflowTemplate {
    pub fn new(jurisdiction: Jurisdiction, product_type: ProductType, module_refs: &[&str]) -> Self {
        Self {
            product_type,
            jurisdiction,
            name: format!("{}_{}", jurisdiction, product_type),
            module_refs: module_refs.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn key(&self) -> (Jurisdiction, ProductType) {
        (self.jurisdiction, self.product_type)
    }
}
