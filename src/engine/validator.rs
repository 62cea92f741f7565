// ==========================================
// 伊斯兰金融合规工作流 - 政策校验引擎
// ==========================================
// 红线: 违规以数据返回,不抛错
// 红线: 不短路,一次返回全部违规
// 红线: 纯函数,不修改输入工作流
// ==========================================
// 职责: 检查硬关卡、证据链、总工期
// 输入: Workflow + PolicyConstraint 列表
// 输出: ValidationResult
// ==========================================

use crate::domain::validation::{PolicyConstraint, ValidationError, ValidationResult};
use crate::domain::workflow::{Workflow, WorkflowStep};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

// ==========================================
// PolicyValidator - 政策校验引擎
// ==========================================
#[derive(Debug, Default)]
pub struct PolicyValidator {
    // 无状态
}

impl PolicyValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 按约束顺序逐条校验,违规按步骤顺序累积
    #[instrument(skip(self, workflow, constraints), fields(
        deal_id = %workflow.deal_id,
        constraints = constraints.len()
    ))]
    pub fn validate(
        &self,
        workflow: &Workflow,
        constraints: &[PolicyConstraint],
    ) -> ValidationResult {
        let mut errors = Vec::new();

        for constraint in constraints {
            let before = errors.len();
            match constraint {
                PolicyConstraint::HardGateNotBypassable => {
                    self.check_hard_gates(workflow, &mut errors)
                }
                PolicyConstraint::EvidenceRequired => self.check_evidence(workflow, &mut errors),
                PolicyConstraint::MaxTotalDuration { days } => {
                    self.check_total_duration(workflow, *days, &mut errors)
                }
            }
            debug!(
                constraint = ?constraint,
                violations = errors.len() - before,
                "约束校验完成"
            );
        }

        let result = ValidationResult::from_errors(errors);
        debug!(valid = result.valid, errors = result.errors.len(), "工作流校验完成");
        result
    }

    // ==========================================
    // 规则1: 硬关卡不可绕过
    // ==========================================

    /// 硬关卡必须在关键路径上,或是某个关键路径步骤的直接依赖
    fn check_hard_gates(&self, workflow: &Workflow, errors: &mut Vec<ValidationError>) {
        let on_path: HashSet<&str> = workflow.critical_path.iter().map(String::as_str).collect();

        let guarded: HashSet<&str> = workflow
            .steps
            .iter()
            .filter(|s| on_path.contains(s.id.as_str()))
            .flat_map(|s| s.depends_on.iter().map(String::as_str))
            .collect();

        for step in workflow.steps.iter().filter(|s| s.hard_gate) {
            let id = step.id.as_str();
            if !on_path.contains(id) && !guarded.contains(id) {
                errors.push(ValidationError::HardGateBypass {
                    step_id: step.id.clone(),
                });
            }
        }
    }

    // ==========================================
    // 规则2: 证据链完整
    // ==========================================

    /// 所需证据由步骤自身或其直接依赖收集
    fn check_evidence(&self, workflow: &Workflow, errors: &mut Vec<ValidationError>) {
        let by_id: HashMap<&str, &WorkflowStep> =
            workflow.steps.iter().map(|s| (s.id.as_str(), s)).collect();

        for step in &workflow.steps {
            let mut reported: Vec<&str> = Vec::new();
            for evidence_type in &step.evidence_required {
                if reported.contains(&evidence_type.as_str()) {
                    continue;
                }

                let satisfied = step.provides(evidence_type)
                    || step.depends_on.iter().any(|dep| {
                        by_id
                            .get(dep.as_str())
                            .map(|d| d.provides(evidence_type))
                            .unwrap_or(false)
                    });

                if !satisfied {
                    reported.push(evidence_type);
                    errors.push(ValidationError::MissingEvidence {
                        step_id: step.id.clone(),
                        evidence_type: evidence_type.clone(),
                    });
                }
            }
        }
    }

    // ==========================================
    // 规则3: 总工期上限
    // ==========================================

    fn check_total_duration(
        &self,
        workflow: &Workflow,
        limit_days: u32,
        errors: &mut Vec<ValidationError>,
    ) {
        if workflow.total_duration_days > limit_days {
            errors.push(ValidationError::DurationExceeded {
                total_days: workflow.total_duration_days,
                limit_days,
            });
        }
    }
}
