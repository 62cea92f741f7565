// ==========================================
// 伊斯兰金融合规工作流 - 政策约束与校验结果
// ==========================================
// 红线: 校验违规以数据返回,不抛错
// 红线: 校验不短路,一次返回全部违规
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PolicyConstraint - 政策约束
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyConstraint {
    /// 硬关卡不可绕过
    HardGateNotBypassable,
    /// 证据必须由依赖步骤（或自身）收集
    EvidenceRequired,
    /// 总工期上限（监管时限）
    #[serde(rename_all = "camelCase")]
    MaxTotalDuration { days: u32 },
}

impl PolicyConstraint {
    /// 默认约束集合
    pub fn defaults() -> Vec<PolicyConstraint> {
        vec![
            PolicyConstraint::HardGateNotBypassable,
            PolicyConstraint::EvidenceRequired,
        ]
    }
}

// ==========================================
// ValidationError - 校验违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[serde(rename_all = "camelCase")]
    HardGateBypass { step_id: String },

    #[serde(rename_all = "camelCase")]
    MissingEvidence {
        step_id: String,
        evidence_type: String,
    },

    #[serde(rename_all = "camelCase")]
    DurationExceeded { total_days: u32, limit_days: u32 },
}

impl ValidationError {
    /// 违规代码（稳定标识,供前端分组）
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::HardGateBypass { .. } => "HARD_GATE_BYPASS",
            ValidationError::MissingEvidence { .. } => "MISSING_EVIDENCE",
            ValidationError::DurationExceeded { .. } => "DURATION_EXCEEDED",
        }
    }

    /// 关联步骤（工期类违规无步骤）
    pub fn step_id(&self) -> Option<&str> {
        match self {
            ValidationError::HardGateBypass { step_id } => Some(step_id),
            ValidationError::MissingEvidence { step_id, .. } => Some(step_id),
            ValidationError::DurationExceeded { .. } => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::HardGateBypass { step_id } => {
                write!(f, "硬关卡可被绕过: step={}", step_id)
            }
            ValidationError::MissingEvidence {
                step_id,
                evidence_type,
            } => write!(f, "缺少证据: step={}, evidence={}", step_id, evidence_type),
            ValidationError::DurationExceeded {
                total_days,
                limit_days,
            } => write!(f, "总工期超限: total={}天, limit={}天", total_days, limit_days),
        }
    }
}

// ==========================================
// ValidationResult - 校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// 某步骤的全部违规
    pub fn errors_for_step<'a>(
        &'a self,
        step_id: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.step_id() == Some(step_id))
    }

    pub fn count_by_code(&self, code: &str) -> usize {
        self.errors.iter().filter(|e| e.code() == code).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_wire_format() {
        let err = ValidationError::MissingEvidence {
            step_id: "shariah_review.fatwa".to_string(),
            evidence_type: "fatwa".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "MISSING_EVIDENCE");
        assert_eq!(json["stepId"], "shariah_review.fatwa");
        assert_eq!(json["evidenceType"], "fatwa");
    }

    #[test]
    fn test_validation_result_valid_flag() {
        assert!(ValidationResult::from_errors(Vec::new()).valid);

        let result = ValidationResult::from_errors(vec![
            ValidationError::HardGateBypass {
                step_id: "a.x".to_string(),
            },
            ValidationError::DurationExceeded {
                total_days: 40,
                limit_days: 30,
            },
        ]);
        assert!(!result.valid);
        assert_eq!(result.count_by_code("HARD_GATE_BYPASS"), 1);
        assert_eq!(result.errors_for_step("a.x").count(), 1);
    }

    #[test]
    fn test_policy_constraint_wire_format() {
        let c: PolicyConstraint =
            serde_json::from_str(r#"{"kind":"MAX_TOTAL_DURATION","days":45}"#).unwrap();
        assert_eq!(c, PolicyConstraint::MaxTotalDuration { days: 45 });
    }
}
