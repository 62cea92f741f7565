use crate::domain::validation::PolicyConstraint;
use serde::{Deserialize, Serialize};

/// 政策配置（持久化对象）
///
/// 存储位置: 配置文件 `policy` 节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyProfile {
    /// 硬关卡不可绕过
    pub hard_gate_not_bypassable: bool,

    /// 证据必须由依赖步骤收集
    pub evidence_required: bool,

    /// 总工期上限（天,None 表示不限制）
    pub max_total_duration_days: Option<u32>,
}

impl Default for PolicyProfile {
    fn default() -> Self {
        Self {
            hard_gate_not_bypassable: true,
            evidence_required: true,
            max_total_duration_days: None,
        }
    }
}

impl PolicyProfile {
    /// 校验器使用的约束列表（顺序固定）
    pub fn constraints(&self) -> Vec<PolicyConstraint> {
        let mut constraints = Vec::new();
        if self.hard_gate_not_bypassable {
            constraints.push(PolicyConstraint::HardGateNotBypassable);
        }
        if self.evidence_required {
            constraints.push(PolicyConstraint::EvidenceRequired);
        }
        if let Some(days) = self.max_total_duration_days {
            constraints.push(PolicyConstraint::MaxTotalDuration { days });
        }
        constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_default_constraints() {
        assert_eq!(PolicyProfile::default().constraints(), PolicyConstraint::defaults());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let profile: PolicyProfile =
            serde_json::from_str(r#"{"maxTotalDurationDays": 45}"#).unwrap();
        assert!(profile.hard_gate_not_bypassable);
        assert_eq!(
            profile.constraints().last(),
            Some(&PolicyConstraint::MaxTotalDuration { days: 45 })
        );
    }

    #[test]
    fn test_disabled_rules_are_dropped() {
        let profile = PolicyProfile {
            hard_gate_not_bypassable: false,
            evidence_required: false,
            max_total_duration_days: None,
        };
        assert!(profile.constraints().is_empty());
    }
}
