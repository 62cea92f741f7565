// ==========================================
// 伊斯兰金融合规工作流 - 目录文档解析与校验
// ==========================================
// 职责: JSON 文档 -> 强类型模块/模板,并在加载时一次性校验
// 说明: 只校验单文档内部形状; 跨文档引用 (模板->模块、模块->模块)
//       在模板解析时报告 NotFound
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::domain::module::{WorkflowModule, WorkflowTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 全局步骤 ID 的分隔符,局部 ID 中不允许出现
pub const STEP_ID_SEPARATOR: char = '.';

/// 单步工期上限（天）
pub const MAX_STEP_DURATION_DAYS: u32 = 3650;

// ==========================================
// 文档类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    Module,
    Template,
}

/// 原始目录文档（尚未解析）
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub kind: DocumentKind,
    /// 来源描述（文件路径或 builtin:xxx）,用于错误定位
    pub origin: String,
    pub content: String,
}

impl RawDocument {
    pub fn module(origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::Module,
            origin: origin.into(),
            content: content.into(),
        }
    }

    pub fn template(origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::Template,
            origin: origin.into(),
            content: content.into(),
        }
    }
}

/// 解析后的目录文档
#[derive(Debug, Clone)]
pub enum CatalogDocument {
    Module(WorkflowModule),
    Template(WorkflowTemplate),
}

// ==========================================
// 解析
// ==========================================

/// 解析并校验单个文档
pub fn parse_document(raw: &RawDocument) -> CatalogResult<CatalogDocument> {
    let parse_err = |e: serde_json::Error| CatalogError::Parse {
        origin: raw.origin.clone(),
        message: e.to_string(),
    };

    match raw.kind {
        DocumentKind::Module => {
            let module: WorkflowModule = serde_json::from_str(&raw.content).map_err(parse_err)?;
            validate_module(&module)?;
            Ok(CatalogDocument::Module(module))
        }
        DocumentKind::Template => {
            let template: WorkflowTemplate =
                serde_json::from_str(&raw.content).map_err(parse_err)?;
            validate_template(&template)?;
            Ok(CatalogDocument::Template(template))
        }
    }
}

// ==========================================
// 校验
// ==========================================

/// 校验模块定义
///
/// # 校验规则
/// 1. 模块 ID 非空且不含分隔符
/// 2. 至少包含一个步骤
/// 3. 步骤 ID 非空、不含分隔符、模块内唯一
/// 4. 步骤局部依赖必须指向本模块内已声明的步骤
/// 5. 证据类型与模块依赖 ID 不能为空串
pub fn validate_module(module: &WorkflowModule) -> CatalogResult<()> {
    let invalid = |reason: String| CatalogError::InvalidModule {
        module_id: module.id.clone(),
        reason,
    };

    check_identifier(&module.id).map_err(|r| invalid(format!("模块 ID {}", r)))?;

    if module.steps.is_empty() {
        return Err(invalid("模块至少包含一个步骤".to_string()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for step in &module.steps {
        check_identifier(&step.id).map_err(|r| invalid(format!("步骤 ID '{}' {}", step.id, r)))?;

        if !seen.insert(step.id.as_str()) {
            return Err(invalid(format!("步骤 ID 重复: {}", step.id)));
        }

        if step.name.trim().is_empty() {
            return Err(invalid(format!("步骤 {} 名称为空", step.id)));
        }

        if step.duration_days > MAX_STEP_DURATION_DAYS {
            return Err(invalid(format!(
                "步骤 {} 工期 {} 天超过上限 {} 天",
                step.id, step.duration_days, MAX_STEP_DURATION_DAYS
            )));
        }

        let blank_evidence = step
            .evidence_required
            .iter()
            .chain(step.evidence_provided.iter())
            .any(|e| e.trim().is_empty());
        if blank_evidence {
            return Err(invalid(format!("步骤 {} 含空证据类型", step.id)));
        }
    }

    for step in &module.steps {
        for dep in &step.depends_on {
            if module.step(dep).is_none() {
                return Err(invalid(format!(
                    "步骤 {} 依赖未声明的步骤 {}",
                    step.id, dep
                )));
            }
        }
    }

    if module.depends_on.iter().any(|m| m.trim().is_empty()) {
        return Err(invalid("模块依赖包含空 ID".to_string()));
    }

    Ok(())
}

/// 校验模板定义
///
/// 空模块列表合法（装配结果为空工作流）
pub fn validate_template(template: &WorkflowTemplate) -> CatalogResult<()> {
    let label = if template.name.is_empty() {
        format!("{}_{}", template.jurisdiction, template.product_type)
    } else {
        template.name.clone()
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for module_ref in &template.module_refs {
        if module_ref.trim().is_empty() {
            return Err(CatalogError::InvalidTemplate {
                template: label,
                reason: "模块引用为空".to_string(),
            });
        }
        if !seen.insert(module_ref.as_str()) {
            return Err(CatalogError::InvalidTemplate {
                template: label,
                reason: format!("模块 {} 被重复引用", module_ref),
            });
        }
    }

    Ok(())
}

fn check_identifier(id: &str) -> Result<(), &'static str> {
    if id.trim().is_empty() {
        return Err("不能为空");
    }
    if id.contains(STEP_ID_SEPARATOR) {
        return Err("不能包含 '.'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::module::ModuleStep;

    #[test]
    fn test_parse_module_document() {
        let raw = RawDocument::module(
            "inline",
            r#"{
                "id": "shariah_structuring",
                "hardGate": true,
                "steps": [
                    {"id": "memo", "name": "Structure memo", "durationDays": 3},
                    {"id": "fatwa", "name": "Fatwa", "durationDays": 2,
                     "dependsOn": ["memo"], "evidenceProvided": ["fatwa"]}
                ]
            }"#,
        );

        match parse_document(&raw).unwrap() {
            CatalogDocument::Module(m) => {
                assert!(m.hard_gate);
                assert_eq!(m.steps.len(), 2);
                assert_eq!(m.steps[1].evidence_provided, vec!["fatwa".to_string()]);
            }
            other => panic!("期望模块文档, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let raw = RawDocument::module(
            "inline",
            r#"{"id": "m", "steps": [{"id": "a", "name": "A", "durationDays": 1, "duration": 3}]}"#,
        );
        let err = parse_document(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_dangling_local_dependency_rejected() {
        let module = WorkflowModule::new(
            "m",
            vec![ModuleStep::new("a", "A", 1).depends_on(&["missing"])],
        );
        let err = validate_module(&module).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidModule { .. }));
    }

    #[test]
    fn test_duplicate_step_and_separator_rejected() {
        let dup = WorkflowModule::new(
            "m",
            vec![ModuleStep::new("a", "A", 1), ModuleStep::new("a", "A2", 1)],
        );
        assert!(validate_module(&dup).is_err());

        let dotted = WorkflowModule::new("m", vec![ModuleStep::new("a.b", "AB", 1)]);
        assert!(validate_module(&dotted).is_err());

        let empty = WorkflowModule::new("m", Vec::new());
        assert!(validate_module(&empty).is_err());
    }

    #[test]
    fn test_step_duration_upper_bound() {
        let at_limit = WorkflowModule::new(
            "m",
            vec![ModuleStep::new("a", "A", MAX_STEP_DURATION_DAYS)],
        );
        assert!(validate_module(&at_limit).is_ok());

        let huge = WorkflowModule::new("m", vec![ModuleStep::new("a", "A", u32::MAX)]);
        let err = validate_module(&huge).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidModule { ref module_id, .. } if module_id == "m"));
    }

    #[test]
    fn test_self_dependency_left_to_assembly() {
        // 自依赖是环,由装配阶段报告 Cycle,加载阶段不拦截
        let module = WorkflowModule::new(
            "m",
            vec![ModuleStep::new("a", "A", 1).depends_on(&["a"])],
        )
        .depends_on(&["m"]);
        assert!(validate_module(&module).is_ok());
    }

    #[test]
    fn test_template_duplicate_ref_rejected() {
        let raw = RawDocument::template(
            "inline",
            r#"{"jurisdiction": "QATAR", "productType": "IJARAH", "moduleRefs": ["a", "a"]}"#,
        );
        let err = parse_document(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTemplate { .. }));
    }
}
