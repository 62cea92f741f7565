// ==========================================
// 伊斯兰金融合规工作流 - 模板解析器
// ==========================================
// 职责: (辖区, 产品) -> 模板 + 模块
// 红线: 模板引用不存在的模块属于配置完整性错误,必须报告,不可跳过
// 红线: 纯查找,无副作用
// ==========================================

use crate::catalog::ModuleCatalog;
use crate::domain::module::{WorkflowModule, WorkflowTemplate};
use crate::domain::types::{Jurisdiction, ProductType};
use crate::engine::error::{EngineError, EngineResult, NotFoundKind};
use tracing::{debug, warn};

// ==========================================
// ResolvedTemplate - 解析结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ResolvedTemplate<'a> {
    pub template: &'a WorkflowTemplate,
    /// 与 template.module_refs 顺序一致
    pub modules: Vec<&'a WorkflowModule>,
}

impl<'a> ResolvedTemplate<'a> {
    /// 模块在模板中的位置
    pub fn position_of(&self, module_id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == module_id)
    }
}

// ==========================================
// TemplateResolver - 模板解析器
// ==========================================
#[derive(Debug, Default)]
pub struct TemplateResolver {
    // 无状态,目录通过参数传入
}

impl TemplateResolver {
    pub fn new() -> Self {
        Self {}
    }

    /// 解析模板及其引用的全部模块
    ///
    /// # 错误
    /// - `NotFound(Template)`: 无匹配模板
    /// - `NotFound(Module)`: 模板引用的模块或模块声明的依赖模块不在目录中
    pub fn resolve<'a>(
        &self,
        catalog: &'a ModuleCatalog,
        jurisdiction: Jurisdiction,
        product_type: ProductType,
    ) -> EngineResult<ResolvedTemplate<'a>> {
        let template = catalog.template(jurisdiction, product_type).ok_or_else(|| {
            warn!(jurisdiction = %jurisdiction, product_type = %product_type, "未找到模板");
            EngineError::not_found(
                NotFoundKind::Template,
                format!("{}/{}", jurisdiction, product_type),
            )
        })?;

        let mut modules = Vec::with_capacity(template.module_refs.len());
        for module_ref in &template.module_refs {
            let module = catalog.module(module_ref).ok_or_else(|| {
                warn!(template = %template.name, module_id = %module_ref, "模板引用的模块不存在");
                EngineError::not_found(NotFoundKind::Module, module_ref.clone())
            })?;

            for dep in &module.depends_on {
                if catalog.module(dep).is_none() {
                    warn!(module_id = %module.id, dependency = %dep, "模块依赖的模块不存在");
                    return Err(EngineError::not_found(NotFoundKind::Module, dep.clone()));
                }
            }

            modules.push(module);
        }

        debug!(
            template = %template.name,
            modules = modules.len(),
            "模板解析完成"
        );

        Ok(ResolvedTemplate { template, modules })
    }
}
