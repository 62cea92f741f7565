// ==========================================
// 伊斯兰金融合规工作流 - 模块目录存储
// ==========================================
// 职责: 持有已校验的模块/模板目录,提供只读快照
// 红线: 目录加载后只读; 重载必须整体替换 (原子切换)
// 红线: 装配调用持有快照,永远看不到半更新的目录
// ==========================================

use crate::catalog::document::{parse_document, CatalogDocument, RawDocument};
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::source::CatalogSource;
use crate::domain::module::{WorkflowModule, WorkflowTemplate};
use crate::domain::types::{Jurisdiction, ProductType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

// ==========================================
// ModuleCatalog - 不可变目录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: HashMap<String, WorkflowModule>,
    templates: BTreeMap<(Jurisdiction, ProductType), WorkflowTemplate>,
    origin: String,
}

/// 目录统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub origin: String,
    pub module_count: usize,
    pub template_count: usize,
}

impl ModuleCatalog {
    /// 从已构造的模块/模板创建目录（逐个校验）
    pub fn from_parts(
        origin: impl Into<String>,
        modules: Vec<WorkflowModule>,
        templates: Vec<WorkflowTemplate>,
    ) -> CatalogResult<Self> {
        let mut catalog = ModuleCatalog {
            origin: origin.into(),
            ..Default::default()
        };

        for module in modules {
            crate::catalog::document::validate_module(&module)?;
            catalog.insert_module(module)?;
        }
        for template in templates {
            crate::catalog::document::validate_template(&template)?;
            catalog.insert_template(template)?;
        }

        Ok(catalog)
    }

    /// 从原始文档构建目录
    ///
    /// 任一文档失败则整体失败,不产生部分目录
    pub fn from_documents(origin: impl Into<String>, docs: &[RawDocument]) -> CatalogResult<Self> {
        let mut catalog = ModuleCatalog {
            origin: origin.into(),
            ..Default::default()
        };

        for raw in docs {
            match parse_document(raw)? {
                CatalogDocument::Module(module) => catalog.insert_module(module)?,
                CatalogDocument::Template(template) => catalog.insert_template(template)?,
            }
        }

        debug!(
            origin = %catalog.origin,
            modules = catalog.modules.len(),
            templates = catalog.templates.len(),
            "目录构建完成"
        );

        Ok(catalog)
    }

    fn insert_module(&mut self, module: WorkflowModule) -> CatalogResult<()> {
        if self.modules.contains_key(&module.id) {
            return Err(CatalogError::DuplicateModule(module.id));
        }
        self.modules.insert(module.id.clone(), module);
        Ok(())
    }

    fn insert_template(&mut self, template: WorkflowTemplate) -> CatalogResult<()> {
        let key = template.key();
        if self.templates.contains_key(&key) {
            return Err(CatalogError::DuplicateTemplate {
                jurisdiction: key.0.to_string(),
                product_type: key.1.to_string(),
            });
        }
        self.templates.insert(key, template);
        Ok(())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn module(&self, module_id: &str) -> Option<&WorkflowModule> {
        self.modules.get(module_id)
    }

    pub fn template(
        &self,
        jurisdiction: Jurisdiction,
        product_type: ProductType,
    ) -> Option<&WorkflowTemplate> {
        self.templates.get(&(jurisdiction, product_type))
    }

    /// 全部模板（按辖区、产品排序）
    pub fn templates(&self) -> impl Iterator<Item = &WorkflowTemplate> {
        self.templates.values()
    }

    /// 某辖区可配置的产品（交易配置页下拉框）
    pub fn products_for(&self, jurisdiction: Jurisdiction) -> Vec<ProductType> {
        self.templates
            .keys()
            .filter(|(j, _)| *j == jurisdiction)
            .map(|(_, p)| *p)
            .collect()
    }

    /// 有模板的辖区列表
    pub fn jurisdictions(&self) -> Vec<Jurisdiction> {
        let mut result: Vec<Jurisdiction> = self.templates.keys().map(|(j, _)| *j).collect();
        result.dedup();
        result
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            origin: self.origin.clone(),
            module_count: self.modules.len(),
            template_count: self.templates.len(),
        }
    }
}

// ==========================================
// CatalogStore - 可原子重载的目录存储
// ==========================================
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<ModuleCatalog>>,
}

impl CatalogStore {
    pub fn new(catalog: ModuleCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// 使用内置目录创建
    pub fn builtin() -> CatalogResult<Self> {
        Ok(Self::new(crate::catalog::builtin::builtin_catalog()?))
    }

    /// 获取当前目录快照
    ///
    /// 快照在整个装配调用期间保持不变,不受后续重载影响
    pub fn snapshot(&self) -> CatalogResult<Arc<ModuleCatalog>> {
        let guard = self
            .current
            .read()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;
        Ok(Arc::clone(&guard))
    }

    /// 用完整构建好的目录替换当前目录
    ///
    /// # 返回
    /// 被替换的旧目录
    pub fn replace(&self, catalog: ModuleCatalog) -> CatalogResult<Arc<ModuleCatalog>> {
        let replacement = Arc::new(catalog);
        let mut guard = self
            .current
            .write()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;
        let previous = std::mem::replace(&mut *guard, replacement);

        info!(
            previous_origin = %previous.origin,
            origin = %guard.origin,
            modules = guard.modules.len(),
            templates = guard.templates.len(),
            "目录已替换"
        );

        Ok(previous)
    }

    /// 从数据源重载目录
    ///
    /// 先在锁外构建完整目录,成功后才切换; 失败时保留旧目录
    pub async fn reload<S>(&self, source: &S) -> CatalogResult<CatalogStats>
    where
        S: CatalogSource + ?Sized,
    {
        let origin = source.describe();
        info!(origin = %origin, "开始重载目录");

        let docs = match source.load_documents().await {
            Ok(docs) => docs,
            Err(e) => {
                warn!(origin = %origin, error = %e, "目录数据源读取失败,保留当前目录");
                return Err(CatalogError::Source(e));
            }
        };

        let catalog = match ModuleCatalog::from_documents(origin.clone(), &docs) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(origin = %origin, error = %e, "目录校验失败,保留当前目录");
                return Err(e);
            }
        };

        let stats = catalog.stats();
        self.replace(catalog)?;
        Ok(stats)
    }
}
