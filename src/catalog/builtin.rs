// ==========================================
// 伊斯兰金融合规工作流 - 内置目录
// ==========================================
// 职责: 编译期嵌入 catalog/ 下的模块与模板 JSON
// ==========================================

use crate::catalog::document::RawDocument;
use crate::catalog::error::CatalogResult;
use crate::catalog::source::CatalogSource;
use crate::catalog::store::ModuleCatalog;
use async_trait::async_trait;

pub const BUILTIN_ORIGIN: &str = "builtin";

macro_rules! builtin_doc {
    ($ctor:ident, $dir:literal, $name:literal) => {
        RawDocument::$ctor(
            concat!("builtin:", $dir, "/", $name, ".json"),
            include_str!(concat!("../../catalog/", $dir, "/", $name, ".json")),
        )
    };
}

/// 内置原始文档
pub fn builtin_documents() -> Vec<RawDocument> {
    vec![
        builtin_doc!(module, "modules", "deal_origination"),
        builtin_doc!(module, "modules", "shariah_structuring"),
        builtin_doc!(module, "modules", "qa_ijarah_asset"),
        builtin_doc!(module, "modules", "qcb_regulatory"),
        builtin_doc!(module, "modules", "ijarah_documentation"),
        builtin_doc!(module, "modules", "murabaha_trade"),
        builtin_doc!(module, "modules", "sc_malaysia_lodgement"),
        builtin_doc!(module, "modules", "aaoifi_reporting"),
        builtin_doc!(template, "templates", "qatar_ijarah"),
        builtin_doc!(template, "templates", "qatar_murabaha"),
        builtin_doc!(template, "templates", "malaysia_sukuk"),
    ]
}

/// 构建内置目录
pub fn builtin_catalog() -> CatalogResult<ModuleCatalog> {
    ModuleCatalog::from_documents(BUILTIN_ORIGIN, &builtin_documents())
}

// ==========================================
// BuiltinCatalogSource - 内置数据源
// ==========================================
// 红线: origin 与 builtin_catalog() 一致,重置前后不变
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogSource;

#[async_trait]
impl CatalogSource for BuiltinCatalogSource {
    fn describe(&self) -> String {
        BUILTIN_ORIGIN.to_string()
    }

    async fn load_documents(&self) -> anyhow::Result<Vec<RawDocument>> {
        Ok(builtin_documents())
    }
}

/// 内置目录的数据源形式（用于 reset/重载回内置目录）
pub fn builtin_source() -> BuiltinCatalogSource {
    BuiltinCatalogSource
}
