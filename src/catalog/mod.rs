// ==========================================
// 伊斯兰金融合规工作流 - 模块目录层
// ==========================================
// 职责: 模块/模板目录的加载、校验与原子重载
// 存储: 内存快照 (Arc<ModuleCatalog>)
// ==========================================

pub mod builtin;
pub mod document;
pub mod error;
pub mod source;
pub mod store;

// 重导出
pub use builtin::{
    builtin_catalog, builtin_documents, builtin_source, BuiltinCatalogSource, BUILTIN_ORIGIN,
};
pub use document::{parse_document, CatalogDocument, DocumentKind, RawDocument};
pub use error::{CatalogError, CatalogResult};
pub use source::{
    CatalogSource, DirectoryCatalogSource, StaticCatalogSource, MODULES_DIR, TEMPLATES_DIR,
};
pub use store::{CatalogStats, CatalogStore, ModuleCatalog};
